//! Loading templates from disk
//!
//! A template directory holds one subdirectory per template:
//!
//! ```text
//! templates/
//!   gallery/
//!     index.html
//!     style.css
//!     script.js
//! ```
//!
//! Missing fragment files load as empty fragments. Subdirectories with none
//! of the three files are skipped.

use crate::error::TemplateError;
use crate::template::ExampleTemplate;
use std::fs;
use std::io;
use std::path::Path;

/// File holding the structure fragment
pub const STRUCTURE_FILE: &str = "index.html";
/// File holding the presentation fragment
pub const PRESENTATION_FILE: &str = "style.css";
/// File holding the behavior fragment
pub const BEHAVIOR_FILE: &str = "script.js";

/// Load every template found under `dir`, sorted by name
///
/// # Errors
/// Returns [`TemplateError::Io`] if the directory or a fragment file cannot
/// be read, and [`TemplateError::InvalidName`] if a subdirectory name is not
/// a valid template name.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<ExampleTemplate>, TemplateError> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| TemplateError::io_error(dir, e))?;

    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TemplateError::io_error(dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let structure = read_fragment(&path, STRUCTURE_FILE)?;
        let presentation = read_fragment(&path, PRESENTATION_FILE)?;
        let behavior = read_fragment(&path, BEHAVIOR_FILE)?;
        if structure.is_none() && presentation.is_none() && behavior.is_none() {
            tracing::debug!("skipping {}: no fragment files", path.display());
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let template = ExampleTemplate::new(
            name,
            structure.unwrap_or_default(),
            presentation.unwrap_or_default(),
            behavior.unwrap_or_default(),
        )?;
        tracing::debug!("loaded template '{}' from {}", template.name(), path.display());
        templates.push(template);
    }

    templates.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(templates)
}

fn read_fragment(dir: &Path, file: &str) -> Result<Option<String>, TemplateError> {
    let path = dir.join(file);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TemplateError::io_error(path, e)),
    }
}
