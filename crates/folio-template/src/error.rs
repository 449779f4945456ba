//! Error types for template loading

use std::path::PathBuf;

/// Errors raised while building a template registry
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template name is empty or contains characters outside `[a-z0-9_-]`
    #[error("invalid template name: '{0}'")]
    InvalidName(String),

    /// IO error while reading a template directory
    #[error("io error reading {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
