//! Render targets
//!
//! A target is the isolated surface a rendered document is shown in. Every
//! render replaces the target's content wholesale; nothing from a previous
//! document survives.

use crate::document::RenderedDocument;
use crate::error::TargetError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Isolated display surface for assembled documents
pub trait RenderTarget {
    /// Replace the current content with `document`
    ///
    /// # Errors
    /// Returns [`TargetError`] when the surface cannot accept the document.
    fn replace(&mut self, document: &RenderedDocument) -> Result<(), TargetError>;

    /// Empty the surface
    ///
    /// # Errors
    /// Returns [`TargetError`] when the surface cannot be cleared.
    fn clear(&mut self) -> Result<(), TargetError>;
}

/// In-memory sandboxed frame
///
/// Keeps the current document and counts replacements so hosts can tell a
/// fresh document from a stale one.
#[derive(Debug, Clone, Default)]
pub struct FrameTarget {
    current: Option<RenderedDocument>,
    generation: u64,
}

impl FrameTarget {
    /// Create empty frame
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document currently shown
    #[inline]
    #[must_use]
    pub fn document(&self) -> Option<&RenderedDocument> {
        self.current.as_ref()
    }

    /// HTML currently shown, empty when cleared
    #[must_use]
    pub fn html(&self) -> &str {
        self.current.as_ref().map_or("", RenderedDocument::html)
    }

    /// `<iframe srcdoc>` markup for the current document
    #[must_use]
    pub fn srcdoc_frame(&self) -> Option<String> {
        self.current.as_ref().map(RenderedDocument::to_frame)
    }

    /// Number of documents shown so far
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nothing shown
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl RenderTarget for FrameTarget {
    fn replace(&mut self, document: &RenderedDocument) -> Result<(), TargetError> {
        self.current = Some(document.clone());
        self.generation += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TargetError> {
        self.current = None;
        Ok(())
    }
}

/// Document written to a file on every render
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the destination, so readers never see a partial document.
#[derive(Debug, Clone)]
pub struct FileTarget {
    path: PathBuf,
    frame: bool,
}

impl FileTarget {
    /// Target writing the bare document to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: false,
        }
    }

    /// Write the `<iframe srcdoc>` wrapper instead of the bare document
    #[must_use]
    pub fn with_frame(mut self, frame: bool) -> Self {
        self.frame = frame;
        self
    }

    /// Destination path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &str) -> Result<(), TargetError> {
        let io_err = |source: std::io::Error| TargetError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        temp.write_all(contents.as_bytes()).map_err(io_err)?;
        temp.flush().map_err(io_err)?;
        temp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl RenderTarget for FileTarget {
    fn replace(&mut self, document: &RenderedDocument) -> Result<(), TargetError> {
        if self.frame {
            self.write_atomic(&document.to_frame())
        } else {
            self.write_atomic(document.html())
        }
    }

    fn clear(&mut self) -> Result<(), TargetError> {
        self.write_atomic("")
    }
}
