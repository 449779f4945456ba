//! Execution runtime seam
//!
//! The playground depends on [`ExecutionRuntime`] rather than on a concrete
//! engine, so hosts can substitute their own isolation primitive.

use crate::error::ExecutionError;
use serde::{Deserialize, Serialize};

/// Something that can run a behavior fragment in isolation
pub trait ExecutionRuntime {
    /// Execute `source` in a fresh, isolated context
    ///
    /// # Errors
    /// Returns the fragment's runtime failure. Implementations must not
    /// panic on any input.
    fn execute(&self, source: &str) -> Result<ExecutionReport, ExecutionError>;
}

impl<R: ExecutionRuntime + ?Sized> ExecutionRuntime for Box<R> {
    fn execute(&self, source: &str) -> Result<ExecutionReport, ExecutionError> {
        (**self).execute(source)
    }
}

/// Console severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    /// `console.log`
    Log,
    /// `console.info`
    Info,
    /// `console.warn`
    Warn,
    /// `console.error`
    Error,
    /// `console.debug`
    Debug,
}

/// One recorded console call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleLine {
    /// Severity
    pub level: ConsoleLevel,
    /// Arguments joined by single spaces
    pub text: String,
}

/// What a successful run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Console output in call order
    pub console: Vec<ConsoleLine>,
}

impl ExecutionReport {
    /// Console text, one line per call
    #[must_use]
    pub fn console_text(&self) -> String {
        self.console
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
