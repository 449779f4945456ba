//! Error types for sandboxed execution

use serde::{Deserialize, Serialize};

/// A runtime failure raised by a behavior fragment
///
/// `name` is the error kind as the script saw it (`ReferenceError`,
/// `TypeError`, `SyntaxError`, ...), `message` its message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{name}: {message}")]
pub struct ExecutionError {
    /// Error kind
    pub name: String,
    /// Human-readable message
    pub message: String,
}

impl ExecutionError {
    /// Create execution error
    #[inline]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Split an engine error rendered as `Kind: message`
    ///
    /// Text without a recognisable kind prefix is reported as a plain `Error`.
    #[must_use]
    pub fn from_display(text: &str) -> Self {
        match text.split_once(": ") {
            Some((name, message))
                if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Self::new(name, message)
            }
            _ => Self::new("Error", text),
        }
    }
}

/// Failures of the sandbox machinery itself, as opposed to the fragment
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// The host shim could not be installed into a fresh context
    #[error("host shim failed to install: {0}")]
    Shim(String),

    /// The engine rejected an operation outside user code
    #[error("engine error: {0}")]
    Engine(String),

    /// The execution outcome could not be decoded
    #[error("malformed execution outcome: {0}")]
    Outcome(#[from] serde_json::Error),
}

impl From<SandboxError> for ExecutionError {
    fn from(err: SandboxError) -> Self {
        Self::new("SandboxError", err.to_string())
    }
}
