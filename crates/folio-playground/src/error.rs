//! Playground error types
//!
//! None of these ever escape [`crate::Playground::render`]; behavior
//! failures travel in-band as [`folio_sandbox::ExecutionError`].

use crate::state_machine::PlaygroundState;
use std::path::PathBuf;

/// Configuration could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::PlaygroundConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// A render target failed to accept a document
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// Writing the document failed
    #[error("failed to write render target {path}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// State machine violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Transition not in the allowed table
    #[error("illegal state transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current state
        from: PlaygroundState,
        /// Requested state
        to: PlaygroundState,
    },
}
