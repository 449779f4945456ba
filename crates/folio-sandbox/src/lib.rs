//! Folio Sandbox
//!
//! Isolated execution of playground behavior fragments.
//!
//! Every call to [`ScriptSandbox::execute`] builds a brand-new engine
//! context, installs a headless host shim (`window`, `document`, timers,
//! `console`, ...), runs the fragment inside a containment boundary and
//! tears the context down again. Nothing defined by one run is visible to
//! the next.
//!
//! Failures are returned as values: a fragment that throws yields
//! `Err(ExecutionError)` and never panics or unwinds into the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_sandbox::{ExecutionRuntime, SandboxConfig, ScriptSandbox};
//!
//! let sandbox = ScriptSandbox::new(SandboxConfig::default());
//!
//! let report = sandbox.execute("console.log('hello')").unwrap();
//! assert_eq!(report.console_text(), "hello");
//!
//! let err = sandbox.execute("missing()").unwrap_err();
//! assert_eq!(err.name, "ReferenceError");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod error;
mod runtime;
mod sandbox;

pub use config::SandboxConfig;
pub use error::{ExecutionError, SandboxError};
pub use runtime::{ConsoleLevel, ConsoleLine, ExecutionReport, ExecutionRuntime};
pub use sandbox::ScriptSandbox;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
