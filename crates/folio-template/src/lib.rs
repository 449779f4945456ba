//! Folio Template Registry
//!
//! Read-only seed data for the live code playground.
//!
//! # Core Concepts
//!
//! - [`ExampleTemplate`]: one named triple of structure, presentation and behavior fragments
//! - [`TemplateRegistry`]: the closed set of templates a selector can offer
//! - [`builtin`]: templates shipped with the crate (card, calculator, todo, clock)
//!
//! # Example
//!
//! ```rust
//! use folio_template::TemplateRegistry;
//!
//! let registry = TemplateRegistry::with_builtins();
//! let calculator = registry.get("calculator").unwrap();
//! assert!(calculator.structure().contains("calculator"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod builtin;
mod error;
mod loader;
mod registry;
mod template;

pub use error::TemplateError;
pub use loader::{load_dir, BEHAVIOR_FILE, PRESENTATION_FILE, STRUCTURE_FILE};
pub use registry::TemplateRegistry;
pub use template::{validate_name, ExampleTemplate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
