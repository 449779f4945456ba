//! Folio Playground
//!
//! Live code playground renderer: three editable fragments (structure,
//! presentation, behavior) are assembled into one isolated document and
//! shown in a sandboxed render target.
//!
//! # Architecture
//!
//! - [`SourceBuffers`]: exactly one buffer per [`FragmentKind`]
//! - [`Debouncer`]: trailing-edge timer; bursts of edits collapse into one render
//! - [`RenderedDocument`]: assembled HTML plus the behavior's execution outcome
//! - [`RenderTarget`]: isolated display surface ([`FrameTarget`], [`FileTarget`])
//! - [`Playground`]: ties the above together behind a small state machine
//! - [`drive`]: async event loop for hosts that feed edits over a channel
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_playground::{FragmentKind, Playground, PlaygroundConfig};
//!
//! let mut playground = Playground::builder()
//!     .config(PlaygroundConfig::default().with_default_template(None))
//!     .build();
//!
//! playground.set_buffer(FragmentKind::Structure, "<h1 id=\"t\">Hi</h1>");
//! playground.set_buffer(FragmentKind::Behavior, "undefinedFunction()");
//!
//! let document = playground.render();
//! assert!(document.error().is_some());
//! assert!(document.html().contains("folio-error"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod buffer;
mod clock;
mod config;
mod debounce;
pub mod document;
mod driver;
mod error;
mod playground;
pub mod state_machine;
mod target;

pub use buffer::{FragmentKind, RenderRequest, SourceBuffer, SourceBuffers};
pub use clock::{Clock, SystemClock, TokioClock};
pub use config::PlaygroundConfig;
pub use debounce::Debouncer;
pub use document::RenderedDocument;
pub use driver::{drive, PlaygroundEvent};
pub use error::{ConfigError, StateError, TargetError};
pub use playground::{Playground, PlaygroundBuilder};
pub use state_machine::PlaygroundState;
pub use target::{FileTarget, FrameTarget, RenderTarget};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
