//! Folio Site
//!
//! Site services around the playground:
//!
//! - [`contact`]: validate a contact form submission and turn it into a
//!   deep link to a messaging service
//! - [`offline`]: versioned read-through cache for offline visits

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod contact;
mod error;
pub mod offline;

pub use contact::{ContactField, ContactLink, ContactMessage, HandoffStrategy};
pub use error::{CacheError, ContactError, FetchError};
pub use offline::{CacheStorage, Fetcher, OfflineCache, Request, Response};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
