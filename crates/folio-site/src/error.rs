//! Error types for site services

use crate::contact::ContactField;

/// Contact submission rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContactError {
    /// A required field is empty after trimming
    #[error("please fill in the {0} field")]
    MissingField(ContactField),

    /// Email address does not look like `local@domain.tld`
    #[error("please enter a valid email address")]
    InvalidEmail,

    /// Recipient number has no digits
    #[error("invalid phone number: {0:?}")]
    InvalidPhone(String),

    /// Link could not be built
    #[error("invalid link: {0}")]
    Url(#[from] url::ParseError),

    /// Email pattern failed to compile
    #[error("email pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Network fetch failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No response at all
    #[error("network error fetching {url}: {reason}")]
    Network {
        /// Requested URL
        url: String,
        /// Transport failure description
        reason: String,
    },

    /// Response with a non-success status
    #[error("{url} responded with status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status
        status: u16,
    },
}

/// Offline cache operation failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// A precache asset could not be fetched; nothing was stored
    #[error("install of {version} failed: {source}")]
    Install {
        /// Cache version being installed
        version: String,
        /// First failing fetch
        #[source]
        source: FetchError,
    },
}
