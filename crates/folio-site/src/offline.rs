//! Offline read-through cache
//!
//! A versioned, named cache precached with the site's assets on install.
//! Requests are answered from any cache first and from the network on a
//! miss; network responses are not written back. Activation deletes every
//! cache left over from older versions.

use crate::error::{CacheError, FetchError};
use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::try_join_all;
use moka::future::Cache;
use std::sync::Arc;

/// Default cache version name
pub const DEFAULT_VERSION: &str = "folio-v1";

/// Assets every version precaches
pub const DEFAULT_PRECACHE: &[&str] = &[
    "/",
    "/index.html",
    "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/devicon.min.css",
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css",
];

const MAX_ENTRIES_PER_CACHE: u64 = 1024;

/// An outgoing request, keyed by URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Request {
    url: String,
}

impl Request {
    /// Request for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Requested URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A network or cached response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status
    pub status: u16,
    /// Body bytes
    pub body: Arc<[u8]>,
}

impl Response {
    /// Response with status and body
    pub fn new(status: u16, body: impl Into<Arc<[u8]>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK` with body
    pub fn ok(body: impl Into<Arc<[u8]>>) -> Self {
        Self::new(200, body)
    }

    /// Status in the 2xx range
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network access
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `request` from the network
    ///
    /// # Errors
    /// [`FetchError::Network`] when no response could be obtained.
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

/// Named caches, each mapping URL to response
#[derive(Debug, Default)]
pub struct CacheStorage {
    caches: DashMap<String, Cache<String, Response>>,
}

impl CacheStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (creating if needed) the cache called `name`
    #[must_use]
    pub fn open(&self, name: &str) -> Cache<String, Response> {
        self.caches
            .entry(name.to_owned())
            .or_insert_with(|| Cache::new(MAX_ENTRIES_PER_CACHE))
            .clone()
    }

    /// A cache called `name` exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.caches.contains_key(name)
    }

    /// Delete the cache called `name`; returns whether it existed
    pub fn delete(&self, name: &str) -> bool {
        self.caches.remove(name).is_some()
    }

    /// Cache names, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.caches.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// First cached response for `request`, searching caches in name order
    pub async fn match_request(&self, request: &Request) -> Option<Response> {
        for name in self.keys() {
            let Some(cache) = self.caches.get(&name).map(|c| c.value().clone()) else {
                continue;
            };
            if let Some(response) = cache.get(request.url()).await {
                return Some(response);
            }
        }
        None
    }
}

/// Versioned offline cache in front of a [`Fetcher`]
pub struct OfflineCache<F> {
    version: String,
    precache: Vec<String>,
    storage: Arc<CacheStorage>,
    fetcher: F,
}

impl<F: Fetcher> OfflineCache<F> {
    /// Cache with the default version and asset list
    pub fn new(storage: Arc<CacheStorage>, fetcher: F) -> Self {
        Self {
            version: DEFAULT_VERSION.to_owned(),
            precache: DEFAULT_PRECACHE.iter().map(|&url| url.to_owned()).collect(),
            storage,
            fetcher,
        }
    }

    /// With cache version name
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// With precache asset list
    #[must_use]
    pub fn with_precache<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.precache = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Current version name
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fetch every precache asset and store them all, or nothing
    ///
    /// # Errors
    /// [`CacheError::Install`] with the first failing fetch; a non-success
    /// status counts as a failure.
    pub async fn install(&self) -> Result<usize, CacheError> {
        let fetches = self.precache.iter().map(|url| async move {
            let request = Request::new(url.clone());
            let response = self.fetcher.fetch(&request).await?;
            if response.is_success() {
                Ok::<_, FetchError>((url.clone(), response))
            } else {
                Err(FetchError::Status {
                    url: url.clone(),
                    status: response.status,
                })
            }
        });

        let responses = try_join_all(fetches).await.map_err(|source| {
            tracing::warn!(version = %self.version, "offline cache install failed: {source}");
            CacheError::Install {
                version: self.version.clone(),
                source,
            }
        })?;

        let cache = self.storage.open(&self.version);
        let count = responses.len();
        for (url, response) in responses {
            cache.insert(url, response).await;
        }
        tracing::info!(version = %self.version, assets = count, "offline cache installed");
        Ok(count)
    }

    /// Cached response if any, otherwise the network's
    ///
    /// # Errors
    /// The fetcher's error on a miss.
    pub async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        if let Some(response) = self.storage.match_request(request).await {
            tracing::debug!(url = request.url(), "offline cache hit");
            return Ok(response);
        }
        self.fetcher.fetch(request).await
    }

    /// Delete every cache not named after the current version
    pub fn activate(&self) -> Vec<String> {
        let stale: Vec<String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|name| *name != self.version)
            .collect();
        for name in &stale {
            self.storage.delete(name);
            tracing::info!(cache = %name, "stale offline cache deleted");
        }
        stale
    }
}
