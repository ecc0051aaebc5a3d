//! CatalogCourier - Throttled, retrying metadata fetches from a remote catalog
//!
//! This library fetches television-show and episode metadata on behalf of a
//! client application that tracks watched episodes. The remote catalog
//! enforces a strict request-rate ceiling and occasionally answers with
//! transient failures or "too many requests"; this crate serializes every
//! outgoing request through one shared throttle, retries transient failures
//! with bounded backoff, resolves shows from whichever identifiers a caller
//! has, and expands a resolved show into its full episode list.
//!
//! Persistent storage and presentation are the embedding application's
//! concern; everything here is transient per call.

mod catalog;
mod dispatch;
mod response;
mod throttle;

use std::sync::Arc;

// Re-export the domain model and the pieces callers wire together
pub use catalog::wire;
pub use catalog::{
    CatalogTransport, Episode, ExternalIdKind, SeasonSummary, Show, ShowIds, ShowResolver,
    TmdbTransport,
};
pub use dispatch::{Dispatcher, RetryPolicy, TransportError};
pub use response::Reply;
pub use throttle::{MIN_REQUEST_INTERVAL, RequestThrottle};

/// Ready-wired catalog client for the common case.
///
/// Bundles the TMDB transport, one shared throttle and the default retry
/// policy behind the operations a tracker needs. Construct it once and share
/// it; every request it issues from any thread respects the same minimum
/// dispatch interval.
///
/// # Examples
///
/// ```no_run
/// use catalog_courier::{CatalogClient, ShowIds};
///
/// let client = CatalogClient::new("api-key");
///
/// // Resolve from a legacy identifier and expand all episodes
/// let ids = ShowIds {
///     tvdb_id: Some("81189".to_string()),
///     ..ShowIds::default()
/// };
/// if let Some(show) = client.resolve_with_episodes(&ids, "en") {
///     println!("{}: {} episode(s)", show.name, show.episodes.len());
/// }
/// ```
pub struct CatalogClient {
    resolver: ShowResolver<TmdbTransport>,
}

impl CatalogClient {
    /// Creates a client for the public catalog service.
    pub fn new(api_key: impl Into<String>) -> Self {
        let throttle = Arc::new(RequestThrottle::default());
        Self {
            resolver: ShowResolver::new(TmdbTransport::new(api_key), throttle),
        }
    }

    /// Resolves a show from candidate identifiers; episodes not populated.
    pub fn resolve(&self, ids: &ShowIds, language: &str) -> Option<Show> {
        self.resolver.resolve(ids, language)
    }

    /// Resolves a show and expands its full episode list.
    pub fn resolve_with_episodes(&self, ids: &ShowIds, language: &str) -> Option<Show> {
        self.resolver.resolve_with_episodes(ids, language)
    }

    /// Fetches a show directly by its native catalog id.
    pub fn show_by_id(&self, tmdb_id: i32, language: &str, include_episodes: bool) -> Option<Show> {
        self.resolver.show_by_id(tmdb_id, language, include_episodes)
    }

    /// Searches shows by name, returning sparse results.
    pub fn search(&self, query: &str, language: &str) -> Vec<Show> {
        self.resolver.search(query, language)
    }
}
