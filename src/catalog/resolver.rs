//! Show resolution through a prioritized identifier cascade.
//!
//! Callers hand over whatever identifiers they have; resolution tries a
//! fixed-priority sequence of lookups and stops at the first hit. A show
//! that cannot be resolved is reported as absence, never as an error — the
//! tracker treats "not found" and "gave up" the same way.

use std::sync::Arc;

use tracing::warn;

use crate::dispatch::{Dispatcher, RetryPolicy, TransportError};
use crate::throttle::RequestThrottle;

use super::transport::{CatalogTransport, ExternalIdKind};
use super::wire::{self, ShowDetail};
use super::{seasons, Show, ShowIds};

/// One step of the resolution cascade.
enum LookupStep<'a> {
    /// Direct detail lookup by native id
    Direct(i32),
    /// Find-by-external-id, then detail lookup on the first candidate
    External(&'a str, ExternalIdKind),
}

/// Resolves shows from candidate identifiers and expands their episodes.
///
/// Generic over the transport so tests can script the service; production
/// code uses [`TmdbTransport`](super::TmdbTransport).
pub struct ShowResolver<T: CatalogTransport> {
    transport: T,
    dispatcher: Dispatcher,
}

impl<T: CatalogTransport> ShowResolver<T> {
    /// Creates a resolver sharing the given throttle, with default retry
    /// policy.
    pub fn new(transport: T, throttle: Arc<RequestThrottle>) -> Self {
        Self {
            transport,
            dispatcher: Dispatcher::new(throttle),
        }
    }

    /// Creates a resolver with a custom retry policy.
    pub fn with_policy(transport: T, throttle: Arc<RequestThrottle>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            dispatcher: Dispatcher::with_policy(throttle, policy),
        }
    }

    /// Resolves a show from whichever identifiers are available.
    ///
    /// Lookup priority: native id first, then the legacy id, then the
    /// cross-reference id; the first hit wins. The returned show carries
    /// season summaries but no episodes. An empty bag, a full miss, or an
    /// exhausted transport budget all come back as `None`.
    pub fn resolve(&self, ids: &ShowIds, language: &str) -> Option<Show> {
        match self.run_cascade(ids, language) {
            Ok(detail) => detail.map(|detail| wire::show_from_detail(detail, language)),
            Err(err) => {
                warn!(error = %err, "show resolution failed");
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but also expands the show into its
    /// full episode list.
    pub fn resolve_with_episodes(&self, ids: &ShowIds, language: &str) -> Option<Show> {
        let mut show = self.resolve(ids, language)?;
        show.episodes = self.fetch_episodes(&show, language);
        Some(show)
    }

    /// Resolves a show directly by its native id.
    pub fn show_by_id(&self, tmdb_id: i32, language: &str, include_episodes: bool) -> Option<Show> {
        let detail = match self.detail_by_id(tmdb_id, language) {
            Ok(detail) => detail?,
            Err(err) => {
                warn!(tmdb_id, error = %err, "show lookup failed");
                return None;
            }
        };

        let mut show = wire::show_from_detail(detail, language);
        if include_episodes {
            show.episodes = self.fetch_episodes(&show, language);
        }
        Some(show)
    }

    /// Free-text show search returning sparse results.
    ///
    /// Any failure degrades to an empty list.
    pub fn search(&self, query: &str, language: &str) -> Vec<Show> {
        let reply = match self
            .dispatcher
            .execute(|| self.transport.search_shows(query, language))
        {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "show search failed");
                return Vec::new();
            }
        };

        match reply.into_payload("show search") {
            Some(results) => wire::shows_from_search(results, language),
            None => Vec::new(),
        }
    }

    /// Fetches the full episode list for an already resolved show.
    pub fn fetch_episodes(&self, show: &Show, language: &str) -> Vec<super::Episode> {
        seasons::fetch_episodes(
            &self.transport,
            &self.dispatcher,
            show.tmdb_id,
            &show.seasons,
            language,
        )
    }

    /// Walks the cascade in priority order until a step yields a record.
    ///
    /// A transport failure aborts the whole cascade rather than falling
    /// through to the next identifier; the retry budget was already spent.
    fn run_cascade(
        &self,
        ids: &ShowIds,
        language: &str,
    ) -> Result<Option<ShowDetail>, TransportError> {
        let steps = [
            ids.tmdb_id.map(LookupStep::Direct),
            ids.tvdb_id
                .as_deref()
                .map(|id| LookupStep::External(id, ExternalIdKind::Tvdb)),
            ids.imdb_id
                .as_deref()
                .map(|id| LookupStep::External(id, ExternalIdKind::Imdb)),
        ];

        for step in steps.into_iter().flatten() {
            let detail = match step {
                LookupStep::Direct(tmdb_id) => self.detail_by_id(tmdb_id, language)?,
                LookupStep::External(external_id, kind) => {
                    self.detail_by_external_id(external_id, kind, language)?
                }
            };
            if detail.is_some() {
                return Ok(detail);
            }
        }

        Ok(None)
    }

    /// Detail lookup by native id; absence for any non-success reply.
    fn detail_by_id(
        &self,
        tmdb_id: i32,
        language: &str,
    ) -> Result<Option<ShowDetail>, TransportError> {
        let reply = self
            .dispatcher
            .execute(|| self.transport.show_detail(tmdb_id, language))?;
        Ok(reply.into_payload("show detail"))
    }

    /// Two-step lookup: find candidates for a foreign identifier, then fetch
    /// detail for the first TV match, if any.
    fn detail_by_external_id(
        &self,
        external_id: &str,
        kind: ExternalIdKind,
        language: &str,
    ) -> Result<Option<ShowDetail>, TransportError> {
        let reply = self
            .dispatcher
            .execute(|| self.transport.find_by_external_id(external_id, kind, language))?;

        let Some(results) = reply.into_payload("find by external id") else {
            return Ok(None);
        };
        let Some(candidate) = results.tv_results.first() else {
            return Ok(None);
        };

        self.detail_by_id(candidate.id, language)
    }
}
