//! Transport seam between the lookup logic and the catalog service.
//!
//! Each trait method performs exactly one blocking round trip and reports its
//! outcome as a [`Reply`]; all retry and throttling policy lives above this
//! seam in the dispatcher. Tests substitute scripted implementations.

use crate::dispatch::TransportError;
use crate::response::Reply;

use super::wire::{FindResults, SearchResults, SeasonDetail, ShowDetail};

/// Identifier namespaces the catalog's find endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalIdKind {
    /// Legacy catalog id (TVDB)
    Tvdb,
    /// Cross-reference catalog id (IMDB)
    Imdb,
}

impl ExternalIdKind {
    /// The query-parameter value the service expects for this namespace.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            ExternalIdKind::Tvdb => "tvdb_id",
            ExternalIdKind::Imdb => "imdb_id",
        }
    }
}

/// One blocking round trip per method, no retry logic.
pub trait CatalogTransport {
    /// Full show record by native id, external ids requested inline.
    fn show_detail(&self, tmdb_id: i32, language: &str)
    -> Result<Reply<ShowDetail>, TransportError>;

    /// Sparse candidate matches for an identifier from another catalog.
    fn find_by_external_id(
        &self,
        external_id: &str,
        kind: ExternalIdKind,
        language: &str,
    ) -> Result<Reply<FindResults>, TransportError>;

    /// Episode detail for one season of a show.
    fn season_detail(
        &self,
        show_id: i32,
        season_number: i32,
        language: &str,
    ) -> Result<Reply<SeasonDetail>, TransportError>;

    /// Free-text show search.
    fn search_shows(&self, query: &str, language: &str)
    -> Result<Reply<SearchResults>, TransportError>;
}
