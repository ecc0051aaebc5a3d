//! Domain model and lookup machinery for show and episode metadata.
//!
//! This module holds the structures a watched-episode tracker works with
//! (shows, season summaries, episodes, identifier bags), the transport seam
//! to the remote catalog service, and the resolution/expansion logic layered
//! on top of the retry executor.

mod resolver;
mod seasons;
mod tmdb;
pub mod transport;
pub mod wire;

pub use resolver::ShowResolver;
pub use tmdb::TmdbTransport;
pub use transport::{CatalogTransport, ExternalIdKind};

/// Candidate external identifiers for a show.
///
/// Callers rarely have all of these; any subset is valid, including none.
/// Resolution tries them in a fixed priority order: native catalog id first,
/// then the legacy id, then the cross-reference id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowIds {
    /// Native catalog id (TMDB)
    pub tmdb_id: Option<i32>,
    /// Legacy catalog id (TVDB), kept as text the way trackers store it
    pub tvdb_id: Option<String>,
    /// Cross-reference catalog id (IMDB)
    pub imdb_id: Option<String>,
}

impl ShowIds {
    /// Returns true when no identifier of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.tmdb_id.is_none() && self.tvdb_id.is_none() && self.imdb_id.is_none()
    }
}

/// A television show as the tracker sees it.
///
/// `episodes` stays empty until the caller asks for expansion; `seasons`
/// carries the declared season summaries that drive that expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    /// Native catalog id
    pub tmdb_id: i32,
    /// Show title
    pub name: String,
    /// Descriptive summary
    pub overview: Option<String>,
    /// First air date as reported by the catalog (ISO 8601 date)
    pub first_air_date: Option<String>,
    /// Language the metadata was requested in
    pub language: Option<String>,
    /// Production status ("Returning Series", "Ended", ...)
    pub status: Option<String>,
    /// Poster image path
    pub poster_path: Option<String>,
    /// Backdrop image path
    pub backdrop_path: Option<String>,
    /// Legacy catalog id, when the service cross-references one
    pub tvdb_id: Option<i64>,
    /// Cross-reference catalog id
    pub imdb_id: Option<String>,
    /// Declared seasons, used to drive episode expansion
    pub seasons: Vec<SeasonSummary>,
    /// Episodes ordered by season then episode number; empty until expanded
    pub episodes: Vec<Episode>,
}

/// Lightweight per-season metadata attached to a resolved show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSummary {
    /// The season number (0 for specials)
    pub season_number: i32,
    /// Declared number of episodes in this season
    pub episode_count: i32,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Native catalog id of the episode
    pub tmdb_id: i32,
    /// Season this episode belongs to
    pub season_number: i32,
    /// Episode number within the season
    pub episode_number: i32,
    /// Episode title
    pub name: String,
    /// Descriptive summary
    pub overview: Option<String>,
    /// Air date as reported by the catalog (ISO 8601 date)
    pub air_date: Option<String>,
}
