//! Wire types mirroring the catalog service's JSON responses, plus the pure
//! conversions from wire shapes into the domain model.
//!
//! These structures follow TMDB's v3 response format. The conversions do no
//! I/O and carry no policy; they are the "parsing collaborator" the rest of
//! the crate calls out to.

use serde::Deserialize;

use super::{Episode, SeasonSummary, Show};

/// Full show record from the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowDetail {
    pub id: i32,
    pub name: String,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub status: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub number_of_seasons: Option<i32>,
    pub number_of_episodes: Option<i32>,
    /// Declared season summaries driving episode expansion
    #[serde(default)]
    pub seasons: Vec<SeasonHeader>,
    /// Cross-catalog ids, present when requested inline
    pub external_ids: Option<ExternalIds>,
}

/// Season summary inside a show detail record.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonHeader {
    pub season_number: i32,
    pub episode_count: Option<i32>,
}

/// Cross-catalog identifiers attached to a show record.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalIds {
    pub tvdb_id: Option<i64>,
    pub imdb_id: Option<String>,
}

/// Response of the find-by-external-id endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FindResults {
    /// TV matches for the identifier; zero or more sparse records
    #[serde(default)]
    pub tv_results: Vec<FoundShow>,
}

/// Sparse show record in a find result.
#[derive(Debug, Clone, Deserialize)]
pub struct FoundShow {
    pub id: i32,
    pub name: Option<String>,
}

/// Response of the season detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonDetail {
    pub season_number: Option<i32>,
    /// Episodes, already ordered by episode number by the service
    #[serde(default)]
    pub episodes: Vec<EpisodeDetail>,
}

/// Episode record inside a season detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeDetail {
    pub id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub air_date: Option<String>,
}

/// Response page of the free-text search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchedShow>,
}

/// Sparse show record in a search result page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchedShow {
    pub id: i32,
    pub name: String,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Converts a show detail record into the domain model.
///
/// Seasons carry their declared episode counts; episodes stay empty until
/// the caller asks for expansion.
pub fn show_from_detail(detail: ShowDetail, language: &str) -> Show {
    let (tvdb_id, imdb_id) = match detail.external_ids {
        Some(ids) => (ids.tvdb_id, ids.imdb_id),
        None => (None, None),
    };

    Show {
        tmdb_id: detail.id,
        name: detail.name,
        overview: detail.overview,
        first_air_date: detail.first_air_date,
        language: Some(language.to_string()),
        status: detail.status,
        poster_path: detail.poster_path,
        backdrop_path: detail.backdrop_path,
        tvdb_id,
        imdb_id,
        seasons: detail
            .seasons
            .into_iter()
            .map(|season| SeasonSummary {
                season_number: season.season_number,
                episode_count: season.episode_count.unwrap_or(0),
            })
            .collect(),
        episodes: Vec::new(),
    }
}

/// Converts a season detail response into episodes.
///
/// The service returns episodes in episode-number order within the season;
/// that order is preserved, not re-derived.
pub fn episodes_from_season(detail: SeasonDetail) -> Vec<Episode> {
    detail
        .episodes
        .into_iter()
        .map(|episode| Episode {
            tmdb_id: episode.id,
            season_number: episode.season_number,
            episode_number: episode.episode_number,
            name: episode.name.unwrap_or_default(),
            overview: episode.overview,
            air_date: episode.air_date,
        })
        .collect()
}

/// Converts a search result page into sparse shows.
pub fn shows_from_search(results: SearchResults, language: &str) -> Vec<Show> {
    results
        .results
        .into_iter()
        .map(|found| Show {
            tmdb_id: found.id,
            name: found.name,
            overview: found.overview,
            first_air_date: found.first_air_date,
            language: Some(language.to_string()),
            status: None,
            poster_path: found.poster_path,
            backdrop_path: found.backdrop_path,
            tvdb_id: None,
            imdb_id: None,
            seasons: Vec::new(),
            episodes: Vec::new(),
        })
        .collect()
}
