//! TMDB implementation of the catalog transport.
//!
//! Talks to https://api.themoviedb.org/3 with a blocking HTTP client. Each
//! method is one round trip; throttling and retries happen in the dispatcher
//! above this layer.

use serde::de::DeserializeOwned;

use crate::dispatch::TransportError;
use crate::response::Reply;

use super::transport::{CatalogTransport, ExternalIdKind};
use super::wire::{FindResults, SearchResults, SeasonDetail, ShowDetail};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Catalog transport backed by the TMDB v3 API.
pub struct TmdbTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl TmdbTransport {
    /// Creates a transport for the public TMDB API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Issues one GET request and normalizes the response into a [`Reply`].
    ///
    /// Connection-level failures become [`TransportError::Io`] so the
    /// dispatcher can retry them; a success body that fails to decode is
    /// [`TransportError::Unexpected`] and is not retried.
    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Reply<T>, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .map_err(|e| TransportError::Io(e.to_string()))?;

        let status = response.status();
        let message = status.canonical_reason().unwrap_or("").to_string();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if status.is_success() {
            let body = response
                .text()
                .map_err(|e| TransportError::Io(e.to_string()))?;
            let payload = serde_json::from_str(&body).map_err(|e| {
                TransportError::Unexpected(format!("undecodable response from {path}: {e}"))
            })?;
            return Ok(Reply::success(status.as_u16(), payload));
        }

        let error_body = response.text().ok();
        let mut reply = Reply::failure(status.as_u16(), message, error_body);
        if let Some(value) = retry_after {
            reply = reply.with_retry_after(value);
        }
        Ok(reply)
    }
}

impl CatalogTransport for TmdbTransport {
    fn show_detail(
        &self,
        tmdb_id: i32,
        language: &str,
    ) -> Result<Reply<ShowDetail>, TransportError> {
        self.get(
            &format!("/tv/{tmdb_id}"),
            &[
                ("language", language),
                ("append_to_response", "external_ids"),
            ],
        )
    }

    fn find_by_external_id(
        &self,
        external_id: &str,
        kind: ExternalIdKind,
        language: &str,
    ) -> Result<Reply<FindResults>, TransportError> {
        self.get(
            &format!("/find/{external_id}"),
            &[
                ("external_source", kind.as_query_value()),
                ("language", language),
            ],
        )
    }

    fn season_detail(
        &self,
        show_id: i32,
        season_number: i32,
        language: &str,
    ) -> Result<Reply<SeasonDetail>, TransportError> {
        self.get(
            &format!("/tv/{show_id}/season/{season_number}"),
            &[("language", language)],
        )
    }

    fn search_shows(
        &self,
        query: &str,
        language: &str,
    ) -> Result<Reply<SearchResults>, TransportError> {
        self.get(
            "/search/tv",
            &[
                ("query", query),
                ("language", language),
                ("include_adult", "false"),
            ],
        )
    }
}
