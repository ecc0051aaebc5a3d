//! Episode expansion for a resolved show.
//!
//! A show record only declares its seasons; the episode detail lives behind
//! one further lookup per season. Seasons are fetched sequentially — every
//! request funnels through the same shared throttle, so parallel fetches
//! would only add contention without saving wall-clock time.

use tracing::warn;

use crate::dispatch::Dispatcher;

use super::transport::CatalogTransport;
use super::wire;
use super::{Episode, SeasonSummary};

/// Fetches full episode detail for every declared season of a show.
///
/// Seasons are visited in declared order and their episodes concatenated,
/// which yields the season-then-episode ordering without a sort (the service
/// declares seasons ascending and returns episodes ordered within each
/// season). A failed season is logged and skipped; the remaining seasons are
/// still fetched. Zero declared seasons means zero network calls.
pub(crate) fn fetch_episodes<T: CatalogTransport>(
    transport: &T,
    dispatcher: &Dispatcher,
    show_id: i32,
    seasons: &[SeasonSummary],
    language: &str,
) -> Vec<Episode> {
    let declared: usize = seasons
        .iter()
        .map(|season| season.episode_count.max(0) as usize)
        .sum();
    let mut episodes = Vec::with_capacity(declared);

    for season in seasons {
        let reply =
            dispatcher.execute(|| transport.season_detail(show_id, season.season_number, language));

        match reply {
            Ok(reply) => {
                if let Some(detail) = reply.into_payload("season detail") {
                    episodes.extend(wire::episodes_from_season(detail));
                }
            }
            Err(err) => {
                warn!(
                    show_id,
                    season_number = season.season_number,
                    error = %err,
                    "season fetch failed, skipping"
                );
            }
        }
    }

    episodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::transport::ExternalIdKind;
    use crate::catalog::wire::{FindResults, SearchResults, SeasonDetail, ShowDetail};
    use crate::dispatch::TransportError;
    use crate::response::Reply;
    use crate::throttle::RequestThrottle;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Transport that serves canned season replies and records calls.
    struct SeasonScript {
        calls: Mutex<Vec<i32>>,
        failing_season: Option<i32>,
    }

    impl SeasonScript {
        fn new(failing_season: Option<i32>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failing_season,
            }
        }

        fn season_json(season_number: i32) -> SeasonDetail {
            let json = format!(
                r#"{{"season_number": {season_number}, "episodes": [
                    {{"id": {id1}, "season_number": {season_number}, "episode_number": 1, "name": "A"}},
                    {{"id": {id2}, "season_number": {season_number}, "episode_number": 2, "name": "B"}}
                ]}}"#,
                id1 = season_number * 100 + 1,
                id2 = season_number * 100 + 2,
            );
            serde_json::from_str(&json).unwrap()
        }
    }

    impl CatalogTransport for SeasonScript {
        fn show_detail(&self, _: i32, _: &str) -> Result<Reply<ShowDetail>, TransportError> {
            unreachable!("episode expansion never fetches show detail")
        }

        fn find_by_external_id(
            &self,
            _: &str,
            _: ExternalIdKind,
            _: &str,
        ) -> Result<Reply<FindResults>, TransportError> {
            unreachable!("episode expansion never issues find calls")
        }

        fn season_detail(
            &self,
            _show_id: i32,
            season_number: i32,
            _language: &str,
        ) -> Result<Reply<SeasonDetail>, TransportError> {
            self.calls.lock().unwrap().push(season_number);
            if self.failing_season == Some(season_number) {
                Ok(Reply::failure(500, "Internal Server Error", None))
            } else {
                Ok(Reply::success(200, Self::season_json(season_number)))
            }
        }

        fn search_shows(&self, _: &str, _: &str) -> Result<Reply<SearchResults>, TransportError> {
            unreachable!("episode expansion never searches")
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(RequestThrottle::new(Duration::from_millis(1))))
    }

    fn summaries(numbers: &[i32]) -> Vec<SeasonSummary> {
        numbers
            .iter()
            .map(|&season_number| SeasonSummary {
                season_number,
                episode_count: 2,
            })
            .collect()
    }

    #[test]
    fn test_zero_seasons_issues_no_calls() {
        let transport = SeasonScript::new(None);
        let episodes = fetch_episodes(&transport, &dispatcher(), 1, &[], "en");

        assert!(episodes.is_empty());
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_episodes_concatenate_in_declared_order() {
        let transport = SeasonScript::new(None);
        let episodes = fetch_episodes(&transport, &dispatcher(), 1, &summaries(&[1, 2]), "en");

        let order: Vec<(i32, i32)> = episodes
            .iter()
            .map(|e| (e.season_number, e.episode_number))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_failed_season_is_skipped_not_fatal() {
        let transport = SeasonScript::new(Some(2));
        let episodes = fetch_episodes(&transport, &dispatcher(), 1, &summaries(&[1, 2, 3]), "en");

        assert_eq!(*transport.calls.lock().unwrap(), vec![1, 2, 3]);
        let seasons_seen: Vec<i32> = episodes.iter().map(|e| e.season_number).collect();
        assert_eq!(seasons_seen, vec![1, 1, 3, 3]);
    }
}
