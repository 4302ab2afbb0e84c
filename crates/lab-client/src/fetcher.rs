// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use crate::{
    feed::{Feed, ShareRow},
    source::ShareSource,
    state::FetchState,
    FetchError,
};

/// Fetches a share feed from an ordered list of candidates, falling back to
/// the substitute rows when all of them fail.
pub struct ShareFetcher {
    feed: Feed,
    sources: Vec<Arc<dyn ShareSource>>,
}

impl ShareFetcher {
    /// Create a fetcher trying `sources` in the given order
    pub fn new(feed: Feed, sources: Vec<Arc<dyn ShareSource>>) -> Self {
        Self { feed, sources }
    }

    /// The feed this fetcher serves
    pub fn feed(&self) -> Feed {
        self.feed
    }

    /// Names of the candidates in the order they are tried
    pub fn candidates(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Try candidates one after another and return the first success.
    pub async fn try_fetch(&self) -> Result<Vec<ShareRow>, FetchError> {
        let mut errors = Vec::new();

        for source in &self.sources {
            match source.fetch().await {
                Ok(rows) => {
                    tracing::debug!(
                        "Using {} for {} shares: {} rows",
                        source.name(),
                        self.feed,
                        rows.len()
                    );
                    return Ok(rows);
                }
                Err(e) => {
                    tracing::warn!("{} failed for {} shares: {}", source.name(), self.feed, e);
                    errors.push(format!("{}: {}", source.name(), e));
                }
            }
        }

        Err(FetchError::AllSourcesFailed { errors })
    }

    /// Fetch the feed. Never fails: when every candidate fails the state
    /// is degraded and carries the substitute rows.
    pub async fn fetch_shares(&self) -> FetchState {
        match self.try_fetch().await {
            Ok(rows) => FetchState::success(rows),
            Err(err) => {
                tracing::warn!("Showing substitute {} shares: {}", self.feed, err);
                FetchState::degraded(
                    self.feed.substitute_rows(),
                    format!("Failed to reach the backend: {err}"),
                )
            }
        }
    }

    /// Re-run the fetch into a caller-owned state.
    pub async fn refresh(&self, state: &mut FetchState) {
        state.begin();
        *state = self.fetch_shares().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FetchStatus;
    use lab_analytics::Percentage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    struct MockSource {
        name: &'static str,
        result: Result<Vec<ShareRow>, &'static str>,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn ok(name: &'static str, rows: Vec<ShareRow>) -> Arc<Self> {
            Arc::new(Self { name, result: Ok(rows), calls: AtomicUsize::new(0) })
        }

        fn failing(name: &'static str, reason: &'static str) -> Arc<Self> {
            Arc::new(Self { name, result: Err(reason), calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ShareSource for MockSource {
        fn name(&self) -> String {
            self.name.to_string()
        }

        async fn fetch(&self) -> Result<Vec<ShareRow>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map_err(|e| FetchError::Shape(e.to_string()))
        }
    }

    fn row(label: &str, count: f64) -> ShareRow {
        ShareRow { label: label.into(), count, percentage: Some(Percentage::Number(50.0)) }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = MockSource::failing("primary", "connection refused");
        let second = MockSource::failing("simple", "not a list");
        let third = MockSource::ok("third", vec![row("A", 1.0), row("B", 1.0)]);
        let fourth = MockSource::ok("fourth", vec![row("C", 9.0)]);

        let fetcher = ShareFetcher::new(
            Feed::Requester,
            vec![first.clone(), second.clone(), third.clone(), fourth.clone()],
        );
        let state = fetcher.fetch_shares().await;

        assert_eq!(state.status, FetchStatus::Success);
        assert_eq!(state.rows, vec![row("A", 1.0), row("B", 1.0)]);
        assert!(state.error.is_none());
        assert_eq!((first.calls(), second.calls(), third.calls()), (1, 1, 1));
        assert_eq!(fourth.calls(), 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_exhaustion_degrades_to_substitute() {
        let fetcher = ShareFetcher::new(
            Feed::Client,
            vec![MockSource::failing("a", "down"), MockSource::failing("b", "down")],
        );
        let state = fetcher.fetch_shares().await;

        assert_eq!(state.status, FetchStatus::Degraded);
        assert_eq!(state.rows, Feed::Client.substitute_rows());
        let error = state.error.unwrap();
        assert!(error.starts_with("Failed to reach the backend"));
        assert!(error.contains("a: Unexpected response format: down"));
        assert!(logs_contain("Showing substitute client shares"));
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let fetcher = ShareFetcher::new(Feed::Requester, vec![]);

        let err = fetcher.try_fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::AllSourcesFailed { ref errors } if errors.is_empty()));
        assert_eq!(fetcher.fetch_shares().await.rows, Feed::Requester.substitute_rows());
    }

    #[tokio::test]
    async fn test_empty_live_result_is_success() {
        let fetcher = ShareFetcher::new(Feed::Requester, vec![MockSource::ok("live", vec![])]);
        let state = fetcher.fetch_shares().await;

        assert_eq!(state.status, FetchStatus::Success);
        assert!(state.rows.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let source = MockSource::ok("live", vec![row("A", 2.0)]);
        let fetcher = ShareFetcher::new(Feed::Requester, vec![source.clone()]);

        let mut state = FetchState::default();
        fetcher.refresh(&mut state).await;
        let first = state.clone();
        fetcher.refresh(&mut state).await;

        assert_eq!(first, state);
        assert_eq!(source.calls(), 2);

        let failing = ShareFetcher::new(Feed::Requester, vec![MockSource::failing("x", "down")]);
        assert_eq!(failing.fetch_shares().await, failing.fetch_shares().await);
    }
}
