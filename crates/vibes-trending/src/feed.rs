//! Feed page selection over an in-memory candidate batch.
//!
//! Mirrors how the project listing pages its results:
//! - `recent`: newest first.
//! - `stars`: most starred first.
//! - `trending`: only the `candidate_window()` newest candidates are ranked,
//!   and pages are cut from that ranked window. Pages past it are empty.
//!
//! Every returned item carries its trending score regardless of sort mode.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use vibes_core::traits::{Rankable, TrendingScorer};
use vibes_core::types::{PageRequest, ScoredItem, SortMode};

use crate::engine::TrendingEngine;

/// One page of the project feed.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage<T> {
    pub items: Vec<ScoredItem<T>>,
    pub page: u32,
    pub limit: u32,
    pub sort: SortMode,
    /// Number of candidates handed in, before any windowing.
    pub total_candidates: usize,
    /// Whether the ordered sequence continues past this page.
    pub has_more: bool,
    /// Number of non-empty pages in the ordered sequence. For `trending`
    /// that sequence is the candidate window.
    pub total_pages: usize,
}

impl<T> FeedPage<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Select a page with the default engine.
pub fn select_page<T, I>(
    items: I,
    sort: SortMode,
    page: &PageRequest,
    now: DateTime<Utc>,
) -> FeedPage<T>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    select_page_with(&TrendingEngine::new(), items, sort, page, now)
}

/// Order `items` by `sort` and cut out the requested page.
///
/// Slicing past the end yields an empty page.
pub fn select_page_with<S, T, I>(
    scorer: &S,
    items: I,
    sort: SortMode,
    page: &PageRequest,
    now: DateTime<Utc>,
) -> FeedPage<T>
where
    S: TrendingScorer,
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    let mut candidates: Vec<T> = items.into_iter().collect();
    let total_candidates = candidates.len();

    let ordered = match sort {
        SortMode::Recent => {
            candidates.sort_by_key(|c| Reverse(c.created_at()));
            score_in_order(scorer, candidates, now)
        }
        SortMode::Stars => {
            candidates.sort_by_key(|c| Reverse(c.popularity_count()));
            score_in_order(scorer, candidates, now)
        }
        SortMode::Trending => {
            candidates.sort_by_key(|c| Reverse(c.created_at()));
            candidates.truncate(page.candidate_window());
            scorer.rank(candidates, now)
        }
    };

    let offset = page.offset();
    let limit = page.limit() as usize;
    let has_more = ordered.len() > offset.saturating_add(limit);
    let total_pages = ordered.len().div_ceil(limit);
    let items: Vec<ScoredItem<T>> = ordered.into_iter().skip(offset).take(limit).collect();

    debug!(
        %sort,
        page = page.page(),
        returned = items.len(),
        total_candidates,
        "selected feed page"
    );

    FeedPage {
        items,
        page: page.page(),
        limit: page.limit(),
        sort,
        total_candidates,
        has_more,
        total_pages,
    }
}

fn score_in_order<S, T>(scorer: &S, items: Vec<T>, now: DateTime<Utc>) -> Vec<ScoredItem<T>>
where
    S: TrendingScorer,
    T: Rankable,
{
    items
        .into_iter()
        .map(|item| {
            let score = scorer.score(&item, now);
            ScoredItem::new(item, score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use vibes_core::types::RankableItem;

    use crate::engine::TrendingParams;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(id: &str, age_hours: i64, stars: u64) -> RankableItem {
        RankableItem::new(id, now() - Duration::hours(age_hours), stars)
    }

    fn ids(page: &FeedPage<&RankableItem>) -> Vec<String> {
        page.items.iter().map(|s| s.item.id.to_string()).collect()
    }

    fn sample() -> Vec<RankableItem> {
        vec![
            item("mid-popular", 10, 40),
            item("newest-quiet", 0, 1),
            item("oldest-huge", 100, 500),
            item("new-warm", 2, 8),
        ]
    }

    #[test]
    fn recent_orders_newest_first() {
        let items = sample();
        let page = select_page(items.iter(), SortMode::Recent, &PageRequest::default(), now());
        assert_eq!(
            ids(&page),
            vec!["newest-quiet", "new-warm", "mid-popular", "oldest-huge"]
        );
        assert!(!page.has_more);
        assert_eq!(page.total_candidates, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn stars_orders_most_starred_first() {
        let items = sample();
        let page = select_page(items.iter(), SortMode::Stars, &PageRequest::default(), now());
        assert_eq!(
            ids(&page),
            vec!["oldest-huge", "mid-popular", "new-warm", "newest-quiet"]
        );
    }

    #[test]
    fn trending_orders_by_score() {
        let items = sample();
        let page = select_page(items.iter(), SortMode::Trending, &PageRequest::default(), now());
        // A fresh project with a handful of stars beats older, bigger ones.
        assert_eq!(
            ids(&page),
            vec!["new-warm", "mid-popular", "oldest-huge", "newest-quiet"]
        );
        for pair in page.items.windows(2) {
            assert!(pair[0].trending_score >= pair[1].trending_score);
        }
    }

    #[test]
    fn every_mode_attaches_scores() {
        let items = sample();
        for sort in SortMode::ALL {
            let page = select_page(items.iter(), sort, &PageRequest::default(), now());
            for scored in &page.items {
                assert_eq!(scored.trending_score, crate::engine::score(scored.item, now()));
            }
        }
    }

    #[test]
    fn pagination_slices_and_reports_more() {
        let items: Vec<RankableItem> = (0..5).map(|i| item(&format!("p{i}"), i, 0)).collect();
        let first = select_page(items.iter(), SortMode::Recent, &PageRequest::new(1, 2).unwrap(), now());
        assert_eq!(ids(&first), vec!["p0", "p1"]);
        assert!(first.has_more);

        let last = select_page(items.iter(), SortMode::Recent, &PageRequest::new(3, 2).unwrap(), now());
        assert_eq!(ids(&last), vec!["p4"]);
        assert!(!last.has_more);
        assert_eq!(last.total_pages, 3);
    }

    #[test]
    fn empty_batch_has_no_pages() {
        let page = select_page(Vec::<RankableItem>::new(), SortMode::Trending, &PageRequest::default(), now());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_more);
    }

    #[test]
    fn deserialized_request_pages_like_constructed_one() {
        let items = sample();
        let request: PageRequest = serde_json::from_str(r#"{"page":2,"limit":3}"#).unwrap();
        let page = select_page(items.iter(), SortMode::Recent, &request, now());
        assert_eq!(ids(&page), vec!["oldest-huge"]);
        assert!(serde_json::from_str::<PageRequest>(r#"{"page":0,"limit":12}"#).is_err());
    }

    #[test]
    fn page_past_end_is_empty() {
        let items = sample();
        let page = select_page(items.iter(), SortMode::Stars, &PageRequest::new(9, 12).unwrap(), now());
        assert!(page.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.page, 9);
    }

    #[test]
    fn trending_only_ranks_the_candidate_window() {
        // 60 recent quiet projects, then one very old but hugely starred one.
        let mut items: Vec<RankableItem> = (0..60).map(|i| item(&format!("q{i}"), i, 0)).collect();
        items.push(item("ancient-hit", 1000, 1_000_000));

        let page = select_page(items.iter(), SortMode::Trending, &PageRequest::new(1, 10).unwrap(), now());
        // limit 10 → window max(30, 50) = 50, so the old project never enters.
        assert!(page.items.iter().all(|s| s.item.id.as_str() != "ancient-hit"));
        // Everything in the window scores zero, so recency order is preserved.
        assert_eq!(page.items[0].item.id.as_str(), "q0");
        assert!(page.has_more);

        // 50 ranked candidates at 10 per page, however many were handed in.
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.total_candidates, 61);

        let beyond = select_page(items.iter(), SortMode::Trending, &PageRequest::new(6, 10).unwrap(), now());
        assert!(beyond.is_empty());
    }

    #[test]
    fn stars_ties_keep_input_order() {
        let items = vec![item("a", 5, 3), item("b", 1, 3), item("c", 9, 3)];
        let page = select_page(items.iter(), SortMode::Stars, &PageRequest::default(), now());
        assert_eq!(ids(&page), vec!["a", "b", "c"]);
    }

    #[test]
    fn custom_engine_is_used() {
        let items = sample();
        let steep = TrendingEngine::with_params(TrendingParams::with_gravity(3.0).unwrap());
        let page = select_page_with(&steep, items.iter(), SortMode::Trending, &PageRequest::default(), now());
        let default = select_page(items.iter(), SortMode::Trending, &PageRequest::default(), now());
        assert!(page.items[0].trending_score < default.items[0].trending_score);
    }

    #[test]
    fn feed_page_serializes_camel_case() {
        let items = sample();
        let page = select_page(items.iter(), SortMode::Recent, &PageRequest::new(1, 1).unwrap(), now());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["sort"], "recent");
        assert_eq!(json["totalCandidates"], 4);
        assert_eq!(json["hasMore"], true);
        assert_eq!(json["totalPages"], 4);
        assert_eq!(json["items"][0]["id"], "newest-quiet");
        assert!(json["items"][0]["trendingScore"].is_number());
    }
}
