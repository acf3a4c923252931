//! Core feed types: rankable records, scored records, feed queries.
//!
//! All timestamps are `DateTime<Utc>`. Popularity counts are `u64` snapshots
//! taken at query time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CANDIDATE_WINDOW_MULTIPLIER, DEFAULT_MAX_AGE_HOURS, DEFAULT_MIN_POPULARITY, DEFAULT_PAGE,
    DEFAULT_PAGE_LIMIT, MIN_CANDIDATE_WINDOW,
};
use crate::error::{FeedError, TrendingError};
use crate::traits::Rankable;

/// Opaque project identifier, unique per project.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A candidate record handed to the ranker.
///
/// `popularity_count` is the star count at query time. The ranker never
/// tracks history; each call sees a point-in-time snapshot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankableItem {
    pub id: ProjectId,
    pub created_at: DateTime<Utc>,
    pub popularity_count: u64,
}

impl RankableItem {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, popularity_count: u64) -> Self {
        Self {
            id: ProjectId::new(id),
            created_at,
            popularity_count,
        }
    }
}

impl Rankable for RankableItem {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn popularity_count(&self) -> u64 {
        self.popularity_count
    }
}

/// A record with its computed trending score attached.
///
/// Produced per ranking call and never persisted. Serializes as the
/// flattened record plus a `trendingScore` field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem<T> {
    #[serde(flatten)]
    pub item: T,
    pub trending_score: f64,
}

impl<T> ScoredItem<T> {
    pub fn new(item: T, trending_score: f64) -> Self {
        Self {
            item,
            trending_score,
        }
    }

    /// Drop the score and return the underlying record.
    pub fn into_inner(self) -> T {
        self.item
    }
}

/// Thresholds for the "trending with thresholds" view.
///
/// Deserialization goes through [`TrendingThresholds::new`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "RawThresholds")]
pub struct TrendingThresholds {
    min_popularity: u64,
    max_age_hours: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawThresholds {
    min_popularity: u64,
    max_age_hours: f64,
}

impl TryFrom<RawThresholds> for TrendingThresholds {
    type Error = TrendingError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.min_popularity, raw.max_age_hours)
    }
}

impl TrendingThresholds {
    pub fn new(min_popularity: u64, max_age_hours: f64) -> Result<Self, TrendingError> {
        if max_age_hours.is_nan() || max_age_hours < 0.0 {
            return Err(TrendingError::InvalidMaxAge(max_age_hours));
        }
        Ok(Self {
            min_popularity,
            max_age_hours,
        })
    }

    /// Items with fewer stars than this are dropped.
    pub fn min_popularity(&self) -> u64 {
        self.min_popularity
    }

    /// Items older than this many hours are dropped.
    pub fn max_age_hours(&self) -> f64 {
        self.max_age_hours
    }
}

impl Default for TrendingThresholds {
    fn default() -> Self {
        Self {
            min_popularity: DEFAULT_MIN_POPULARITY,
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
        }
    }
}

/// Ordering applied to the project feed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first.
    #[default]
    Recent,
    /// Most stars first.
    Stars,
    /// Highest trending score first, over a window of recent candidates.
    Trending,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Recent, SortMode::Stars, SortMode::Trending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Stars => "stars",
            Self::Trending => "trending",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| FeedError::UnknownSortMode(s.to_string()))
    }
}

/// A 1-based page request over the feed.
///
/// Deserialization goes through [`PageRequest::new`], so `page` and `limit`
/// are always at least 1.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = FeedError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.limit)
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, FeedError> {
        if page == 0 {
            return Err(FeedError::InvalidPage(page));
        }
        if limit == 0 {
            return Err(FeedError::InvalidLimit(limit));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> usize {
        (self.page as usize).saturating_sub(1) * self.limit as usize
    }

    /// How many recent candidates the trending feed ranks before slicing.
    ///
    /// `max(limit * 3, 50)`.
    pub fn candidate_window(&self) -> usize {
        let scaled = self.limit as usize * CANDIDATE_WINDOW_MULTIPLIER as usize;
        scaled.max(MIN_CANDIDATE_WINDOW as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
