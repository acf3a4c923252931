//! Trending engine implementing the [`TrendingScorer`] trait.
//!
//! Scores are `f64`, computed from the record's age in fractional hours and
//! its star count. Ranking sorts by score descending with a stable sort.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use vibes_core::constants::{AGE_OFFSET_HOURS, GRAVITY, MILLIS_PER_HOUR, POPULARITY_FLOOR};
use vibes_core::error::TrendingError;
use vibes_core::traits::{Clock, Rankable, TrendingScorer};
use vibes_core::types::{ScoredItem, TrendingThresholds};

/// Tuning parameters for the decay curve.
///
/// Deserialization goes through [`TrendingParams::new`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "RawParams")]
pub struct TrendingParams {
    gravity: f64,
    age_offset_hours: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParams {
    gravity: f64,
    age_offset_hours: f64,
}

impl TryFrom<RawParams> for TrendingParams {
    type Error = TrendingError;

    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        Self::new(raw.gravity, raw.age_offset_hours)
    }
}

impl TrendingParams {
    /// Build validated parameters.
    ///
    /// Gravity and the age offset must both be finite and strictly positive,
    /// which keeps every score finite.
    pub fn new(gravity: f64, age_offset_hours: f64) -> Result<Self, TrendingError> {
        if !gravity.is_finite() || gravity <= 0.0 {
            return Err(TrendingError::InvalidGravity(gravity));
        }
        if !age_offset_hours.is_finite() || age_offset_hours <= 0.0 {
            return Err(TrendingError::InvalidAgeOffset(age_offset_hours));
        }
        Ok(Self {
            gravity,
            age_offset_hours,
        })
    }

    /// Default offset with a custom gravity.
    pub fn with_gravity(gravity: f64) -> Result<Self, TrendingError> {
        Self::new(gravity, AGE_OFFSET_HOURS)
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn age_offset_hours(&self) -> f64 {
        self.age_offset_hours
    }

    /// Time penalty for a record of the given age: `(age + offset)^gravity`.
    pub fn decay(&self, age_hours: f64) -> f64 {
        (age_hours + self.age_offset_hours).powf(self.gravity)
    }
}

impl Default for TrendingParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            age_offset_hours: AGE_OFFSET_HOURS,
        }
    }
}

/// The production trending calculator.
///
/// Stateless apart from its parameters; cheap to copy and safe to share
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrendingEngine {
    params: TrendingParams,
}

impl TrendingEngine {
    /// Engine with the default gravity and offset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: TrendingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TrendingParams {
        &self.params
    }
}

/// Age in fractional hours, clamped at zero.
///
/// A `created_at` after `now` (clock skew between writers and the ranking
/// host) is silently treated as age zero rather than rejected.
pub fn age_in_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - created_at).num_milliseconds();
    if millis < 0 {
        trace!(%created_at, %now, "created_at is in the future, clamping age to zero");
        return 0.0;
    }
    millis as f64 / MILLIS_PER_HOUR
}

impl TrendingScorer for TrendingEngine {
    fn age_in_hours(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        age_in_hours(created_at, now)
    }

    fn score<T: Rankable>(&self, item: &T, now: DateTime<Utc>) -> f64 {
        let age = age_in_hours(item.created_at(), now);
        let effective = item.popularity_count().max(POPULARITY_FLOOR);
        (effective - POPULARITY_FLOOR) as f64 / self.params.decay(age)
    }

    fn rank<T, I>(&self, items: I, now: DateTime<Utc>) -> Vec<ScoredItem<T>>
    where
        T: Rankable,
        I: IntoIterator<Item = T>,
    {
        let mut scored: Vec<ScoredItem<T>> = items
            .into_iter()
            .map(|item| {
                let score = self.score(&item, now);
                ScoredItem::new(item, score)
            })
            .collect();

        // `sort_by_key` is stable: equal scores keep their input order.
        scored.sort_by_key(|s| Reverse(OrderedFloat(s.trending_score)));

        debug!(count = scored.len(), "ranked trending batch");
        scored
    }

    fn filter_candidates<T, I>(
        &self,
        items: I,
        thresholds: &TrendingThresholds,
        now: DateTime<Utc>,
    ) -> Vec<ScoredItem<T>>
    where
        T: Rankable,
        I: IntoIterator<Item = T>,
    {
        let retained = items.into_iter().filter(|item| {
            item.popularity_count() >= thresholds.min_popularity()
                && age_in_hours(item.created_at(), now) <= thresholds.max_age_hours()
        });
        self.rank(retained, now)
    }
}

/// Score a record with the default engine.
pub fn score<T: Rankable>(item: &T, now: DateTime<Utc>) -> f64 {
    TrendingEngine::new().score(item, now)
}

/// Rank records with the default engine.
pub fn rank<T, I>(items: I, now: DateTime<Utc>) -> Vec<ScoredItem<T>>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    TrendingEngine::new().rank(items, now)
}

/// Threshold then rank records with the default engine.
pub fn filter_candidates<T, I>(
    items: I,
    thresholds: &TrendingThresholds,
    now: DateTime<Utc>,
) -> Vec<ScoredItem<T>>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    TrendingEngine::new().filter_candidates(items, thresholds, now)
}

/// [`rank`] with `now` read from `clock`.
pub fn rank_now<T, I, C>(items: I, clock: &C) -> Vec<ScoredItem<T>>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
    C: Clock + ?Sized,
{
    rank(items, clock.now())
}

/// [`filter_candidates`] with `now` read from `clock`.
pub fn filter_candidates_now<T, I, C>(
    items: I,
    thresholds: &TrendingThresholds,
    clock: &C,
) -> Vec<ScoredItem<T>>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
    C: Clock + ?Sized,
{
    filter_candidates(items, thresholds, clock.now())
}
