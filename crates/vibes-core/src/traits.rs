//! Trait interfaces for the ForTheVibes feed.
//!
//! - [`Rankable`]: anything with a creation time and a popularity count
//! - [`Clock`]: source of "now" for ranking calls
//! - [`TrendingScorer`]: trending math engine (vibes-trending implements)

use chrono::{DateTime, Utc};

use crate::types::{ScoredItem, TrendingThresholds};

/// A record the trending ranker can score.
pub trait Rankable {
    /// When the record was created. Immutable once set.
    fn created_at(&self) -> DateTime<Utc>;

    /// Endorsement count (stars) at query time.
    fn popularity_count(&self) -> u64;
}

impl<T: Rankable + ?Sized> Rankable for &T {
    fn created_at(&self) -> DateTime<Utc> {
        (**self).created_at()
    }

    fn popularity_count(&self) -> u64 {
        (**self).popularity_count()
    }
}

/// Source of the current instant.
///
/// Ranking functions take `now` explicitly; a `Clock` supplies it at the
/// call sites that want wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Pure computation of trending scores and orderings.
///
/// None of these operations fail. A `created_at` later than `now` is treated
/// as age zero.
pub trait TrendingScorer: Send + Sync {
    /// Age of a record in hours relative to `now`, never negative.
    fn age_in_hours(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64;

    /// Trending score of a single record. Non-negative; zero for records at
    /// or below the popularity floor.
    fn score<T: Rankable>(&self, item: &T, now: DateTime<Utc>) -> f64;

    /// Score every record and sort descending by score.
    ///
    /// The sort is stable: records with equal scores keep their input order.
    fn rank<T, I>(&self, items: I, now: DateTime<Utc>) -> Vec<ScoredItem<T>>
    where
        T: Rankable,
        I: IntoIterator<Item = T>;

    /// Keep records meeting both thresholds, then [`rank`](Self::rank) them.
    fn filter_candidates<T, I>(
        &self,
        items: I,
        thresholds: &TrendingThresholds,
        now: DateTime<Utc>,
    ) -> Vec<ScoredItem<T>>
    where
        T: Rankable,
        I: IntoIterator<Item = T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankableItem;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_is_frozen() {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock(t);
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }

    #[test]
    fn references_are_rankable() {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let item = RankableItem::new("p", t, 4);
        let by_ref: &RankableItem = &item;
        assert_eq!(Rankable::created_at(&by_ref), t);
        assert_eq!(Rankable::popularity_count(&by_ref), 4);
    }
}
