//! Ranking and feed constants.
//!
//! Timestamps are UTC. Ages are measured in fractional hours.

/// Decay exponent applied to the offset age of an item.
///
/// Higher values make older projects fall out of the trending feed faster.
pub const GRAVITY: f64 = 1.8;

/// Hours added to every age before decay is applied.
///
/// Keeps the decay denominator away from zero for projects created moments
/// ago, and softens the lead brand-new projects get over slightly older
/// popular ones.
pub const AGE_OFFSET_HOURS: f64 = 2.0;

/// Popularity floor applied before scoring.
///
/// An item at the floor (raw count 0 or 1) always scores exactly zero.
pub const POPULARITY_FLOOR: u64 = 1;

/// Default minimum popularity for the thresholded trending view.
pub const DEFAULT_MIN_POPULARITY: u64 = 1;

/// Default maximum age for the thresholded trending view (7 days).
pub const DEFAULT_MAX_AGE_HOURS: f64 = 7.0 * 24.0;

/// Milliseconds per hour, for converting `chrono::Duration` into hours.
pub const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

/// Default page number for feed queries (1-based).
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size for feed queries.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// The trending feed fetches `limit * CANDIDATE_WINDOW_MULTIPLIER` recent
/// projects before ranking them.
pub const CANDIDATE_WINDOW_MULTIPLIER: u32 = 3;

/// Lower bound on the trending candidate window.
pub const MIN_CANDIDATE_WINDOW: u32 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_age_is_one_week() {
        assert_eq!(DEFAULT_MAX_AGE_HOURS, 168.0);
    }

    #[test]
    fn gravity_is_positive() {
        assert!(GRAVITY > 0.0);
        assert!(AGE_OFFSET_HOURS > 0.0);
    }

    #[test]
    fn min_window_covers_default_page() {
        assert!(MIN_CANDIDATE_WINDOW >= DEFAULT_PAGE_LIMIT * CANDIDATE_WINDOW_MULTIPLIER);
    }
}
