//! Error types for the ForTheVibes feed.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendingError {
    #[error("invalid gravity: {0} (must be finite and > 0)")] InvalidGravity(f64),
    #[error("invalid age offset: {0} hours (must be finite and > 0)")] InvalidAgeOffset(f64),
    #[error("invalid max age: {0} hours")] InvalidMaxAge(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VibeError {
    #[error("unknown vibe type: {0}")] UnknownType(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("unknown sort mode: {0}")] UnknownSortMode(String),
    #[error("page must be >= 1, got {0}")] InvalidPage(u32),
    #[error("limit must be >= 1, got {0}")] InvalidLimit(u32),
}

#[derive(Error, Debug)]
pub enum VibesError {
    #[error(transparent)] Trending(#[from] TrendingError),
    #[error(transparent)] Vibe(#[from] VibeError),
    #[error(transparent)] Feed(#[from] FeedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_error_messages() {
        assert_eq!(
            FeedError::UnknownSortMode("hot".into()).to_string(),
            "unknown sort mode: hot"
        );
        assert_eq!(FeedError::InvalidPage(0).to_string(), "page must be >= 1, got 0");
    }

    #[test]
    fn umbrella_is_transparent() {
        let err: VibesError = VibeError::UnknownType("meh".into()).into();
        assert_eq!(err.to_string(), "unknown vibe type: meh");
    }

    #[test]
    fn umbrella_wraps_each_concern() {
        let trending: VibesError = TrendingError::InvalidGravity(0.0).into();
        assert!(matches!(trending, VibesError::Trending(TrendingError::InvalidGravity(_))));

        let feed: VibesError = FeedError::InvalidLimit(0).into();
        assert_eq!(feed.to_string(), "limit must be >= 1, got 0");
    }
}
