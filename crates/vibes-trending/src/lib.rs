//! # vibes-trending — Time-decayed trending ranker.
//!
//! Scores a project by its star count, discounted by age:
//!
//! ```text
//! score = (max(stars, 1) - 1) / (age_hours + 2) ^ 1.8
//! ```
//!
//! - **Popularity floor**: projects with 0 or 1 star score exactly zero.
//! - **Decay**: the `+2` hour offset keeps brand-new projects finite; gravity
//!   controls how fast old projects sink.
//! - **Stable ranking**: ties keep their input order, so a recency-ordered
//!   batch stays recency-ordered among equal scores.
//! - **Feed pages**: recent / stars / trending orderings with pagination and
//!   the trending candidate window.
//!
//! Every function takes `now` explicitly. Future-dated records are clamped
//! to age zero.

pub mod engine;
pub mod feed;

pub use engine::{
    TrendingEngine, TrendingParams, age_in_hours, filter_candidates, filter_candidates_now, rank,
    rank_now, score,
};
pub use feed::{FeedPage, select_page, select_page_with};
