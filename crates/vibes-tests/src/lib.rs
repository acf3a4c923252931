//! Scenario test suite for the ForTheVibes trending ranker.
//!
//! Exercises the ranker and feed selection across crates, with both the
//! canonical `RankableItem` and a richer project record implementing
//! `Rankable`.

pub mod helpers;
