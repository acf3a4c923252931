//! # vibes-core
//! Foundation types and traits for the ForTheVibes project feed.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod vibe;
