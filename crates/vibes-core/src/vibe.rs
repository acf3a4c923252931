//! Vibes: the fixed set of typed reactions a user can leave on a project.
//!
//! A user holds at most one vibe of each type per project. Storage enforces
//! that; this module only names the types and aggregates counts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VibeError;

/// A typed reaction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum VibeType {
    Fire,
    Sparkle,
    Rocket,
    Inspired,
    MindBlown,
}

impl VibeType {
    /// Every vibe type, in display order.
    pub const ALL: [VibeType; 5] = [
        VibeType::Fire,
        VibeType::Sparkle,
        VibeType::Rocket,
        VibeType::Inspired,
        VibeType::MindBlown,
    ];

    /// Wire name, as stored and as accepted from clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Sparkle => "sparkle",
            Self::Rocket => "rocket",
            Self::Inspired => "inspired",
            Self::MindBlown => "mind-blown",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Sparkle => "Sparkle",
            Self::Rocket => "Rocket",
            Self::Inspired => "Inspired",
            Self::MindBlown => "Mind Blown",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for VibeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VibeType {
    type Err = VibeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| VibeError::UnknownType(s.to_string()))
    }
}

/// Per-type vibe counts for a single project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VibeTally {
    counts: [u64; VibeType::ALL.len()],
}

impl VibeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one vibe of the given type.
    pub fn record(&mut self, vibe: VibeType) {
        self.counts[vibe.index()] = self.counts[vibe.index()].saturating_add(1);
    }

    /// Remove one vibe of the given type. No-op at zero.
    pub fn retract(&mut self, vibe: VibeType) {
        self.counts[vibe.index()] = self.counts[vibe.index()].saturating_sub(1);
    }

    pub fn count(&self, vibe: VibeType) -> u64 {
        self.counts[vibe.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// The largest single-type count.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Count of `vibe` as a percentage of the largest count, in `[0, 100]`.
    ///
    /// Zero when no vibes have been recorded.
    pub fn share_of_max(&self, vibe: VibeType) -> f64 {
        let max = self.max_count();
        if max == 0 {
            return 0.0;
        }
        self.count(vibe) as f64 / max as f64 * 100.0
    }

    /// `(type, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (VibeType, u64)> + '_ {
        VibeType::ALL.into_iter().map(|v| (v, self.count(v)))
    }
}

impl FromIterator<VibeType> for VibeTally {
    fn from_iter<I: IntoIterator<Item = VibeType>>(iter: I) -> Self {
        let mut tally = Self::new();
        for vibe in iter {
            tally.record(vibe);
        }
        tally
    }
}

impl Serialize for VibeTally {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(VibeType::ALL.len()))?;
        for (vibe, count) in self.iter() {
            map.serialize_entry(vibe.as_str(), &count)?;
        }
        map.end()
    }
}
