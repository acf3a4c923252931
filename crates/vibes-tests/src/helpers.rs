//! Shared fixtures for scenario tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use vibes_core::traits::Rankable;
use vibes_core::types::{ProjectId, RankableItem};
use vibes_core::vibe::{VibeTally, VibeType};

/// Fixed ranking instant used across scenarios.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// A candidate created `age_hours` before [`fixed_now`].
pub fn aged(id: &str, age_hours: i64, stars: u64) -> RankableItem {
    RankableItem::new(id, fixed_now() - Duration::hours(age_hours), stars)
}

/// A candidate created `minutes` before [`fixed_now`].
pub fn aged_minutes(id: &str, minutes: i64, stars: u64) -> RankableItem {
    RankableItem::new(id, fixed_now() - Duration::minutes(minutes), stars)
}

/// Ids of a ranked or paged sequence, in order.
pub fn ids_of<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProjectId>,
{
    ids.into_iter().map(|id| id.to_string()).collect()
}

/// A showcase card as the listing renders it: more than the ranker needs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: ProjectId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub star_count: u64,
    pub vibes: Vec<VibeType>,
}

impl ProjectCard {
    pub fn new(id: &str, title: &str, age_hours: i64, star_count: u64) -> Self {
        Self {
            id: ProjectId::new(id),
            title: title.to_string(),
            created_at: fixed_now() - Duration::hours(age_hours),
            star_count,
            vibes: Vec::new(),
        }
    }

    pub fn with_vibes(mut self, vibes: &[VibeType]) -> Self {
        self.vibes.extend_from_slice(vibes);
        self
    }

    pub fn tally(&self) -> VibeTally {
        self.vibes.iter().copied().collect()
    }
}

impl Rankable for ProjectCard {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn popularity_count(&self) -> u64 {
        self.star_count
    }
}

/// The seeded demo showcase, ages relative to [`fixed_now`].
pub fn demo_showcase() -> Vec<ProjectCard> {
    vec![
        ProjectCard::new("aurora", "Aurora AI Assistant", 3, 24)
            .with_vibes(&[VibeType::Fire, VibeType::Fire, VibeType::Rocket]),
        ProjectCard::new("bento", "Bento Design System", 30, 60)
            .with_vibes(&[VibeType::Sparkle]),
        ProjectCard::new("codevibe", "CodeVibe Live", 1, 2)
            .with_vibes(&[VibeType::MindBlown, VibeType::Inspired]),
        ProjectCard::new("vibrant", "Vibrant Portfolio Builder", 200, 300),
        ProjectCard::new("fresh", "Fresh Launch", 0, 0),
    ]
}
