//! Bucket functions mapping continuous quantities onto weight-table labels.
//!
//! Every bucket includes its upper bound: a 5-minute gap is `Within5`, a
//! 15-minute gap is `Within15`, and so on.

use serde::{Deserialize, Serialize};

/// Attendee-count bucket driving the social load weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialBucket {
    Pair,  // <= 2
    Small, // <= 5
    Team,  // <= 10
    Large, // <= 20
    Crowd,
}

impl SocialBucket {
    pub const ALL: [SocialBucket; 5] = [
        Self::Pair,
        Self::Small,
        Self::Team,
        Self::Large,
        Self::Crowd,
    ];

    pub fn from_attendees(count: u32) -> Self {
        match count {
            0..=2 => Self::Pair,
            3..=5 => Self::Small,
            6..=10 => Self::Team,
            11..=20 => Self::Large,
            _ => Self::Crowd,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pair => "pair",
            Self::Small => "small",
            Self::Team => "team",
            Self::Large => "large",
            Self::Crowd => "crowd",
        }
    }
}

/// Idle-gap bucket driving the context-switch dampener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapBucket {
    Within5,
    Within15,
    Within30,
    Beyond30,
}

impl GapBucket {
    pub const ALL: [GapBucket; 4] = [Self::Within5, Self::Within15, Self::Within30, Self::Beyond30];

    /// Negative gaps (overlapping meetings) land in the first bucket.
    pub fn from_minutes(minutes: f64) -> Self {
        if minutes <= 5.0 {
            Self::Within5
        } else if minutes <= 15.0 {
            Self::Within15
        } else if minutes <= 30.0 {
            Self::Within30
        } else {
            Self::Beyond30
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Within5 => "within_5",
            Self::Within15 => "within_15",
            Self::Within30 => "within_30",
            Self::Beyond30 => "beyond_30",
        }
    }
}

/// Part of the day a meeting starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [Self::Morning, Self::Midday, Self::Afternoon, Self::Evening];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=14 => Self::Midday,
            15..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

/// How far apart two consecutive meetings are topically.
///
/// The context-switch model only ever produces `RelatedDomain` (some tag
/// overlap) or `Unrelated` (none). `SameProject` is kept in the table for
/// callers that inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicChange {
    SameProject,
    RelatedDomain,
    Unrelated,
}

impl TopicChange {
    pub const ALL: [TopicChange; 3] = [Self::SameProject, Self::RelatedDomain, Self::Unrelated];

    pub fn from_overlap(overlap: bool) -> Self {
        if overlap {
            Self::RelatedDomain
        } else {
            Self::Unrelated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameProject => "same_project",
            Self::RelatedDomain => "related_domain",
            Self::Unrelated => "unrelated",
        }
    }
}
