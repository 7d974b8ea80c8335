//! Pipeline output types.

use serde::{Deserialize, Serialize};

use crate::meeting::{ClassifiedMeeting, TopicTags};
use crate::weights::{GapBucket, TimeOfDay, TopicChange};

use super::calculator::{COMPLEXITY_WEIGHT, EMOTIONAL_WEIGHT, ROLE_WEIGHT, SOCIAL_WEIGHT};

/// One weighted term of the mental-load blend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadTerm {
    pub name: &'static str,
    /// Fixed blend weight
    pub weight: f64,
    /// Label weight from the table
    pub score: f64,
    pub contribution: f64,
}

/// Every intermediate value that went into a meeting's scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub complexity: f64,
    pub role_load: f64,
    pub emotional_load: f64,
    pub social_load: f64,
    pub meeting_type_scalar: f64,
    pub context_switch_cost: f64,
    pub topic_change: Option<TopicChange>,
    pub gap_minutes: Option<f64>,
    pub gap_bucket: Option<GapBucket>,
    pub gap_dampener: Option<f64>,
    pub time_of_day_multiplier: f64,
    pub topic_tags: TopicTags,
}

impl Explanation {
    /// The four mental-load terms, largest contribution first.
    pub fn contributions(&self) -> Vec<LoadTerm> {
        let mut terms = vec![
            term("complexity", COMPLEXITY_WEIGHT, self.complexity),
            term("role", ROLE_WEIGHT, self.role_load),
            term("emotional", EMOTIONAL_WEIGHT, self.emotional_load),
            term("social", SOCIAL_WEIGHT, self.social_load),
        ];
        terms.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        terms
    }
}

fn term(name: &'static str, weight: f64, score: f64) -> LoadTerm {
    LoadTerm {
        name,
        weight,
        score,
        contribution: weight * score,
    }
}

/// A meeting with its computed load. Built once by the pipeline and never
/// modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMeeting {
    #[serde(flatten)]
    pub meeting: ClassifiedMeeting,
    /// Scored duration, never below 15
    pub duration_minutes: f64,
    pub mental_load: f64,
    pub context_switch_cost: f64,
    pub total_load: f64,
    pub recovery_minutes: f64,
    pub time_of_day: TimeOfDay,
    pub social_load: f64,
    pub capacity_cost: f64,
    /// Capacity left after this meeting
    pub capacity_remaining: f64,
    pub explanation: Explanation,
}

/// Day-level verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Mean total load, 0 for an empty day
    pub total_load: f64,
    pub capacity_remaining: f64,
    pub high_risk: bool,
}

/// Pipeline output for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLoad {
    pub events: Vec<EnrichedMeeting>,
    pub summary: DailySummary,
}

impl DayLoad {
    /// The meeting with the highest total load. Earliest wins ties.
    pub fn heaviest(&self) -> Option<&EnrichedMeeting> {
        self.events.iter().fold(None, |best, m| match best {
            Some(b) if b.total_load >= m.total_load => Some(b),
            _ => Some(m),
        })
    }

    pub fn total_recovery_minutes(&self) -> f64 {
        super::clamp::round3(self.events.iter().map(|m| m.recovery_minutes).sum())
    }
}
