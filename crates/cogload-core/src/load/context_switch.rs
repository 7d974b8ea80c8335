//! Context-switch cost between consecutive meetings.
//!
//! The model is binary on topics: any shared tag counts as a related switch,
//! no shared tag as an unrelated one. The cost is then damped by the idle
//! gap since the previous meeting ended.

use serde::{Deserialize, Serialize};

use super::clamp::{clamp_score, round3};
use crate::meeting::ClassifiedMeeting;
use crate::weights::{GapBucket, TopicChange, WeightTable};

/// Context-switch cost and the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSwitch {
    /// Clamped cost in `[0, 1]`
    pub cost: f64,
    /// `None` for the first meeting of the day
    pub topic_change: Option<TopicChange>,
    /// Idle minutes since the previous meeting ended, floored at 0
    pub gap_minutes: Option<f64>,
    pub gap_dampener: Option<f64>,
}

impl ContextSwitch {
    /// No predecessor, no cost.
    pub fn none() -> Self {
        Self {
            cost: 0.0,
            topic_change: None,
            gap_minutes: None,
            gap_dampener: None,
        }
    }
}

/// Cost of moving from `previous` into `current`.
pub fn context_switch(
    weights: &WeightTable,
    current: &ClassifiedMeeting,
    previous: Option<&ClassifiedMeeting>,
) -> ContextSwitch {
    let Some(previous) = previous else {
        return ContextSwitch::none();
    };

    let overlap = current
        .classification
        .topic_tags
        .overlaps(&previous.classification.topic_tags);
    let topic_change = TopicChange::from_overlap(overlap);
    let topic_cost = weights.topic_cost(topic_change);

    let gap_ms = (current.start - previous.end).num_milliseconds();
    let gap_minutes = (gap_ms as f64 / 60_000.0).max(0.0);
    let gap_dampener = weights.gap_dampener(GapBucket::from_minutes(gap_minutes));

    ContextSwitch {
        cost: clamp_score(topic_cost * gap_dampener),
        topic_change: Some(topic_change),
        gap_minutes: Some(round3(gap_minutes)),
        gap_dampener: Some(gap_dampener),
    }
}
