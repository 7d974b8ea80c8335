//! Per-meeting load calculator.
//!
//! ```text
//! mental_raw = (duration / 60) × (0.35·complexity + 0.25·role + 0.25·emotional + 0.15·social)
//! mental     = clamp(mental_raw × type_scalar)
//! total      = clamp(mental + context_switch)
//! recovery   = total × 20 × time_of_day_multiplier
//! cost       = total × 100
//! ```

use chrono::Timelike;

use super::clamp::{clamp_score, round3};
use super::context_switch::{context_switch, ContextSwitch};
use super::types::Explanation;
use crate::meeting::ClassifiedMeeting;
use crate::weights::{GapBucket, SocialBucket, TimeOfDay, WeightTable};

/// Meetings shorter than this (including malformed intervals) are scored as
/// this long.
pub const MIN_DURATION_MINUTES: f64 = 15.0;

pub const COMPLEXITY_WEIGHT: f64 = 0.35;
pub const ROLE_WEIGHT: f64 = 0.25;
pub const EMOTIONAL_WEIGHT: f64 = 0.25;
pub const SOCIAL_WEIGHT: f64 = 0.15;

/// Recovery minutes per unit of total load, before the time-of-day multiplier.
pub const RECOVERY_BASE_MINUTES: f64 = 20.0;

/// Capacity points per unit of total load.
pub const CAPACITY_SCALE: f64 = 100.0;

/// Everything the calculator derives for one meeting, short of the running
/// capacity balance.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingScore {
    pub duration_minutes: f64,
    pub mental_load: f64,
    pub context_switch_cost: f64,
    pub total_load: f64,
    pub recovery_minutes: f64,
    pub time_of_day: TimeOfDay,
    pub social_load: f64,
    pub capacity_cost: f64,
    pub explanation: Explanation,
}

/// Score `meeting` given the meeting that came right before it.
pub fn score_meeting(
    weights: &WeightTable,
    meeting: &ClassifiedMeeting,
    previous: Option<&ClassifiedMeeting>,
) -> MeetingScore {
    let switch = context_switch(weights, meeting, previous);
    score_with_switch(weights, meeting, switch)
}

pub(crate) fn score_with_switch(
    weights: &WeightTable,
    meeting: &ClassifiedMeeting,
    switch: ContextSwitch,
) -> MeetingScore {
    let classification = &meeting.classification;
    let duration_minutes = meeting.recorded_minutes().max(MIN_DURATION_MINUTES);

    let complexity = weights.complexity(&classification.meeting_type);
    let meeting_type_scalar = weights.type_scalar(&classification.meeting_type);
    let role_load = weights.role_load(&classification.role);
    let emotional_load = weights.emotional_load(&classification.emotional_intensity);
    let social_load = weights.social_load(SocialBucket::from_attendees(meeting.attendee_count));

    let blend = COMPLEXITY_WEIGHT * complexity
        + ROLE_WEIGHT * role_load
        + EMOTIONAL_WEIGHT * emotional_load
        + SOCIAL_WEIGHT * social_load;
    let mental_raw = (duration_minutes / 60.0) * blend;
    let mental_load = clamp_score(mental_raw * meeting_type_scalar);

    let total_load = clamp_score(mental_load + switch.cost);

    let time_of_day = TimeOfDay::from_hour(meeting.start.hour());
    let time_of_day_multiplier = weights.time_of_day_multiplier(time_of_day);
    let recovery_minutes = round3(total_load * RECOVERY_BASE_MINUTES * time_of_day_multiplier);
    let capacity_cost = round3(total_load * CAPACITY_SCALE);

    tracing::debug!(
        meeting_id = %meeting.id,
        duration_minutes,
        mental_load,
        context_switch_cost = switch.cost,
        total_load,
        "scored meeting"
    );

    MeetingScore {
        duration_minutes: round3(duration_minutes),
        mental_load,
        context_switch_cost: switch.cost,
        total_load,
        recovery_minutes,
        time_of_day,
        social_load,
        capacity_cost,
        explanation: Explanation {
            complexity,
            role_load,
            emotional_load,
            social_load,
            meeting_type_scalar,
            context_switch_cost: switch.cost,
            topic_change: switch.topic_change,
            gap_minutes: switch.gap_minutes,
            gap_bucket: switch.gap_minutes.map(GapBucket::from_minutes),
            gap_dampener: switch.gap_dampener,
            time_of_day_multiplier,
            topic_tags: classification.topic_tags.clone(),
        },
    }
}
