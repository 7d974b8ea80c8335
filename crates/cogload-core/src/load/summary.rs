//! Day-level reduction of the enriched sequence.

use super::capacity::DAILY_CAPACITY;
use super::clamp::{clamp_score, round3};
use super::types::{DailySummary, EnrichedMeeting};

/// Remaining capacity below this flags the day as high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 20.0;

/// Reduce a day's meetings to a summary. An empty day has zero load and
/// full capacity.
pub fn summarize(events: &[EnrichedMeeting]) -> DailySummary {
    let load_sum: f64 = events.iter().map(|m| m.total_load).sum();
    let cost_sum: f64 = events.iter().map(|m| m.capacity_cost).sum();
    let capacity_remaining = round3((DAILY_CAPACITY - cost_sum).max(0.0));

    DailySummary {
        total_load: clamp_score(load_sum / events.len().max(1) as f64),
        capacity_remaining,
        high_risk: capacity_remaining < HIGH_RISK_THRESHOLD,
    }
}
