//! Deterministic meeting-load scoring.
//!
//! Meetings flow strictly left to right:
//!
//! 1. **Calculator**: duration floor, weight lookups, mental load, recovery
//! 2. **Context switch**: topic overlap and idle gap against the previous
//!    meeting only
//! 3. **Capacity fold**: running balance starting at 100, never increasing
//! 4. **Summary**: mean load, remaining capacity, high-risk flag
//!
//! Everything here is pure and synchronous.

mod calculator;
mod capacity;
mod clamp;
mod context_switch;
mod pipeline;
mod summary;
mod types;

pub use calculator::{
    score_meeting, MeetingScore, CAPACITY_SCALE, COMPLEXITY_WEIGHT, EMOTIONAL_WEIGHT,
    MIN_DURATION_MINUTES, RECOVERY_BASE_MINUTES, ROLE_WEIGHT, SOCIAL_WEIGHT,
};
pub use capacity::{fold_capacity, CapacityFold, DAILY_CAPACITY};
pub use clamp::{clamp_score, round3};
pub use context_switch::{context_switch, ContextSwitch};
pub use pipeline::LoadPipeline;
pub use summary::{summarize, HIGH_RISK_THRESHOLD};
pub use types::{DailySummary, DayLoad, EnrichedMeeting, Explanation, LoadTerm};
