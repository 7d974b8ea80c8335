//! # cogload Core Library
//!
//! This library scores the cognitive load of a day's meetings. It follows a
//! CLI-first philosophy: every operation is available through the standalone
//! `cogload-cli` binary, and any dashboard or HTTP layer is a thin wrapper
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Meetings**: wire records, parsed meetings and classification labels
//! - **Weights**: the read-only weight table and bucket functions
//! - **Load**: the deterministic scoring pipeline (per-meeting load,
//!   context switches, capacity fold, daily summary)
//! - **Classify**: the seam to an external classifier, with bounded
//!   concurrent gathering
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`LoadPipeline`]: Scores a chronologically ordered day of meetings
//! - [`WeightTable`]: Label-to-weight lookups with graceful defaults
//! - [`Config`]: Application configuration management
//! - [`Classifier`]: Trait for external meeting classifiers

pub mod classify;
pub mod error;
pub mod load;
pub mod meeting;
pub mod storage;
pub mod weights;

pub use classify::{classify_all, Classifier};
pub use error::{ClassifyError, ConfigError, CoreError, Result, ValidationError};
pub use load::{DailySummary, DayLoad, EnrichedMeeting, Explanation, LoadPipeline};
pub use meeting::{
    CalendarEvent, Classification, ClassifiedMeeting, EmotionalIntensity, MeetingRecord,
    MeetingType, Role, TopicTags,
};
pub use storage::Config;
pub use weights::{WeightCategory, WeightTable};
