//! Meeting input types.
//!
//! Meetings arrive from the calendar provider as [`CalendarEvent`]s, get
//! labelled by the classification collaborator into [`MeetingRecord`]s and
//! are parsed into [`ClassifiedMeeting`]s before scoring.

mod classification;
mod record;

pub use classification::{Classification, EmotionalIntensity, MeetingType, Role, TopicTags};
pub use record::{CalendarEvent, ClassifiedMeeting, MeetingRecord};
