//! Wire-level meeting records and their parsed form.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::classification::Classification;
use crate::error::ValidationError;

/// A calendar event as retrieved from the provider, before classification.
///
/// Timestamps stay as the provider's ISO-8601 strings until the meeting is
/// parsed into a [`ClassifiedMeeting`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: String,
    pub end: String,
    pub attendee_count: u32,
}

/// A calendar event together with its classification, as handed to the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    #[serde(flatten)]
    pub event: CalendarEvent,
    pub classification: Classification,
}

impl MeetingRecord {
    pub fn new(event: CalendarEvent, classification: Classification) -> Self {
        Self {
            event,
            classification,
        }
    }
}

/// A classified meeting with parsed, timezone-aware instants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedMeeting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub attendee_count: u32,
    pub classification: Classification,
}

impl ClassifiedMeeting {
    /// Parse the record's timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] if either timestamp is
    /// not valid RFC 3339.
    pub fn from_record(record: &MeetingRecord) -> Result<Self, ValidationError> {
        let event = &record.event;
        let start = parse_timestamp(&event.id, "start", &event.start)?;
        let end = parse_timestamp(&event.id, "end", &event.end)?;
        Ok(Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            start,
            end,
            attendee_count: event.attendee_count,
            classification: record.classification.clone(),
        })
    }

    /// Recorded length in minutes. May be zero or negative for malformed
    /// intervals.
    pub fn recorded_minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }
}

fn parse_timestamp(
    meeting_id: &str,
    field: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, ValidationError> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|e| ValidationError::InvalidTimestamp {
        meeting_id: meeting_id.to_string(),
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}
