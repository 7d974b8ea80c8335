//! Pipeline entry point: classified meetings in, enriched day out.

use std::io::Read;

use super::calculator::{score_meeting, score_with_switch, MeetingScore};
use super::capacity::CapacityFold;
use super::context_switch::context_switch;
use super::summary::summarize;
use super::types::{DayLoad, EnrichedMeeting};
use crate::error::{Result, ValidationError};
use crate::meeting::{ClassifiedMeeting, MeetingRecord};
use crate::weights::WeightTable;

/// Scores one day of meetings against a shared, read-only weight table.
///
/// The pipeline holds no state between calls: the same input always yields
/// the same output.
#[derive(Debug, Clone, Copy)]
pub struct LoadPipeline<'a> {
    weights: &'a WeightTable,
    validate_order: bool,
}

impl<'a> LoadPipeline<'a> {
    pub fn new(weights: &'a WeightTable) -> Self {
        Self {
            weights,
            validate_order: true,
        }
    }

    /// Whether to reject meetings that start before their predecessor.
    /// Input is never re-sorted either way.
    pub fn with_order_validation(mut self, validate: bool) -> Self {
        self.validate_order = validate;
        self
    }

    pub fn weights(&self) -> &'a WeightTable {
        self.weights
    }

    /// Read a JSON array of meeting records from `reader` and score it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`](crate::error::CoreError::Io) if reading
    /// fails, [`CoreError::Json`](crate::error::CoreError::Json) if the input
    /// is not a meeting array, and
    /// [`CoreError::Validation`](crate::error::CoreError::Validation) as for
    /// [`LoadPipeline::score_records`].
    pub fn score_reader<R: Read>(&self, mut reader: R) -> Result<DayLoad> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        self.score_json(&raw)
    }

    /// Parse a JSON array of meeting records and score it.
    ///
    /// # Errors
    ///
    /// Same as [`LoadPipeline::score_reader`], minus the IO failure.
    pub fn score_json(&self, input: &str) -> Result<DayLoad> {
        let records: Vec<MeetingRecord> = serde_json::from_str(input)?;
        tracing::debug!(meetings = records.len(), "read meeting records");
        Ok(self.score_records(&records)?)
    }

    /// Parse wire records, then score them.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] for the first record with
    /// an unparseable timestamp, or [`ValidationError::OutOfOrder`] when
    /// ordering validation is on. No partial result is produced.
    pub fn score_records(&self, records: &[MeetingRecord]) -> Result<DayLoad, ValidationError> {
        let meetings = records
            .iter()
            .map(ClassifiedMeeting::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        self.score(&meetings)
    }

    /// Single left-to-right pass: each meeting is scored against the one
    /// enriched just before it, then charged against the capacity fold.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfOrder`] when ordering validation is on
    /// and the input is not chronological.
    pub fn score(&self, meetings: &[ClassifiedMeeting]) -> Result<DayLoad, ValidationError> {
        self.check_order(meetings)?;

        let mut fold = CapacityFold::new();
        let mut events: Vec<EnrichedMeeting> = Vec::with_capacity(meetings.len());
        for meeting in meetings {
            let previous = events.last().map(|e| &e.meeting);
            let score = score_meeting(self.weights, meeting, previous);
            let remaining = fold.apply(score.capacity_cost);
            events.push(enrich(meeting, score, remaining));
        }

        Ok(finish(events))
    }

    /// Two-pass variant. Pass one scores every meeting against its raw
    /// predecessor independently; pass two runs the capacity scan. Produces
    /// the same output as [`LoadPipeline::score`].
    ///
    /// # Errors
    ///
    /// Same as [`LoadPipeline::score`].
    pub fn score_two_pass(&self, meetings: &[ClassifiedMeeting]) -> Result<DayLoad, ValidationError> {
        self.check_order(meetings)?;

        let scores: Vec<MeetingScore> = meetings
            .iter()
            .enumerate()
            .map(|(i, meeting)| {
                let previous = i.checked_sub(1).map(|p| &meetings[p]);
                let switch = context_switch(self.weights, meeting, previous);
                score_with_switch(self.weights, meeting, switch)
            })
            .collect();

        let mut fold = CapacityFold::new();
        let events = meetings
            .iter()
            .zip(scores)
            .map(|(meeting, score)| {
                let remaining = fold.apply(score.capacity_cost);
                enrich(meeting, score, remaining)
            })
            .collect();

        Ok(finish(events))
    }

    fn check_order(&self, meetings: &[ClassifiedMeeting]) -> Result<(), ValidationError> {
        if !self.validate_order {
            return Ok(());
        }
        for (i, pair) in meetings.windows(2).enumerate() {
            if pair[1].start < pair[0].start {
                return Err(ValidationError::OutOfOrder {
                    index: i + 1,
                    previous_start: pair[0].start,
                    start: pair[1].start,
                });
            }
        }
        Ok(())
    }
}

fn enrich(meeting: &ClassifiedMeeting, score: MeetingScore, capacity_remaining: f64) -> EnrichedMeeting {
    EnrichedMeeting {
        meeting: meeting.clone(),
        duration_minutes: score.duration_minutes,
        mental_load: score.mental_load,
        context_switch_cost: score.context_switch_cost,
        total_load: score.total_load,
        recovery_minutes: score.recovery_minutes,
        time_of_day: score.time_of_day,
        social_load: score.social_load,
        capacity_cost: score.capacity_cost,
        capacity_remaining,
        explanation: score.explanation,
    }
}

fn finish(events: Vec<EnrichedMeeting>) -> DayLoad {
    let summary = summarize(&events);
    tracing::debug!(
        meetings = events.len(),
        total_load = summary.total_load,
        capacity_remaining = summary.capacity_remaining,
        high_risk = summary.high_risk,
        "scored day"
    );
    DayLoad { events, summary }
}
