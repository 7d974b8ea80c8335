//! Integration tests for the day-scoring pipeline.

use chrono::{DateTime, Duration, Utc};
use cogload_core::load::{HIGH_RISK_THRESHOLD, MIN_DURATION_MINUTES};
use cogload_core::{
    CalendarEvent, Classification, EmotionalIntensity, LoadPipeline, MeetingRecord, MeetingType,
    Role, TopicTags, ValidationError, WeightTable,
};

fn base() -> DateTime<Utc> {
    "2024-03-04T07:00:00Z".parse().unwrap()
}

fn record(
    id: &str,
    start: DateTime<Utc>,
    minutes: i64,
    classification: Classification,
    attendees: u32,
) -> MeetingRecord {
    MeetingRecord::new(
        CalendarEvent {
            id: id.to_string(),
            title: format!("Meeting {id}"),
            description: String::new(),
            start: start.to_rfc3339(),
            end: (start + Duration::minutes(minutes)).to_rfc3339(),
            attendee_count: attendees,
        },
        classification,
    )
}

fn routine_sync(tags: &[&str]) -> Classification {
    Classification::new(
        MeetingType::Sync,
        Role::Listener,
        EmotionalIntensity::Routine,
        TopicTags::new(tags.iter().copied()),
    )
}

fn planning(tags: &[&str]) -> Classification {
    Classification::new(
        MeetingType::Planning,
        Role::Facilitator,
        EmotionalIntensity::Moderate,
        TopicTags::new(tags.iter().copied()),
    )
}

#[test]
fn test_empty_day_json_shape() {
    let weights = WeightTable::builtin();
    let day = LoadPipeline::new(&weights).score_records(&[]).unwrap();
    let json = serde_json::to_value(&day).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "events": [],
            "summary": { "totalLoad": 0.0, "capacityRemaining": 100.0, "highRisk": false }
        })
    );
}

#[test]
fn test_first_meeting_has_no_switch_cost() {
    let weights = WeightTable::builtin();
    let records = vec![
        record("a", base(), 60, planning(&["roadmap"]), 6),
        record("b", base() + Duration::minutes(60), 30, planning(&["hiring"]), 6),
    ];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    assert_eq!(day.events[0].context_switch_cost, 0.0);
    assert_eq!(day.events[0].explanation.topic_change, None);
    assert_eq!(day.events[1].context_switch_cost, 1.0);
}

#[test]
fn test_shared_tag_no_gap_costs_point_three() {
    let weights = WeightTable::builtin();
    let records = vec![
        record("a", base(), 30, planning(&["roadmap", "q3"]), 4),
        record("b", base() + Duration::minutes(30), 30, planning(&["q3"]), 4),
    ];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    assert_eq!(day.events[1].context_switch_cost, 0.3);
    assert_eq!(day.events[1].explanation.gap_minutes, Some(0.0));
}

#[test]
fn test_unrelated_after_45_minutes_costs_point_two() {
    let weights = WeightTable::builtin();
    let records = vec![
        record("a", base(), 30, planning(&["roadmap"]), 4),
        record("b", base() + Duration::minutes(75), 30, planning(&["hiring"]), 4),
    ];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    assert_eq!(day.events[1].context_switch_cost, 0.2);
}

#[test]
fn test_standup_example() {
    let weights = WeightTable::builtin();
    let standup = Classification::new(
        MeetingType::Standup,
        Role::Listener,
        EmotionalIntensity::Routine,
        TopicTags::new(["team"]),
    );
    let records = vec![record("standup", base() + Duration::hours(2), 30, standup, 2)];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    let event = &day.events[0];

    // 0.5 × (0.35·0.2 + 0.25·0.3 + 0.25·0.2 + 0.15·0.2)
    let expected = 0.5 * (0.35 * 0.2 + 0.25 * 0.3 + 0.25 * 0.2 + 0.15 * 0.2);
    assert!((event.mental_load - expected).abs() < 0.001);
    assert_eq!(event.total_load, event.mental_load);
    assert_eq!(event.capacity_cost, cogload_core::load::round3(event.total_load * 100.0));
    assert_eq!(event.explanation.complexity, 0.2);
    assert_eq!(event.explanation.meeting_type_scalar, 1.0);
    assert_eq!(event.explanation.role_load, 0.3);
    assert_eq!(event.explanation.emotional_load, 0.2);
    assert_eq!(event.explanation.social_load, 0.2);
}

#[test]
fn test_capacity_depletes_to_zero_and_flags_risk() {
    let weights = WeightTable::builtin();
    // First meeting: 77 min routine sync, no predecessor -> total 0.1.
    // The rest: 31 min routine sync, shared tag, 45 min gap -> 0.04 + 0.06.
    let mut records = vec![record("m0", base(), 77, routine_sync(&["ops"]), 2)];
    let mut start = base() + Duration::minutes(77 + 45);
    for i in 1..11 {
        records.push(record(&format!("m{i}"), start, 31, routine_sync(&["ops"]), 2));
        start += Duration::minutes(31 + 45);
    }

    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    assert_eq!(day.events.len(), 11);
    for event in &day.events {
        assert_eq!(event.capacity_cost, 10.0, "{}", event.meeting.id);
    }
    assert_eq!(day.events[8].capacity_remaining, 10.0);
    assert_eq!(day.events[9].capacity_remaining, 0.0);
    assert_eq!(day.events[10].capacity_remaining, 0.0);
    assert_eq!(day.summary.capacity_remaining, 0.0);
    assert_eq!(day.summary.total_load, 0.1);
    assert!(day.summary.capacity_remaining < HIGH_RISK_THRESHOLD);
    assert!(day.summary.high_risk);
}

#[test]
fn test_light_day_is_not_high_risk() {
    let weights = WeightTable::builtin();
    let records = vec![
        record("a", base() + Duration::hours(2), 30, routine_sync(&["ops"]), 3),
        record("b", base() + Duration::hours(5), 30, routine_sync(&["ops"]), 3),
    ];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    assert!(day.summary.capacity_remaining > HIGH_RISK_THRESHOLD);
    assert!(!day.summary.high_risk);
}

#[test]
fn test_zero_length_meeting_uses_floor() {
    let weights = WeightTable::builtin();
    let records = vec![record("zero", base(), 0, planning(&["x"]), 4)];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    assert_eq!(day.events[0].duration_minutes, MIN_DURATION_MINUTES);
    assert!(day.events[0].mental_load > 0.0);
}

#[test]
fn test_invalid_timestamp_is_surfaced() {
    let weights = WeightTable::builtin();
    let mut bad = record("bad", base(), 30, planning(&["x"]), 4);
    bad.event.start = "2024-13-45T99:00:00Z".to_string();
    let records = vec![record("ok", base(), 30, planning(&["x"]), 4), bad];
    let err = LoadPipeline::new(&weights).score_records(&records).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidTimestamp { field: "start", .. }));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let weights = WeightTable::builtin();
    let records = vec![
        record("a", base(), 50, planning(&["roadmap", "q3"]), 8),
        record("b", base() + Duration::minutes(55), 25, routine_sync(&["q3"]), 3),
        record("c", base() + Duration::hours(9), 90, planning(&["hiring"]), 15),
    ];
    let pipeline = LoadPipeline::new(&weights);
    let first = serde_json::to_string(&pipeline.score_records(&records).unwrap()).unwrap();
    let second = serde_json::to_string(&pipeline.score_records(&records).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_enriched_meeting_json_fields() {
    let weights = WeightTable::builtin();
    let records = vec![record("a", base(), 45, planning(&["roadmap"]), 8)];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    let json = serde_json::to_value(&day).unwrap();
    let event = &json["events"][0];
    for field in [
        "id",
        "title",
        "start",
        "end",
        "attendeeCount",
        "classification",
        "durationMinutes",
        "mentalLoad",
        "contextSwitchCost",
        "totalLoad",
        "recoveryMinutes",
        "timeOfDay",
        "socialLoad",
        "capacityCost",
        "capacityRemaining",
        "explanation",
    ] {
        assert!(event.get(field).is_some(), "missing {field}");
    }
    assert_eq!(event["classification"]["meeting_type"], "planning");
    assert_eq!(event["timeOfDay"], "morning");
    assert_eq!(event["explanation"]["topicTags"], serde_json::json!(["roadmap"]));
    assert!(event["explanation"].get("timeOfDayMultiplier").is_some());
}

#[test]
fn test_heaviest_meeting() {
    let weights = WeightTable::builtin();
    let records = vec![
        record("light", base(), 30, routine_sync(&["ops"]), 3),
        record("heavy", base() + Duration::hours(1), 120, planning(&["roadmap"]), 12),
    ];
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    assert_eq!(day.heaviest().map(|m| m.meeting.id.as_str()), Some("heavy"));
    assert!(day.total_recovery_minutes() > 0.0);
}
