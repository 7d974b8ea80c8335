//! Integration tests for classification gathering feeding the pipeline.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cogload_core::{
    classify_all, CalendarEvent, Classification, Classifier, ClassifyError, EmotionalIntensity,
    LoadPipeline, MeetingType, Role, TopicTags, WeightTable,
};

/// Classifier that sleeps longer for earlier events, so completions arrive
/// out of order, and records peak concurrency.
struct SlowClassifier {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SlowClassifier {
    fn new() -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

impl Classifier for SlowClassifier {
    fn classify(
        &self,
        event: &CalendarEvent,
    ) -> impl Future<Output = Result<Classification, ClassifyError>> + Send {
        let title = event.title.clone();
        let id = event.id.clone();
        async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let delay: u64 = id.trim_start_matches('e').parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(50 - delay * 5)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if title == "broken" {
                return Err(ClassifyError::Failed {
                    meeting_id: id,
                    message: "model returned garbage".to_string(),
                });
            }
            Ok(Classification::new(
                MeetingType::parse(&title),
                Role::Participant,
                EmotionalIntensity::Moderate,
                TopicTags::new(["platform"]),
            ))
        }
    }
}

fn event(i: usize, title: &str) -> CalendarEvent {
    CalendarEvent {
        id: format!("e{i}"),
        title: title.to_string(),
        description: String::new(),
        start: format!("2024-03-04T{:02}:00:00Z", 8 + i),
        end: format!("2024-03-04T{:02}:45:00Z", 8 + i),
        attendee_count: 5,
    }
}

#[tokio::test]
async fn test_classifications_keep_input_order() {
    let titles = ["standup", "review", "planning", "sync", "interview", "workshop"];
    let events: Vec<_> = titles.iter().enumerate().map(|(i, t)| event(i, t)).collect();
    let classifier = Arc::new(SlowClassifier::new());

    let records = classify_all(Arc::clone(&classifier), events, 2).await.unwrap();

    let kinds: Vec<_> = records
        .iter()
        .map(|r| r.classification.meeting_type.as_str().to_string())
        .collect();
    assert_eq!(kinds, titles);
    assert!(classifier.peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_failed_classification_scores_with_defaults() {
    let events = vec![event(0, "planning"), event(1, "broken")];
    let records = classify_all(Arc::new(SlowClassifier::new()), events, 4).await.unwrap();
    assert_eq!(records[1].classification, Classification::unclassified());

    let weights = WeightTable::builtin();
    let day = LoadPipeline::new(&weights).score_records(&records).unwrap();
    let explanation = &day.events[1].explanation;
    assert_eq!(explanation.complexity, 0.3);
    assert_eq!(explanation.meeting_type_scalar, 1.0);
    assert_eq!(explanation.role_load, 0.5);
    assert_eq!(explanation.emotional_load, 0.4);
}
