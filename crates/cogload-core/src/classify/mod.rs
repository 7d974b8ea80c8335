//! Classification collaborator seam.
//!
//! Classification itself (typically a hosted language model) lives outside
//! this crate. This module defines the trait such a classifier implements and
//! gathers classifications for a day's events concurrently, with a bound on
//! in-flight requests.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::ClassifyError;
use crate::meeting::{CalendarEvent, Classification, MeetingRecord};

/// Produces a [`Classification`] for one calendar event.
///
/// Implementations may fail; [`classify_all`] degrades a failure to
/// [`Classification::unclassified`] rather than aborting the day.
pub trait Classifier: Send + Sync + 'static {
    fn classify(
        &self,
        event: &CalendarEvent,
    ) -> impl Future<Output = Result<Classification, ClassifyError>> + Send;
}

/// Classify every event with at most `max_concurrency` requests in flight.
/// A limit of zero is treated as one.
///
/// Records come back in input order no matter which request finishes first.
///
/// # Errors
///
/// Returns [`ClassifyError::Join`] if a classification task panics.
pub async fn classify_all<C: Classifier>(
    classifier: Arc<C>,
    events: Vec<CalendarEvent>,
    max_concurrency: usize,
) -> Result<Vec<MeetingRecord>, ClassifyError> {
    let permits = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, event) in events.iter().cloned().enumerate() {
        let classifier = Arc::clone(&classifier);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // The semaphore is never closed.
            let _permit = permits.acquire_owned().await.ok();
            let result = classifier.classify(&event).await;
            (index, result)
        });
    }

    let mut classifications: Vec<Option<Classification>> = vec![None; events.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        let classification = match result {
            Ok(classification) => classification,
            Err(e) => {
                tracing::warn!(
                    meeting_id = %events[index].id,
                    error = %e,
                    "classification failed, using defaults"
                );
                Classification::unclassified()
            }
        };
        classifications[index] = Some(classification);
    }

    Ok(events
        .into_iter()
        .zip(classifications)
        .map(|(event, classification)| {
            MeetingRecord::new(
                event,
                classification.unwrap_or_else(Classification::unclassified),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{EmotionalIntensity, MeetingType, Role, TopicTags};

    struct TitleClassifier;

    impl Classifier for TitleClassifier {
        fn classify(
            &self,
            event: &CalendarEvent,
        ) -> impl Future<Output = Result<Classification, ClassifyError>> + Send {
            let title = event.title.clone();
            let id = event.id.clone();
            async move {
                if title.is_empty() {
                    return Err(ClassifyError::Failed {
                        meeting_id: id,
                        message: "empty title".to_string(),
                    });
                }
                Ok(Classification::new(
                    MeetingType::parse(&title),
                    Role::Participant,
                    EmotionalIntensity::Routine,
                    TopicTags::new([title]),
                ))
            }
        }
    }

    fn event(id: &str, title: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            start: "2024-03-04T09:00:00Z".to_string(),
            end: "2024-03-04T09:30:00Z".to_string(),
            attendee_count: 3,
        }
    }

    #[tokio::test]
    async fn failures_degrade_to_unclassified() {
        let events = vec![event("a", "standup"), event("b", ""), event("c", "review")];
        let records = classify_all(Arc::new(TitleClassifier), events, 2).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].classification.meeting_type, MeetingType::Standup);
        assert_eq!(records[1].classification, Classification::unclassified());
        assert_eq!(records[2].classification.meeting_type, MeetingType::Review);
    }

    #[tokio::test]
    async fn zero_concurrency_still_makes_progress() {
        let events = vec![event("a", "sync")];
        let records = classify_all(Arc::new(TitleClassifier), events, 0).await.unwrap();
        assert_eq!(records[0].classification.meeting_type, MeetingType::Sync);
    }
}
