//! Classification labels attached to a meeting.
//!
//! Labels come from an external classifier and are untrusted. Every label
//! enum is closed over the values the weight table knows, plus an
//! `Unrecognized` arm that keeps the original text. Unrecognized labels are
//! never an error; they resolve to the category default at lookup time.

use serde::{Deserialize, Serialize};

/// Normalize a free-form label: trim, lowercase, `-` and spaces to `_`.
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Kind of meeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MeetingType {
    Standup,
    Sync,
    OneOnOne,
    Planning,
    Review,
    Brainstorm,
    Presentation,
    Workshop,
    Interview,
    Negotiation,
    Social,
    Unrecognized(String),
}

impl MeetingType {
    /// Every recognized meeting type.
    pub const KNOWN: [MeetingType; 11] = [
        Self::Standup,
        Self::Sync,
        Self::OneOnOne,
        Self::Planning,
        Self::Review,
        Self::Brainstorm,
        Self::Presentation,
        Self::Workshop,
        Self::Interview,
        Self::Negotiation,
        Self::Social,
    ];

    pub fn parse(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "standup" | "stand_up" => Self::Standup,
            "sync" => Self::Sync,
            "one_on_one" | "1:1" | "1on1" | "1_on_1" => Self::OneOnOne,
            "planning" => Self::Planning,
            "review" => Self::Review,
            "brainstorm" => Self::Brainstorm,
            "presentation" => Self::Presentation,
            "workshop" => Self::Workshop,
            "interview" => Self::Interview,
            "negotiation" => Self::Negotiation,
            "social" => Self::Social,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Standup => "standup",
            Self::Sync => "sync",
            Self::OneOnOne => "one_on_one",
            Self::Planning => "planning",
            Self::Review => "review",
            Self::Brainstorm => "brainstorm",
            Self::Presentation => "presentation",
            Self::Workshop => "workshop",
            Self::Interview => "interview",
            Self::Negotiation => "negotiation",
            Self::Social => "social",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for MeetingType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<MeetingType> for String {
    fn from(value: MeetingType) -> Self {
        value.as_str().to_string()
    }
}

/// The attendee's role in the meeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Listener,
    Participant,
    Organizer,
    Facilitator,
    Presenter,
    DecisionMaker,
    Unrecognized(String),
}

impl Role {
    pub const KNOWN: [Role; 6] = [
        Self::Listener,
        Self::Participant,
        Self::Organizer,
        Self::Facilitator,
        Self::Presenter,
        Self::DecisionMaker,
    ];

    pub fn parse(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "listener" | "observer" => Self::Listener,
            "participant" | "attendee" => Self::Participant,
            "organizer" | "host" => Self::Organizer,
            "facilitator" => Self::Facilitator,
            "presenter" | "speaker" => Self::Presenter,
            "decision_maker" => Self::DecisionMaker,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Listener => "listener",
            Self::Participant => "participant",
            Self::Organizer => "organizer",
            Self::Facilitator => "facilitator",
            Self::Presenter => "presenter",
            Self::DecisionMaker => "decision_maker",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// How emotionally charged the meeting is expected to be.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmotionalIntensity {
    Routine,
    Calm,
    Moderate,
    Tense,
    HighStakes,
    Unrecognized(String),
}

impl EmotionalIntensity {
    pub const KNOWN: [EmotionalIntensity; 5] = [
        Self::Routine,
        Self::Calm,
        Self::Moderate,
        Self::Tense,
        Self::HighStakes,
    ];

    pub fn parse(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "routine" => Self::Routine,
            "calm" | "low" => Self::Calm,
            "moderate" | "medium" => Self::Moderate,
            "tense" | "high" => Self::Tense,
            "high_stakes" | "critical" => Self::HighStakes,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Routine => "routine",
            Self::Calm => "calm",
            Self::Moderate => "moderate",
            Self::Tense => "tense",
            Self::HighStakes => "high_stakes",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for EmotionalIntensity {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<EmotionalIntensity> for String {
    fn from(value: EmotionalIntensity) -> Self {
        value.as_str().to_string()
    }
}

/// Ordered, duplicate-free set of topic tags.
///
/// Matching is exact and case-sensitive; insertion order is kept for display.
/// Every tag the classifier produced takes part in overlap matching.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TopicTags(Vec<String>);

impl TopicTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !kept.contains(&tag) {
                kept.push(tag);
            }
        }
        Self(kept)
    }

    /// True when the two sets share at least one tag.
    pub fn overlaps(&self, other: &TopicTags) -> bool {
        self.0.iter().any(|tag| other.0.contains(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for TopicTags {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<TopicTags> for Vec<String> {
    fn from(tags: TopicTags) -> Self {
        tags.0
    }
}

/// Labels produced by the classification collaborator for one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub meeting_type: MeetingType,
    pub role: Role,
    pub emotional_intensity: EmotionalIntensity,
    #[serde(default)]
    pub topic_tags: TopicTags,
}

impl Classification {
    pub fn new(
        meeting_type: MeetingType,
        role: Role,
        emotional_intensity: EmotionalIntensity,
        topic_tags: TopicTags,
    ) -> Self {
        Self {
            meeting_type,
            role,
            emotional_intensity,
            topic_tags,
        }
    }

    /// Classification used when the collaborator fails: every label is
    /// unrecognized, so each resolves to its category default.
    pub fn unclassified() -> Self {
        Self {
            meeting_type: MeetingType::Unrecognized("unknown".to_string()),
            role: Role::Unrecognized("unknown".to_string()),
            emotional_intensity: EmotionalIntensity::Unrecognized("unknown".to_string()),
            topic_tags: TopicTags::default(),
        }
    }
}
