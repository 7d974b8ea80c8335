//! Weight table: categorical labels to numeric weights.
//!
//! The table is built once (built-in values, optionally merged with config
//! overrides) and is read-only afterwards, so one instance can be shared by
//! every scoring call without locking.
//!
//! | Category | Unknown-label default |
//! |----------|-----------------------|
//! | complexity | 0.3 |
//! | type_scalar | 1.0 |
//! | role | 0.5 |
//! | emotional | 0.4 |
//! | topic_change, gap, time_of_day, social | 1.0 |

mod buckets;

pub use buckets::{GapBucket, SocialBucket, TimeOfDay, TopicChange};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::meeting::{EmotionalIntensity, MeetingType, Role};

/// Per-category label overrides, as read from configuration.
pub type WeightOverrides = BTreeMap<WeightCategory, BTreeMap<String, f64>>;

/// A dimension of the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCategory {
    /// Task complexity per meeting type
    Complexity,
    /// Load scalar per meeting type
    TypeScalar,
    Role,
    Emotional,
    TopicChange,
    Gap,
    TimeOfDay,
    Social,
}

impl WeightCategory {
    pub const ALL: [WeightCategory; 8] = [
        Self::Complexity,
        Self::TypeScalar,
        Self::Role,
        Self::Emotional,
        Self::TopicChange,
        Self::Gap,
        Self::TimeOfDay,
        Self::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complexity => "complexity",
            Self::TypeScalar => "type_scalar",
            Self::Role => "role",
            Self::Emotional => "emotional",
            Self::TopicChange => "topic_change",
            Self::Gap => "gap",
            Self::TimeOfDay => "time_of_day",
            Self::Social => "social",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    /// Weight returned for a label the category does not know.
    pub fn default_weight(&self) -> f64 {
        match self {
            Self::Complexity => 0.3,
            Self::TypeScalar => 1.0,
            Self::Role => 0.5,
            Self::Emotional => 0.4,
            Self::TopicChange | Self::Gap | Self::TimeOfDay | Self::Social => 1.0,
        }
    }

    /// Upper bound for weights in this category. Time-of-day multipliers are
    /// unbounded above.
    pub fn max_weight(&self) -> Option<f64> {
        match self {
            Self::TimeOfDay => None,
            _ => Some(1.0),
        }
    }

    /// Canonical spelling of `raw` in this category, or `None` if the
    /// category has no such label.
    pub fn canonical_label(&self, raw: &str) -> Option<String> {
        match self {
            Self::Complexity | Self::TypeScalar => {
                let kind = MeetingType::parse(raw);
                kind.is_recognized().then(|| kind.as_str().to_string())
            }
            Self::Role => {
                let role = Role::parse(raw);
                role.is_recognized().then(|| role.as_str().to_string())
            }
            Self::Emotional => {
                let level = EmotionalIntensity::parse(raw);
                level.is_recognized().then(|| level.as_str().to_string())
            }
            Self::TopicChange => TopicChange::ALL
                .iter()
                .find(|t| t.as_str() == raw)
                .map(|t| t.as_str().to_string()),
            Self::Gap => GapBucket::ALL
                .iter()
                .find(|g| g.as_str() == raw)
                .map(|g| g.as_str().to_string()),
            Self::TimeOfDay => TimeOfDay::ALL
                .iter()
                .find(|t| t.as_str() == raw)
                .map(|t| t.as_str().to_string()),
            Self::Social => SocialBucket::ALL
                .iter()
                .find(|s| s.as_str() == raw)
                .map(|s| s.as_str().to_string()),
        }
    }
}

/// Immutable mapping from labels to weights, per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightTable {
    tables: BTreeMap<WeightCategory, BTreeMap<String, f64>>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WeightTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        let mut tables = BTreeMap::new();

        tables.insert(
            WeightCategory::Complexity,
            entries(&[
                (MeetingType::Standup.as_str(), 0.2),
                (MeetingType::Sync.as_str(), 0.3),
                (MeetingType::OneOnOne.as_str(), 0.4),
                (MeetingType::Planning.as_str(), 0.6),
                (MeetingType::Review.as_str(), 0.6),
                (MeetingType::Brainstorm.as_str(), 0.7),
                (MeetingType::Presentation.as_str(), 0.7),
                (MeetingType::Workshop.as_str(), 0.7),
                (MeetingType::Interview.as_str(), 0.8),
                (MeetingType::Negotiation.as_str(), 0.9),
                (MeetingType::Social.as_str(), 0.1),
            ]),
        );

        // Routine syncs and social gatherings are damped regardless of length.
        tables.insert(
            WeightCategory::TypeScalar,
            entries(&[
                (MeetingType::Standup.as_str(), 1.0),
                (MeetingType::Sync.as_str(), 0.3),
                (MeetingType::OneOnOne.as_str(), 1.0),
                (MeetingType::Planning.as_str(), 1.0),
                (MeetingType::Review.as_str(), 1.0),
                (MeetingType::Brainstorm.as_str(), 1.0),
                (MeetingType::Presentation.as_str(), 1.0),
                (MeetingType::Workshop.as_str(), 1.0),
                (MeetingType::Interview.as_str(), 1.0),
                (MeetingType::Negotiation.as_str(), 1.0),
                (MeetingType::Social.as_str(), 0.12),
            ]),
        );

        tables.insert(
            WeightCategory::Role,
            entries(&[
                (Role::Listener.as_str(), 0.3),
                (Role::Participant.as_str(), 0.5),
                (Role::Organizer.as_str(), 0.6),
                (Role::Facilitator.as_str(), 0.7),
                (Role::Presenter.as_str(), 0.8),
                (Role::DecisionMaker.as_str(), 0.9),
            ]),
        );

        tables.insert(
            WeightCategory::Emotional,
            entries(&[
                (EmotionalIntensity::Routine.as_str(), 0.2),
                (EmotionalIntensity::Calm.as_str(), 0.3),
                (EmotionalIntensity::Moderate.as_str(), 0.5),
                (EmotionalIntensity::Tense.as_str(), 0.8),
                (EmotionalIntensity::HighStakes.as_str(), 1.0),
            ]),
        );

        tables.insert(
            WeightCategory::TopicChange,
            entries(&[
                (TopicChange::SameProject.as_str(), 0.0),
                (TopicChange::RelatedDomain.as_str(), 0.3),
                (TopicChange::Unrelated.as_str(), 1.0),
            ]),
        );

        tables.insert(
            WeightCategory::Gap,
            entries(&[
                (GapBucket::Within5.as_str(), 1.0),
                (GapBucket::Within15.as_str(), 0.8),
                (GapBucket::Within30.as_str(), 0.5),
                (GapBucket::Beyond30.as_str(), 0.2),
            ]),
        );

        tables.insert(
            WeightCategory::TimeOfDay,
            entries(&[
                (TimeOfDay::Morning.as_str(), 1.0),
                (TimeOfDay::Midday.as_str(), 1.1),
                (TimeOfDay::Afternoon.as_str(), 1.2),
                (TimeOfDay::Evening.as_str(), 1.4),
            ]),
        );

        tables.insert(
            WeightCategory::Social,
            entries(&[
                (SocialBucket::Pair.as_str(), 0.2),
                (SocialBucket::Small.as_str(), 0.4),
                (SocialBucket::Team.as_str(), 0.6),
                (SocialBucket::Large.as_str(), 0.8),
                (SocialBucket::Crowd.as_str(), 1.0),
            ]),
        );

        Self { tables }
    }

    /// The built-in table with `overrides` merged on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a label the category does
    /// not know, or a weight outside the category's range.
    pub fn with_overrides(overrides: &WeightOverrides) -> Result<Self, ConfigError> {
        let mut table = Self::builtin();
        for (category, labels) in overrides {
            for (raw, weight) in labels {
                let key = format!("weights.{}.{}", category.as_str(), raw);
                let label = category.canonical_label(raw).ok_or_else(|| {
                    ConfigError::InvalidValue {
                        key: key.clone(),
                        message: format!("unknown {} label", category.as_str()),
                    }
                })?;
                let in_range = weight.is_finite()
                    && *weight >= 0.0
                    && category.max_weight().map_or(true, |max| *weight <= max);
                if !in_range {
                    return Err(ConfigError::InvalidValue {
                        key,
                        message: format!("weight {weight} out of range"),
                    });
                }
                table
                    .tables
                    .entry(*category)
                    .or_default()
                    .insert(label, *weight);
            }
        }
        Ok(table)
    }

    /// Weight for `label` in `category`; the category default if the label
    /// is unknown. Never fails.
    pub fn lookup(&self, category: WeightCategory, label: &str) -> f64 {
        match self.tables.get(&category).and_then(|t| t.get(label)) {
            Some(weight) => *weight,
            None => self.fallback(category, label),
        }
    }

    fn fallback(&self, category: WeightCategory, label: &str) -> f64 {
        let weight = category.default_weight();
        tracing::debug!(
            category = category.as_str(),
            label,
            weight,
            "unrecognized label, using default weight"
        );
        weight
    }

    /// Labels and weights for one category, in label order.
    pub fn entries(&self, category: WeightCategory) -> impl Iterator<Item = (&str, f64)> {
        self.tables
            .get(&category)
            .into_iter()
            .flat_map(|t| t.iter().map(|(label, w)| (label.as_str(), *w)))
    }

    pub fn complexity(&self, kind: &MeetingType) -> f64 {
        match kind {
            MeetingType::Unrecognized(label) => self.fallback(WeightCategory::Complexity, label),
            known => self.lookup(WeightCategory::Complexity, known.as_str()),
        }
    }

    pub fn type_scalar(&self, kind: &MeetingType) -> f64 {
        match kind {
            MeetingType::Unrecognized(label) => self.fallback(WeightCategory::TypeScalar, label),
            known => self.lookup(WeightCategory::TypeScalar, known.as_str()),
        }
    }

    pub fn role_load(&self, role: &Role) -> f64 {
        match role {
            Role::Unrecognized(label) => self.fallback(WeightCategory::Role, label),
            known => self.lookup(WeightCategory::Role, known.as_str()),
        }
    }

    pub fn emotional_load(&self, level: &EmotionalIntensity) -> f64 {
        match level {
            EmotionalIntensity::Unrecognized(label) => {
                self.fallback(WeightCategory::Emotional, label)
            }
            known => self.lookup(WeightCategory::Emotional, known.as_str()),
        }
    }

    pub fn social_load(&self, bucket: SocialBucket) -> f64 {
        self.lookup(WeightCategory::Social, bucket.as_str())
    }

    pub fn gap_dampener(&self, bucket: GapBucket) -> f64 {
        self.lookup(WeightCategory::Gap, bucket.as_str())
    }

    pub fn topic_cost(&self, change: TopicChange) -> f64 {
        self.lookup(WeightCategory::TopicChange, change.as_str())
    }

    pub fn time_of_day_multiplier(&self, time_of_day: TimeOfDay) -> f64 {
        self.lookup(WeightCategory::TimeOfDay, time_of_day.as_str())
    }
}

fn entries(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs
        .iter()
        .map(|(label, weight)| (label.to_string(), *weight))
        .collect()
}
