use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the four fixed decision criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Impact,
    Cost,
    Risk,
    Reversibility,
}

/// Whether a higher raw rating is better or worse for a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Dimension {
    /// Canonical iteration order for scoring, display, and question templates.
    pub const ALL: [Dimension; 4] = [
        Dimension::Impact,
        Dimension::Cost,
        Dimension::Risk,
        Dimension::Reversibility,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Dimension::Impact => "impact",
            Dimension::Cost => "cost",
            Dimension::Risk => "risk",
            Dimension::Reversibility => "reversibility",
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Dimension::Cost | Dimension::Risk => Polarity::Negative,
            Dimension::Impact | Dimension::Reversibility => Polarity::Positive,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dimension| dimension.key() == key)
    }
}

/// Fixed four-slot record, one value per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionValues<T> {
    pub impact: T,
    pub cost: T,
    pub risk: T,
    pub reversibility: T,
}

impl<T: Copy> DimensionValues<T> {
    pub fn from_fn(mut f: impl FnMut(Dimension) -> T) -> Self {
        Self {
            impact: f(Dimension::Impact),
            cost: f(Dimension::Cost),
            risk: f(Dimension::Risk),
            reversibility: f(Dimension::Reversibility),
        }
    }

    pub fn get(&self, dimension: Dimension) -> T {
        match dimension {
            Dimension::Impact => self.impact,
            Dimension::Cost => self.cost,
            Dimension::Risk => self.risk,
            Dimension::Reversibility => self.reversibility,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: T) {
        match dimension {
            Dimension::Impact => self.impact = value,
            Dimension::Cost => self.cost = value,
            Dimension::Risk => self.risk = value,
            Dimension::Reversibility => self.reversibility = value,
        }
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(Dimension, T) -> U) -> DimensionValues<U> {
        DimensionValues::from_fn(|dimension| f(dimension, self.get(dimension)))
    }

    /// Values in `Dimension::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, T)> + '_ {
        Dimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }
}

/// Caller supplied importance per dimension; clamped to [1, 5] when scored.
pub type Weights = DimensionValues<f64>;

/// Raw per-option rating per dimension; clamped to [1, 5] when scored.
pub type Ratings = DimensionValues<f64>;

/// Ratings collected mid-conversation. `None` means unknown, not zero.
pub type RatingsOptional = DimensionValues<Option<f64>>;

impl RatingsOptional {
    pub fn from_ratings(ratings: &Ratings) -> Self {
        ratings.map(|_, value| Some(value))
    }
}

/// Complete input for the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Facts {
    pub weights: Weights,
    pub option_ratings: BTreeMap<String, Ratings>,
}

/// Facts gathered so far while a questionnaire is in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialFacts {
    #[serde(default)]
    pub weights: Option<Weights>,
    #[serde(default)]
    pub option_ratings: Option<BTreeMap<String, RatingsOptional>>,
}

/// Caller-held conversation snapshot. Every transition returns a fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationState {
    /// Kept as a raw integer so out-of-range rounds surface as invalid state.
    pub round: i64,
    #[serde(default)]
    pub facts: PartialFacts,
    /// Opaque caller metadata, passed through untouched.
    #[serde(default)]
    pub draft_meta: serde_json::Map<String, serde_json::Value>,
}

/// Qualitative label derived from the gap between the top two scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Scored entry for a single option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionScore {
    pub option: String,
    pub score: f64,
    pub contributions: DimensionValues<f64>,
    pub ratings: Ratings,
}

/// Full scoring trail. `per_option` is sorted by score, highest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreBreakdown {
    pub scale: String,
    pub dimensions: Vec<Dimension>,
    pub weights: DimensionValues<f64>,
    pub per_option: Vec<OptionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Decision {
    pub best_option: String,
    pub score_breakdown: ScoreBreakdown,
    pub assumptions: Vec<String>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    Default,
}

/// Audit entry for a rating that was missing at scoring time and filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionRecord {
    pub option: String,
    pub dimension: Dimension,
    pub filled_value: f64,
    pub source: CompletionSource,
}
