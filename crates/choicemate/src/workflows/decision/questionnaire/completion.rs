use std::collections::BTreeMap;

use super::super::domain::{CompletionRecord, CompletionSource, Dimension, Ratings, RatingsOptional};

/// Neutral rating used for any dimension still unknown at scoring time.
pub const DEFAULT_RATING: f64 = 3.0;

/// Ratings with every gap filled, plus the audit trail of what was filled.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompletedRatings {
    pub ratings: BTreeMap<String, Ratings>,
    pub completions: Vec<CompletionRecord>,
    pub assumptions: Vec<String>,
}

/// Overlays `incoming` onto `existing` per (option, dimension); unknown incoming values keep the prior value.
pub(crate) fn merge_option_ratings(
    existing: Option<&BTreeMap<String, RatingsOptional>>,
    incoming: BTreeMap<String, RatingsOptional>,
) -> BTreeMap<String, RatingsOptional> {
    let mut merged = existing.cloned().unwrap_or_default();
    for (option, ratings) in incoming {
        let entry = merged.entry(option).or_default();
        for (dimension, value) in ratings.iter() {
            if let Some(value) = value {
                entry.set(dimension, Some(value));
            }
        }
    }
    merged
}

/// Fills every unresolved dimension of every working option with [`DEFAULT_RATING`].
pub(crate) fn complete_ratings(
    options: &[String],
    merged: &BTreeMap<String, RatingsOptional>,
) -> CompletedRatings {
    let mut ratings = BTreeMap::new();
    let mut completions = Vec::new();
    let mut assumptions = Vec::new();

    for option in options {
        let known = merged.get(option).copied().unwrap_or_default();
        let filled = known.map(|dimension, value| match value {
            Some(value) => value,
            None => {
                completions.push(CompletionRecord {
                    option: option.clone(),
                    dimension,
                    filled_value: DEFAULT_RATING,
                    source: CompletionSource::Default,
                });
                assumptions.push(assumption_text(option, dimension));
                DEFAULT_RATING
            }
        });
        ratings.insert(option.clone(), filled);
    }

    CompletedRatings {
        ratings,
        completions,
        assumptions,
    }
}

fn assumption_text(option: &str, dimension: Dimension) -> String {
    format!(
        "你未填写「{option}」的 {}，我暂以中性值 3 作为假设。",
        dimension.key()
    )
}
