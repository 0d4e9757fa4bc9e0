//! Weighted multi-dimension scoring.
//!
//! Everything here is a pure function of its inputs: weights are clamped and
//! normalized once, every option is scored against them, the scores are ranked,
//! and the lead of the winner decides the confidence label.

mod confidence;
mod scoring;

pub use confidence::{confidence_from_gap, HIGH_CONFIDENCE_GAP, MEDIUM_CONFIDENCE_GAP};
pub use scoring::{
    normalize_weights, rank, score, utility, NormalizedWeights, RATING_MAX, RATING_MIN, SCORE_MAX,
};

use super::domain::{Decision, Dimension, Facts, OptionScore, ScoreBreakdown};
pub(crate) use scoring::round_to;

pub const SCORE_SCALE: &str = "0-100";

/// Contract violations; the questionnaire and the decide endpoint rule these out upstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error("no options to decide between")]
    NoOptions,
    #[error("option '{option}' has no ratings")]
    MissingRatings { option: String },
}

/// Scores `options` against `facts` and picks the best one.
///
/// The returned decision carries no assumptions; callers that filled in
/// defaults attach their own.
pub fn decide(facts: &Facts, options: &[String]) -> Result<Decision, DecisionError> {
    if options.is_empty() {
        return Err(DecisionError::NoOptions);
    }

    let weights = normalize_weights(&facts.weights);

    let mut per_option = options
        .iter()
        .map(|option| {
            let ratings = facts
                .option_ratings
                .get(option)
                .ok_or_else(|| DecisionError::MissingRatings {
                    option: option.clone(),
                })?;
            let (total, contributions) = score(ratings, &weights);
            Ok(OptionScore {
                option: option.clone(),
                score: total,
                contributions,
                ratings: *ratings,
            })
        })
        .collect::<Result<Vec<_>, DecisionError>>()?;

    rank(&mut per_option);
    let confidence = confidence_from_gap(&per_option);
    let best_option = per_option[0].option.clone();

    Ok(Decision {
        best_option,
        score_breakdown: ScoreBreakdown {
            scale: SCORE_SCALE.to_string(),
            dimensions: Dimension::ALL.to_vec(),
            weights: weights.map(|_, value| round_to(value, 4)),
            per_option,
        },
        assumptions: Vec::new(),
        confidence,
    })
}
