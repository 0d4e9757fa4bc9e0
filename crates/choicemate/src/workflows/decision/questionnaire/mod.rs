//! Three-round questionnaire: weights, then ratings, then the decision.
//!
//! The machine holds no state of its own. Callers submit the `ConversationState`
//! returned by the previous step together with their latest answer, and every
//! step hands back a brand new state value.

mod answers;
mod completion;
mod templates;

pub use completion::DEFAULT_RATING;
pub use templates::{
    ratings_matrix_question, weights_sliders_question, DimensionLabel, Question, RatingDefaults,
    WeightSlider,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    CompletionRecord, ConversationState, Decision, Facts, PartialFacts, RatingsOptional,
};
use super::engine::{self, DecisionError};
use super::intake::{DecisionIntake, ValidationError};
use answers::{extract_option_ratings, extract_weights};
use completion::{complete_ratings, merge_option_ratings};

/// Protocol step encoded in `ConversationState::round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Weights = 1,
    Ratings = 2,
    Decided = 3,
}

impl Round {
    pub const fn number(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for Round {
    type Error = QuestionnaireError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::Weights),
            2 => Ok(Round::Ratings),
            3 => Ok(Round::Decided),
            other => Err(QuestionnaireError::InvalidState(format!(
                "round {other} is not one of 1, 2 or 3"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionnaireRequest {
    pub problem: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub state: Option<ConversationState>,
    #[serde(default)]
    pub last_answer: Option<serde_json::Value>,
}

/// Step result. `question` is set for rounds 1 and 2, `decision` only for round 3.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireResponse {
    pub round: i64,
    pub question: Option<Question>,
    pub state: ConversationState,
    pub decision: Option<Decision>,
    #[serde(rename = "facts_completion")]
    pub completions: Vec<CompletionRecord>,
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid conversation state: {0}")]
    InvalidState(String),
}

impl From<DecisionError> for QuestionnaireError {
    fn from(value: DecisionError) -> Self {
        Self::InvalidState(value.to_string())
    }
}

/// Advances the conversation by one round.
pub fn next_step(request: &QuestionnaireRequest) -> Result<QuestionnaireResponse, QuestionnaireError> {
    let intake = DecisionIntake::new(&request.problem, &request.options)?;

    let Some(state) = &request.state else {
        return Ok(start());
    };

    match Round::try_from(state.round)? {
        Round::Weights => collect_weights(state, request.last_answer.as_ref(), &intake),
        Round::Ratings => decide_from_ratings(state, request.last_answer.as_ref(), &intake),
        Round::Decided => Err(QuestionnaireError::InvalidState(
            "round 3 is final; start a new conversation".to_string(),
        )),
    }
}

fn start() -> QuestionnaireResponse {
    QuestionnaireResponse {
        round: Round::Weights.number(),
        question: Some(weights_sliders_question()),
        state: ConversationState {
            round: Round::Weights.number(),
            facts: PartialFacts::default(),
            draft_meta: serde_json::Map::new(),
        },
        decision: None,
        completions: Vec::new(),
        assumptions: Vec::new(),
    }
}

fn collect_weights(
    state: &ConversationState,
    last_answer: Option<&serde_json::Value>,
    intake: &DecisionIntake,
) -> Result<QuestionnaireResponse, QuestionnaireError> {
    let weights = extract_weights(last_answer)?;
    debug!(options = intake.options.len(), "weights collected");

    Ok(QuestionnaireResponse {
        round: Round::Ratings.number(),
        question: Some(ratings_matrix_question(&intake.options)),
        state: ConversationState {
            round: Round::Ratings.number(),
            facts: PartialFacts {
                weights: Some(weights),
                option_ratings: state.facts.option_ratings.clone(),
            },
            draft_meta: state.draft_meta.clone(),
        },
        decision: None,
        completions: Vec::new(),
        assumptions: Vec::new(),
    })
}

fn decide_from_ratings(
    state: &ConversationState,
    last_answer: Option<&serde_json::Value>,
    intake: &DecisionIntake,
) -> Result<QuestionnaireResponse, QuestionnaireError> {
    let weights = state.facts.weights.ok_or_else(|| {
        QuestionnaireError::InvalidState("round 2 requires weights from round 1".to_string())
    })?;

    let incoming = extract_option_ratings(last_answer)?;
    let merged = merge_option_ratings(state.facts.option_ratings.as_ref(), incoming);
    let completed = complete_ratings(&intake.options, &merged);
    debug!(
        options = intake.options.len(),
        defaults = completed.completions.len(),
        "ratings completed"
    );

    let facts = Facts {
        weights,
        option_ratings: completed.ratings,
    };
    let mut decision = engine::decide(&facts, &intake.options)?;
    decision.assumptions = completed.assumptions.clone();

    let snapshot = facts
        .option_ratings
        .iter()
        .map(|(option, ratings)| (option.clone(), RatingsOptional::from_ratings(ratings)))
        .collect();

    Ok(QuestionnaireResponse {
        round: Round::Decided.number(),
        question: None,
        state: ConversationState {
            round: Round::Decided.number(),
            facts: PartialFacts {
                weights: Some(weights),
                option_ratings: Some(snapshot),
            },
            draft_meta: state.draft_meta.clone(),
        },
        decision: Some(decision),
        completions: completed.completions,
        assumptions: completed.assumptions,
    })
}
