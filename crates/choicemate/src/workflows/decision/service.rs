use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Decision, Facts};
use super::engine::{self, DecisionError};
use super::explain::{ExplainRequest, ExplainResponse, Explainer, NarrativeClient};
use super::intake::{DecisionIntake, ValidationError};
use super::questionnaire::{
    self, QuestionnaireError, QuestionnaireRequest, QuestionnaireResponse,
};

/// Direct scoring request for callers that already hold complete facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecideRequest {
    pub problem: String,
    pub options: Vec<String>,
    pub facts: Facts,
}

/// Facade composing the questionnaire, the decision engine, and the explainer.
pub struct DecisionService<C> {
    explainer: Explainer<C>,
}

impl<C> DecisionService<C>
where
    C: NarrativeClient + 'static,
{
    pub fn new(explainer: Explainer<C>) -> Self {
        Self { explainer }
    }

    /// Advance a questionnaire conversation by one round.
    pub fn next_step(
        &self,
        request: &QuestionnaireRequest,
    ) -> Result<QuestionnaireResponse, DecisionServiceError> {
        let response = questionnaire::next_step(request)?;
        match &response.decision {
            Some(decision) => info!(
                round = response.round,
                best_option = %decision.best_option,
                confidence = decision.confidence.label(),
                defaults = response.completions.len(),
                "questionnaire decided"
            ),
            None => info!(round = response.round, "questionnaire advanced"),
        }
        Ok(response)
    }

    /// Score complete facts without going through the questionnaire.
    pub fn decide(&self, request: &DecideRequest) -> Result<Decision, DecisionServiceError> {
        let intake = DecisionIntake::new(&request.problem, &request.options)?;
        intake.require_ratings_for(&request.facts.option_ratings)?;

        let decision = engine::decide(&request.facts, &intake.options)?;
        info!(
            best_option = %decision.best_option,
            confidence = decision.confidence.label(),
            options = intake.options.len(),
            "decision computed"
        );
        Ok(decision)
    }

    pub async fn explain(&self, request: &ExplainRequest) -> ExplainResponse {
        self.explainer.explain(request).await
    }
}

/// Error raised by the decision service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid conversation state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Contract(#[from] DecisionError),
}

impl DecisionServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            DecisionServiceError::Validation(_) | DecisionServiceError::InvalidState(_) => {
                StatusCode::BAD_REQUEST
            }
            DecisionServiceError::Contract(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DecisionServiceError::Validation(_) => "validation",
            DecisionServiceError::InvalidState(_) => "invalid_state",
            DecisionServiceError::Contract(_) => "decision",
        }
    }
}

impl From<QuestionnaireError> for DecisionServiceError {
    fn from(value: QuestionnaireError) -> Self {
        match value {
            QuestionnaireError::Validation(err) => Self::Validation(err),
            QuestionnaireError::InvalidState(reason) => Self::InvalidState(reason),
        }
    }
}
