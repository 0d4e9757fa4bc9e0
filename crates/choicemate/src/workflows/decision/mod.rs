//! Weighted option scoring driven by a three-round questionnaire.

pub mod domain;
pub mod engine;
pub mod explain;
pub mod intake;
pub mod questionnaire;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CompletionRecord, CompletionSource, Confidence, ConversationState, Decision, Dimension,
    DimensionValues, Facts, OptionScore, PartialFacts, Polarity, Ratings, RatingsOptional,
    ScoreBreakdown, Weights,
};
pub use engine::{decide, DecisionError};
pub use explain::{
    ChatCompletionsClient, ExplainRequest, ExplainResponse, Explainer, NarrativeClient,
};
pub use intake::{DecisionIntake, ValidationError};
pub use questionnaire::{
    next_step, Question, QuestionnaireError, QuestionnaireRequest, QuestionnaireResponse, Round,
};
pub use router::decision_router;
pub use service::{DecideRequest, DecisionService, DecisionServiceError};
