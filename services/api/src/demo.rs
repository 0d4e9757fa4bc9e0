use choicemate::error::AppError;
use choicemate::workflows::decision::{
    ChatCompletionsClient, CompletionRecord, ConversationState, DecideRequest, Decision,
    DecisionService, ExplainRequest, Explainer, Facts, QuestionnaireRequest,
    QuestionnaireResponse,
};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

const DEMO_PROBLEM: &str = "去哪工作";
const DEMO_OPTIONS: [&str; 2] = ["A公司", "B公司"];

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// JSON file holding `{"weights": {...}, "option_ratings": {...}}`
    #[arg(long)]
    pub(crate) facts: PathBuf,
    /// Option to score; repeat for each option in display order
    #[arg(long = "option", required = true)]
    pub(crate) options: Vec<String>,
    /// Problem statement recorded with the decision
    #[arg(long, default_value = "command line decision")]
    pub(crate) problem: String,
}

pub(crate) async fn run_demo() -> Result<(), AppError> {
    let service = DecisionService::<ChatCompletionsClient>::new(Explainer::offline());
    let options: Vec<String> = DEMO_OPTIONS.iter().map(|name| name.to_string()).collect();

    println!("ChoiceMate questionnaire demo");
    println!("Problem: {DEMO_PROBLEM} | options: {}", options.join(", "));

    let first = service.next_step(&demo_request(&options, None, None))?;
    println!("\nRound {}: weights sliders", first.round);

    let second = service.next_step(&demo_request(
        &options,
        Some(first.state),
        Some(json!({"weights": {"impact": 4, "cost": 2, "risk": 3, "reversibility": 1}})),
    ))?;
    println!("Round {}: ratings matrix (A公司 leaves cost blank)", second.round);

    let third = service.next_step(&demo_request(
        &options,
        Some(second.state),
        Some(json!({
            "option_ratings": {
                "A公司": {"impact": 4, "cost": null, "risk": 2, "reversibility": 3},
                "B公司": {"impact": 3, "cost": 2, "risk": 4, "reversibility": 2}
            }
        })),
    ))?;

    let Some(decision) = third.decision.as_ref() else {
        println!("Questionnaire ended without a decision");
        return Ok(());
    };
    println!("Round {}: decision ready", third.round);
    render_decision(decision);
    render_completions(&third.completions, &third.assumptions);

    let explanation = service.explain(&explain_request(&options, &third, decision)).await;
    println!("\nExplanation");
    println!("  {}", explanation.explanation);
    for highlight in &explanation.highlights {
        println!("  - {highlight}");
    }
    println!("Follow-ups:");
    for followup in &explanation.followups {
        println!("  - {followup}");
    }

    Ok(())
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let DecideArgs {
        facts,
        options,
        problem,
    } = args;

    let raw = std::fs::read_to_string(&facts)?;
    let facts: Facts = serde_json::from_str(&raw)?;

    let service = DecisionService::<ChatCompletionsClient>::new(Explainer::offline());
    let decision = service.decide(&DecideRequest {
        problem,
        options,
        facts,
    })?;

    render_decision(&decision);
    Ok(())
}

fn demo_request(
    options: &[String],
    state: Option<ConversationState>,
    last_answer: Option<Value>,
) -> QuestionnaireRequest {
    QuestionnaireRequest {
        problem: DEMO_PROBLEM.to_string(),
        options: options.to_vec(),
        state,
        last_answer,
    }
}

fn explain_request(
    options: &[String],
    response: &QuestionnaireResponse,
    decision: &Decision,
) -> ExplainRequest {
    let facts = Facts {
        weights: response.state.facts.weights.unwrap_or_default(),
        option_ratings: decision
            .score_breakdown
            .per_option
            .iter()
            .map(|entry| (entry.option.clone(), entry.ratings))
            .collect(),
    };

    ExplainRequest {
        problem: DEMO_PROBLEM.to_string(),
        options: options.to_vec(),
        facts,
        decision: decision.clone(),
        completions: response.completions.clone(),
        assumptions: response.assumptions.clone(),
        messages: Vec::new(),
        style: None,
    }
}

fn render_decision(decision: &Decision) {
    let breakdown = &decision.score_breakdown;
    println!(
        "\nBest option: {} ({} confidence)",
        decision.best_option,
        decision.confidence.label()
    );
    println!(
        "Normalized weights: impact {} | cost {} | risk {} | reversibility {}",
        breakdown.weights.impact,
        breakdown.weights.cost,
        breakdown.weights.risk,
        breakdown.weights.reversibility
    );
    println!("Scores ({} scale):", breakdown.scale);
    for entry in &breakdown.per_option {
        let contributions: Vec<String> = entry
            .contributions
            .iter()
            .map(|(dimension, value)| format!("{} {value}", dimension.key()))
            .collect();
        println!(
            "  - {}: {} [{}]",
            entry.option,
            entry.score,
            contributions.join(", ")
        );
    }
}

fn render_completions(completions: &[CompletionRecord], assumptions: &[String]) {
    if completions.is_empty() {
        println!("No ratings needed defaults");
        return;
    }

    println!("Defaulted ratings:");
    for record in completions {
        println!(
            "  - {} / {} -> {}",
            record.option,
            record.dimension.key(),
            record.filled_value
        );
    }
    for assumption in assumptions {
        println!("  * {assumption}");
    }
}
