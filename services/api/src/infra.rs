use choicemate::config::LlmConfig;
use choicemate::workflows::decision::{ChatCompletionsClient, Explainer};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Explainer backed by the configured model, or the template when none is usable.
pub(crate) fn explainer_from_config(llm: Option<LlmConfig>) -> Explainer<ChatCompletionsClient> {
    let Some(llm) = llm else {
        info!("no language model configured; explanations use the template");
        return Explainer::offline();
    };

    let model = llm.model.clone();
    match ChatCompletionsClient::new(llm) {
        Ok(client) => {
            info!(%model, "language model explanations enabled");
            Explainer::new(Arc::new(client))
        }
        Err(err) => {
            warn!(error = %err, "language model client unavailable; using template");
            Explainer::offline()
        }
    }
}
