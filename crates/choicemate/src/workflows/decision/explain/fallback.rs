use super::{ExplainRequest, ExplainResponse};
use crate::workflows::decision::engine::round_to;
use crate::workflows::decision::domain::{Dimension, OptionScore};

const TOP_DRIVERS: usize = 2;

/// Templated explanation built only from the score breakdown.
pub fn fallback_explanation(request: &ExplainRequest) -> ExplainResponse {
    let per_option = &request.decision.score_breakdown.per_option;

    let Some(best) = per_option.first() else {
        return ExplainResponse {
            explanation: format!("综合权重与评分，推荐选择 {}。", request.decision.best_option),
            highlights: vec![format!("最佳选项：{}", request.decision.best_option)],
            followups: followups(),
        };
    };

    let drivers = top_drivers(best)
        .iter()
        .map(|(dimension, value)| format!("{}({:?})", dimension.key(), value))
        .collect::<Vec<_>>()
        .join("、");

    let gap_text = per_option
        .get(1)
        .map(|runner_up| {
            let gap = round_to(best.score - runner_up.score, 2);
            format!("领先第二名约 {gap:?} 分。")
        })
        .unwrap_or_default();

    let explanation = format!(
        "综合权重与评分，{} 得分最高（{:?}）。主要贡献来自 {}。{}",
        best.option, best.score, drivers, gap_text
    );

    let mut highlights = vec![
        format!("最佳选项：{}（{:?}）", best.option, best.score),
        format!("主要驱动维度：{drivers}"),
    ];
    if !request.assumptions.is_empty() {
        highlights.push("存在默认补全的评分，已作为假设纳入计算。".to_string());
    }

    ExplainResponse {
        explanation,
        highlights,
        followups: followups(),
    }
}

/// Largest contributions first; equal values keep dimension order.
fn top_drivers(entry: &OptionScore) -> Vec<(Dimension, f64)> {
    let mut contributions: Vec<(Dimension, f64)> = entry.contributions.iter().collect();
    contributions.sort_by(|left, right| right.1.total_cmp(&left.1));
    contributions.truncate(TOP_DRIVERS);
    contributions
}

fn followups() -> Vec<String> {
    vec![
        "若你补充更准确的评分，结果会更稳健。".to_string(),
        "是否需要针对某个维度进行敏感性分析？".to_string(),
    ]
}
