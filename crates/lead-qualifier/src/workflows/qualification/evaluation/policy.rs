use super::super::domain::{
    LeadCategory, QualificationResult, ScoreBreakdown, DEFAULT_SCORE, MAX_SCORE, MIN_SCORE,
};
use super::config::RubricConfig;
use super::rules::ScoreSignals;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const OVERRIDE_SCORE: u8 = 9;
const OVERRIDE_INSIGHTS: &str = "Decision maker with an explicit budget and a detailed brief; \
route to senior sales for executive outreach.";

/// Turn the tallied breakdown into a result, applying the strong-signal override.
pub(crate) fn decide_result(
    breakdown: &ScoreBreakdown,
    signals: &ScoreSignals,
    config: &RubricConfig,
) -> (QualificationResult, bool) {
    let computed = breakdown.score();

    if signals.decision_maker
        && signals.budget
        && signals.message_chars > config.override_min_message_chars
    {
        info!(
            computed,
            forced = OVERRIDE_SCORE,
            "decision maker with budget; override applied"
        );
        let reason = format!(
            "Override: decision maker with explicit budget in a detailed message ({}) -> {}",
            breakdown.summary(computed),
            OVERRIDE_SCORE
        );
        let result = QualificationResult {
            score: OVERRIDE_SCORE,
            category: LeadCategory::Hot,
            reason,
            action: LeadCategory::Hot.action().to_string(),
            market_insights: Some(OVERRIDE_INSIGHTS.to_string()),
        };
        return (result, true);
    }

    let result = QualificationResult::from_score(computed, breakdown.summary(computed));
    (result, false)
}

/// Which path produced the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Rules,
    Model,
    Recovered,
}

/// Merge the model-derived result (if any) with the rule result.
///
/// The strictly higher score wins and ties keep the model result. Category and action are
/// re-derived from the winning score so they can never disagree with it.
pub fn combine_results(
    model: Option<QualificationResult>,
    rules: QualificationResult,
) -> QualificationResult {
    combine_with_source(model, rules).0
}

pub fn combine_with_source(
    model: Option<QualificationResult>,
    rules: QualificationResult,
) -> (QualificationResult, ResultSource) {
    let (chosen, source) = match model {
        Some(model) if !(MIN_SCORE..=MAX_SCORE).contains(&model.score) => {
            warn!(score = model.score, "model score out of range; using rule result");
            (rules, ResultSource::Rules)
        }
        Some(model) if model.score >= rules.score => {
            info!(
                model_score = model.score,
                rule_score = rules.score,
                "model result retained"
            );
            (realign(model), ResultSource::Model)
        }
        Some(model) => {
            info!(
                model_score = model.score,
                rule_score = rules.score,
                "rule result outscored model"
            );
            (rules, ResultSource::Rules)
        }
        None => (rules, ResultSource::Rules),
    };

    if chosen.score == 0 {
        warn!("final score was 0; recovering with default");
        let recovered = QualificationResult::from_score(
            DEFAULT_SCORE,
            "score recovered from 0: manual review recommended",
        );
        return (recovered, ResultSource::Recovered);
    }

    (chosen, source)
}

fn realign(mut result: QualificationResult) -> QualificationResult {
    result.category = LeadCategory::from_score(result.score);
    result.action = result.category.action().to_string();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(budget: bool, decision_maker: bool, message_chars: usize) -> ScoreSignals {
        ScoreSignals {
            budget,
            decision_maker,
            message_chars,
        }
    }

    #[test]
    fn override_forces_hot_even_below_computed_total() {
        let breakdown = ScoreBreakdown {
            intent_points: 4.0,
            contact_points: 3.0,
            quality_points: 3.0,
        };
        let (result, applied) =
            decide_result(&breakdown, &signals(true, true, 140), &RubricConfig::default());
        assert!(applied);
        assert_eq!(result.score, 9);
        assert_eq!(result.category, LeadCategory::Hot);
        assert!(result.reason.starts_with("Override"));
        assert!(result.market_insights.is_some());
    }

    #[test]
    fn override_needs_a_long_message() {
        let breakdown = ScoreBreakdown {
            intent_points: 3.5,
            ..ScoreBreakdown::default()
        };
        let (result, applied) =
            decide_result(&breakdown, &signals(true, true, 100), &RubricConfig::default());
        assert!(!applied);
        assert_eq!(result.score, 4);
        assert_eq!(result.category, LeadCategory::Cold);
        assert!(result.market_insights.is_none());
    }

    #[test]
    fn missing_model_result_uses_rules() {
        let rules = QualificationResult::from_score(3, "rules");
        assert_eq!(combine_results(None, rules.clone()), rules);
    }

    #[test]
    fn higher_rule_score_wins() {
        let model = QualificationResult::from_score(4, "model");
        let rules = QualificationResult::from_score(7, "rules");
        let combined = combine_results(Some(model), rules);
        assert_eq!(combined.score, 7);
        assert_eq!(combined.reason, "rules");
    }

    #[test]
    fn ties_keep_the_model_result() {
        let model = QualificationResult::from_score(6, "model");
        let rules = QualificationResult::from_score(6, "rules");
        let (combined, source) = combine_with_source(Some(model), rules);
        assert_eq!(combined.reason, "model");
        assert_eq!(source, ResultSource::Model);
    }

    #[test]
    fn zero_model_score_is_ignored() {
        let model = QualificationResult {
            score: 0,
            category: LeadCategory::Cold,
            reason: "model".to_string(),
            action: String::new(),
            market_insights: None,
        };
        let rules = QualificationResult::from_score(2, "rules");
        assert_eq!(combine_results(Some(model), rules).reason, "rules");
    }

    #[test]
    fn model_category_is_realigned_with_score() {
        let mut model = QualificationResult::from_score(9, "model");
        model.category = LeadCategory::Cold;
        model.action = "call whenever".to_string();
        let rules = QualificationResult::from_score(5, "rules");

        let combined = combine_results(Some(model), rules);
        assert_eq!(combined.category, LeadCategory::Hot);
        assert_eq!(combined.action, LeadCategory::Hot.action());
    }

    #[test]
    fn zero_final_score_recovers_to_warm() {
        let mut rules = QualificationResult::from_score(1, "rules");
        rules.score = 0;
        let (combined, source) = combine_with_source(None, rules);
        assert_eq!(source, ResultSource::Recovered);
        assert_eq!(combined.score, DEFAULT_SCORE);
        assert_eq!(combined.category, LeadCategory::Warm);
        assert!(combined.reason.contains("recovered"));
    }
}
