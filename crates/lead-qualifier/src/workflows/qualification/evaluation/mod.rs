mod config;
mod policy;
mod rules;

pub use config::RubricConfig;
pub use policy::{combine_results, combine_with_source, ResultSource};

use super::domain::{LeadRecord, QualificationResult, ScoreBreakdown};
use policy::decide_result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Deterministic scorer applying the rubric to a lead. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct RuleScorer {
    config: RubricConfig,
}

impl RuleScorer {
    pub fn new(config: RubricConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RubricConfig {
        &self.config
    }

    /// Score a lead, falling back to the safe default when scoring cannot complete.
    pub fn score(&self, lead: &LeadRecord) -> QualificationResult {
        match self.evaluate(lead) {
            Ok(evaluation) => evaluation.result,
            Err(err) => {
                warn!(error = %err, "rule scoring failed; using safe default");
                QualificationResult::safe_default(&err.to_string())
            }
        }
    }

    /// Full audit trail of the rule pass.
    pub fn evaluate(&self, lead: &LeadRecord) -> Result<RuleEvaluation, ScoringError> {
        let patterns = rules::rule_patterns()?;
        let (components, breakdown, signals) = rules::score_lead(lead, &self.config, patterns);
        let (result, override_applied) = decide_result(&breakdown, &signals, &self.config);

        Ok(RuleEvaluation {
            breakdown,
            components,
            override_applied,
            result,
        })
    }
}

/// Scoring dimension a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    Intent,
    Contact,
    Quality,
}

impl ScoreDimension {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreDimension::Intent => "intent",
            ScoreDimension::Contact => "contact",
            ScoreDimension::Quality => "quality",
        }
    }
}

/// Discrete awarded rule, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub dimension: ScoreDimension,
    pub points: f32,
    pub notes: String,
}

/// Outcome of the rule pass: the breakdown, each awarded rule, and the final result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEvaluation {
    pub breakdown: ScoreBreakdown,
    pub components: Vec<ScoreComponent>,
    pub override_applied: bool,
    pub result: QualificationResult,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ScoringError {
    #[error("rule patterns unavailable: {0}")]
    Patterns(String),
}
