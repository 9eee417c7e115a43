//! Inbound lead qualification: rule scoring, model-output recovery, and the take-the-max
//! combination that decides the final HOT/WARM/COLD routing.

pub mod domain;
pub(crate) mod evaluation;
pub mod extraction;
pub mod followup;
pub mod intake;
pub mod model;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    clamp_score, LeadCategory, LeadRecord, QualificationResult, ScoreBreakdown, DEFAULT_SCORE,
    DEFAULT_SOURCE, MAX_SCORE, MIN_SCORE,
};
pub use evaluation::{
    combine_results, combine_with_source, ResultSource, RubricConfig, RuleEvaluation,
    RuleScorer, ScoreComponent, ScoreDimension, ScoringError,
};
pub use extraction::{extract_score, Extraction, ExtractionMethod, TextFallbackExtractor};
pub use followup::{FollowUpError, FollowUpNotice, FollowUpPublisher};
pub use intake::{read_csv, IntakeError, LeadSubmission};
pub use model::ModelOutputInterpreter;
pub use router::qualification_router;
pub use service::{LeadQualificationService, QualifiedLead};
