use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{LeadRecord, QualificationResult};
use super::evaluation::{combine_with_source, ResultSource, RubricConfig, RuleScorer};
use super::followup::{FollowUpNotice, FollowUpPublisher};
use super::intake::LeadSubmission;
use super::model::ModelOutputInterpreter;
use crate::config::FollowUpRouting;

/// Facade composing the rule scorer, model-output recovery, and follow-up routing.
pub struct LeadQualificationService<P> {
    scorer: RuleScorer,
    interpreter: ModelOutputInterpreter,
    publisher: Arc<P>,
    routing: FollowUpRouting,
}

/// Everything known about a lead once it has been qualified.
#[derive(Debug, Clone, Serialize)]
pub struct QualifiedLead {
    pub lead: LeadRecord,
    pub result: QualificationResult,
    pub source: ResultSource,
    pub follow_up: FollowUpNotice,
    /// False when the follow-up publisher rejected the notice.
    pub delivered: bool,
}

impl<P> LeadQualificationService<P>
where
    P: FollowUpPublisher + 'static,
{
    pub fn new(publisher: Arc<P>, rubric: RubricConfig, routing: FollowUpRouting) -> Self {
        Self {
            scorer: RuleScorer::new(rubric),
            interpreter: ModelOutputInterpreter::new(),
            publisher,
            routing,
        }
    }

    /// Combine the rule score with whatever the model produced, without side effects.
    pub fn score(
        &self,
        lead: &LeadRecord,
        model_output: Option<&str>,
    ) -> (QualificationResult, ResultSource) {
        let rules = self.scorer.score(lead);
        let model = self.interpreter.interpret(model_output);
        combine_with_source(model, rules)
    }

    pub fn qualify(&self, submission: LeadSubmission) -> QualifiedLead {
        self.qualify_at(submission, Utc::now())
    }

    /// Qualify a lead and hand the follow-up notice to the publisher.
    ///
    /// Publisher failures are logged and reported through `delivered`; they never change the
    /// qualification itself.
    pub fn qualify_at(&self, submission: LeadSubmission, now: DateTime<Utc>) -> QualifiedLead {
        let LeadSubmission { lead, model_output } = submission;
        let (result, source) = self.score(&lead, model_output.as_deref());

        info!(
            name = %lead.name,
            source = %lead.source,
            score = result.score,
            category = %result.category,
            qualified_by = ?source,
            "lead qualified"
        );

        let follow_up = FollowUpNotice::for_result(&lead, &result, source, &self.routing, now);
        let delivered = match self.publisher.publish(&follow_up) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "follow-up notice not delivered");
                false
            }
        };

        QualifiedLead {
            lead,
            result,
            source,
            follow_up,
            delivered,
        }
    }
}
