use super::common::*;
use crate::config::FollowUpRouting;
use crate::workflows::qualification::{
    LeadCategory, LeadQualificationService, ResultSource, RubricConfig,
};
use chrono::Duration;
use std::sync::Arc;

#[test]
fn qualify_publishes_follow_up_for_hot_lead() {
    let (service, publisher) = build_service();

    let qualified = service.qualify_at(submission(executive_lead(), None), fixed_now());

    assert_eq!(qualified.result.score, 9);
    assert_eq!(qualified.source, ResultSource::Rules);
    assert!(qualified.delivered);

    let notices = publisher.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].followup.needs_immediate);
    assert_eq!(
        notices[0].followup.next_action_date,
        fixed_now() + Duration::hours(2)
    );
    assert_eq!(notices[0].system.source, "Web Form");
}

#[test]
fn higher_model_score_is_kept() {
    let (service, _) = build_service();
    let output = r#"{"score": 8, "reason": "Clear buying intent", "market_insights": "SaaS"}"#;

    let (result, source) = service.score(&browsing_lead(), Some(output));

    assert_eq!(source, ResultSource::Model);
    assert_eq!(result.score, 8);
    assert_eq!(result.category, LeadCategory::Hot);
    assert_eq!(result.reason, "Clear buying intent");
    assert_eq!(result.market_insights.as_deref(), Some("SaaS"));
}

#[test]
fn rules_outscore_a_timid_model() {
    let (service, _) = build_service();

    let (result, source) = service.score(&evaluating_lead(), Some(r#"{"score": 3}"#));

    assert_eq!(source, ResultSource::Rules);
    assert_eq!(result.score, 7);
}

#[test]
fn unstructured_model_text_is_recovered() {
    let (service, _) = build_service();

    let (result, source) =
        service.score(&browsing_lead(), Some("This is clearly a warm prospect."));

    assert_eq!(source, ResultSource::Model);
    assert_eq!(result.score, 6);
    assert!(result.reason.starts_with("Manual scoring"));
}

#[test]
fn cold_lead_routes_to_nurture_assignee() {
    let (service, publisher) = build_service();

    let qualified = service.qualify_at(submission(browsing_lead(), None), fixed_now());

    assert_eq!(qualified.result.category, LeadCategory::Cold);
    assert_eq!(
        qualified.follow_up.followup.assigned_to,
        FollowUpRouting::default().nurture_assignee
    );
    assert_eq!(publisher.notices().len(), 1);
}

#[test]
fn publisher_failure_does_not_change_the_result() {
    let service = LeadQualificationService::new(
        Arc::new(UnavailablePublisher),
        RubricConfig::default(),
        FollowUpRouting::default(),
    );

    let qualified = service.qualify_at(submission(evaluating_lead(), None), fixed_now());

    assert!(!qualified.delivered);
    assert_eq!(qualified.result.score, 7);
    assert_eq!(qualified.result.category, LeadCategory::Warm);
}
