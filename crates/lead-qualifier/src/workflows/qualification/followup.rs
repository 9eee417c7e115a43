use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::domain::{LeadCategory, LeadRecord, QualificationResult};
use super::evaluation::ResultSource;
use crate::config::FollowUpRouting;

pub const NOTICE_VERSION: &str = "1.0";

/// Payload handed to the downstream follow-up automation once a lead is scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowUpNotice {
    pub lead: NoticeLead,
    pub followup: FollowUpPlan,
    pub system: NoticeSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub score: u8,
    pub category: LeadCategory,
    pub reason: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpPlan {
    pub needs_immediate: bool,
    pub next_action_date: DateTime<Utc>,
    pub assigned_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeSystem {
    pub source: String,
    pub qualified_by: ResultSource,
    pub version: &'static str,
}

impl FollowUpNotice {
    pub fn for_result(
        lead: &LeadRecord,
        result: &QualificationResult,
        qualified_by: ResultSource,
        routing: &FollowUpRouting,
        now: DateTime<Utc>,
    ) -> Self {
        let assigned_to = match result.category {
            LeadCategory::Hot | LeadCategory::Warm => routing.sales_assignee.clone(),
            LeadCategory::Cold => routing.nurture_assignee.clone(),
        };

        Self {
            lead: NoticeLead {
                name: lead.name.clone(),
                email: lead.email.clone(),
                phone: lead.phone.clone(),
                company: lead.company.clone(),
                message: lead.message.clone(),
                score: result.score,
                category: result.category,
                reason: result.reason.clone(),
                action: result.action.clone(),
            },
            followup: FollowUpPlan {
                needs_immediate: result.category == LeadCategory::Hot,
                next_action_date: now + follow_up_window(result.category),
                assigned_to,
            },
            system: NoticeSystem {
                source: lead.source.clone(),
                qualified_by,
                version: NOTICE_VERSION,
            },
        }
    }
}

/// Time until the next touch, matching each category's action text.
pub fn follow_up_window(category: LeadCategory) -> Duration {
    match category {
        LeadCategory::Hot => Duration::hours(2),
        LeadCategory::Warm => Duration::hours(24),
        LeadCategory::Cold => Duration::days(7),
    }
}

/// Outbound hook for scored leads (webhook relays, CRM adapters, queues).
pub trait FollowUpPublisher: Send + Sync {
    fn publish(&self, notice: &FollowUpNotice) -> Result<(), FollowUpError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FollowUpError {
    #[error("follow-up transport unavailable: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 8, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn hot_leads_need_immediate_sales_follow_up() {
        let lead = LeadRecord {
            name: "Executive Buyer".to_string(),
            ..LeadRecord::default()
        };
        let result = QualificationResult::from_score(9, "decision maker with budget");

        let notice = FollowUpNotice::for_result(
            &lead,
            &result,
            ResultSource::Rules,
            &FollowUpRouting::default(),
            now(),
        );

        assert!(notice.followup.needs_immediate);
        assert_eq!(notice.followup.assigned_to, "sales@example.com");
        assert_eq!(notice.followup.next_action_date, now() + Duration::hours(2));
        assert_eq!(notice.system.source, "Web Form");
    }

    #[test]
    fn cold_leads_go_to_nurture_in_a_week() {
        let result = QualificationResult::from_score(2, "generic request");
        let notice = FollowUpNotice::for_result(
            &LeadRecord::default(),
            &result,
            ResultSource::Model,
            &FollowUpRouting::default(),
            now(),
        );

        assert!(!notice.followup.needs_immediate);
        assert_eq!(notice.followup.assigned_to, "marketing@example.com");
        assert_eq!(notice.followup.next_action_date, now() + Duration::days(7));
    }

    #[test]
    fn notice_serializes_with_webhook_field_names() {
        let result = QualificationResult::from_score(6, "interested");
        let notice = FollowUpNotice::for_result(
            &LeadRecord::default(),
            &result,
            ResultSource::Model,
            &FollowUpRouting::default(),
            now(),
        );

        let json = serde_json::to_value(&notice).expect("serializes");
        assert_eq!(json["lead"]["category"], "WARM");
        assert_eq!(json["followup"]["needsImmediate"], false);
        assert_eq!(json["followup"]["assignedTo"], "sales@example.com");
        assert_eq!(json["system"]["qualifiedBy"], "model");
        assert_eq!(json["system"]["version"], NOTICE_VERSION);
    }
}
