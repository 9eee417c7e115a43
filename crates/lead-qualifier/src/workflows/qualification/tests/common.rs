use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::config::FollowUpRouting;
use crate::workflows::qualification::followup::{
    FollowUpError, FollowUpNotice, FollowUpPublisher,
};
use crate::workflows::qualification::{
    LeadQualificationService, LeadRecord, LeadSubmission, RubricConfig,
};

/// CTO with an explicit budget, urgent timeline, and quantified team size.
pub(super) fn executive_lead() -> LeadRecord {
    LeadRecord {
        name: "Sarah Johnson".to_string(),
        email: "sarah.johnson@techcorp.com".to_string(),
        phone: "+1-458-789-3456".to_string(),
        company: "TechCorp Solutions".to_string(),
        message: "I'm the CTO at TechCorp and we urgently need to implement your lead \
                  qualification system by next month. We have a budget of $50,000 for this \
                  project and we're evaluating 2-3 vendors this week. Our sales team of 35 \
                  people needs better qualification tools as we're getting 300+ leads weekly."
            .to_string(),
        source: "Web Form".to_string(),
    }
}

/// Mid-market prospect asking for pricing with a next-quarter horizon.
pub(super) fn evaluating_lead() -> LeadRecord {
    LeadRecord {
        name: "Michael Rodriguez".to_string(),
        email: "m.rodriguez@midmarket.co".to_string(),
        phone: "+1-332-555-7890".to_string(),
        company: "Midmarket Enterprises".to_string(),
        message: "We're looking to improve our lead qualification process. Your solution \
                  looks interesting. Could you provide some pricing information and case \
                  studies? We may implement something in the next quarter."
            .to_string(),
        source: "Web Form".to_string(),
    }
}

/// Personal address, placeholder company, no phone, generic request.
pub(super) fn browsing_lead() -> LeadRecord {
    LeadRecord {
        name: "John Smith".to_string(),
        email: "johnsmith@gmail.com".to_string(),
        phone: String::new(),
        company: "Unknown".to_string(),
        message: "Please send me more information about your services.".to_string(),
        source: "Web Form".to_string(),
    }
}

pub(super) fn submission(lead: LeadRecord, model_output: Option<&str>) -> LeadSubmission {
    LeadSubmission {
        lead,
        model_output: model_output.map(str::to_string),
    }
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 8, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (
    LeadQualificationService<MemoryPublisher>,
    Arc<MemoryPublisher>,
) {
    let publisher = Arc::new(MemoryPublisher::default());
    let service = LeadQualificationService::new(
        publisher.clone(),
        RubricConfig::default(),
        FollowUpRouting::default(),
    );
    (service, publisher)
}

#[derive(Default, Clone)]
pub(super) struct MemoryPublisher {
    notices: Arc<Mutex<Vec<FollowUpNotice>>>,
}

impl MemoryPublisher {
    pub(super) fn notices(&self) -> Vec<FollowUpNotice> {
        self.notices.lock().expect("publisher mutex poisoned").clone()
    }
}

impl FollowUpPublisher for MemoryPublisher {
    fn publish(&self, notice: &FollowUpNotice) -> Result<(), FollowUpError> {
        self.notices
            .lock()
            .expect("publisher mutex poisoned")
            .push(notice.clone());
        Ok(())
    }
}

pub(super) struct UnavailablePublisher;

impl FollowUpPublisher for UnavailablePublisher {
    fn publish(&self, _notice: &FollowUpNotice) -> Result<(), FollowUpError> {
        Err(FollowUpError::Transport("webhook offline".to_string()))
    }
}
