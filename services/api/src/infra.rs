use lead_qualifier::config::FollowUpRouting;
use lead_qualifier::workflows::qualification::{
    FollowUpError, FollowUpNotice, FollowUpPublisher, LeadQualificationService, RubricConfig,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Most recent notices retained by the in-process publisher.
pub(crate) const NOTICE_BUFFER_LIMIT: usize = 256;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps the latest follow-up notices in process until a CRM or webhook relay is wired in.
/// Once `limit` is reached the oldest notice is dropped.
#[derive(Clone)]
pub(crate) struct InMemoryFollowUpPublisher {
    notices: Arc<Mutex<VecDeque<FollowUpNotice>>>,
    limit: usize,
}

impl Default for InMemoryFollowUpPublisher {
    fn default() -> Self {
        Self::with_limit(NOTICE_BUFFER_LIMIT)
    }
}

impl FollowUpPublisher for InMemoryFollowUpPublisher {
    fn publish(&self, notice: &FollowUpNotice) -> Result<(), FollowUpError> {
        let mut guard = self
            .notices
            .lock()
            .map_err(|_| FollowUpError::Transport("notice buffer poisoned".to_string()))?;
        debug!(
            assigned_to = %notice.followup.assigned_to,
            needs_immediate = notice.followup.needs_immediate,
            "follow-up notice buffered"
        );
        if self.limit == 0 {
            return Ok(());
        }
        while guard.len() >= self.limit {
            guard.pop_front();
        }
        guard.push_back(notice.clone());
        Ok(())
    }
}

impl InMemoryFollowUpPublisher {
    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            notices: Arc::new(Mutex::new(VecDeque::with_capacity(
                limit.min(NOTICE_BUFFER_LIMIT),
            ))),
            limit,
        }
    }

    /// Buffered notices, oldest first.
    pub(crate) fn notices(&self) -> Vec<FollowUpNotice> {
        match self.notices.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

pub(crate) fn qualification_service(
    routing: FollowUpRouting,
) -> (
    Arc<LeadQualificationService<InMemoryFollowUpPublisher>>,
    Arc<InMemoryFollowUpPublisher>,
) {
    let publisher = Arc::new(InMemoryFollowUpPublisher::default());
    let service = Arc::new(LeadQualificationService::new(
        publisher.clone(),
        RubricConfig::default(),
        routing,
    ));
    (service, publisher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lead_qualifier::workflows::qualification::{
        LeadRecord, LeadSubmission, QualificationResult, ResultSource,
    };

    fn notice_for(name: &str) -> FollowUpNotice {
        let lead = LeadRecord {
            name: name.to_string(),
            ..LeadRecord::default()
        };
        let now = Utc
            .with_ymd_and_hms(2025, 4, 8, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        FollowUpNotice::for_result(
            &lead,
            &QualificationResult::from_score(6, "interested"),
            ResultSource::Rules,
            &FollowUpRouting::default(),
            now,
        )
    }

    #[test]
    fn buffer_drops_oldest_notice_at_limit() {
        let publisher = InMemoryFollowUpPublisher::with_limit(3);
        for index in 0..5 {
            publisher
                .publish(&notice_for(&format!("Lead {index}")))
                .expect("publish succeeds");
        }

        let names: Vec<String> = publisher
            .notices()
            .into_iter()
            .map(|notice| notice.lead.name)
            .collect();
        assert_eq!(names, vec!["Lead 2", "Lead 3", "Lead 4"]);
    }

    #[test]
    fn serve_wiring_stays_bounded() {
        let (service, publisher) = qualification_service(FollowUpRouting::default());
        for _ in 0..NOTICE_BUFFER_LIMIT + 10 {
            let qualified = service.qualify(LeadSubmission {
                lead: LeadRecord::default(),
                model_output: None,
            });
            assert!(qualified.delivered);
        }
        assert_eq!(publisher.notices().len(), NOTICE_BUFFER_LIMIT);
    }
}
