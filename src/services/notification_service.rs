use reqwest::Method;
use std::sync::Arc;
use tracing::{info, warn};

use super::candidate_service::CandidateService;
use crate::dto::common_dto::BackendAck;
use crate::dto::notification_dto::{
    AppointmentLetterPayload, AppointmentLetterRequest, BulkNotificationPayload,
    BulkNotificationRequest, BulkReport, RecipientMode,
};
use crate::error::{Error, Result};
use crate::gateway::{decode, ensure_success, Gateway};
use crate::models::candidate::Candidate;
use crate::session::DashboardSession;

pub const PREVIEW_LIMIT: usize = 10;

/// An empty `candidate_ids` means "top 10 shortlisted" to the backend, so an
/// empty explicit selection must never reach it.
pub fn build_bulk_payload(
    request: &BulkNotificationRequest,
    selected: Vec<i64>,
) -> Result<BulkNotificationPayload> {
    let candidate_ids = match request.recipients {
        RecipientMode::TopShortlisted => Vec::new(),
        RecipientMode::Selected if selected.is_empty() => {
            return Err(Error::BadRequest(
                "No candidates selected. Select candidates or send to the top 10 shortlisted"
                    .to_string(),
            ))
        }
        RecipientMode::Selected => selected,
    };
    Ok(BulkNotificationPayload {
        candidate_ids,
        date: request.date.trim().to_string(),
        time: request.time.trim().to_string(),
        location: request.location.trim().to_string(),
    })
}

pub fn eligible_for_appointment(shortlisted: Vec<Candidate>) -> Vec<Candidate> {
    shortlisted
        .into_iter()
        .filter(|c| !c.appointment_sent)
        .collect()
}

#[derive(Clone)]
pub struct NotificationService {
    gateway: Arc<dyn Gateway>,
    session: DashboardSession,
    candidates: CandidateService,
}

impl NotificationService {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        session: DashboardSession,
        candidates: CandidateService,
    ) -> Self {
        Self {
            gateway,
            session,
            candidates,
        }
    }

    /// The shortlisted candidates a "top 10" send would reach.
    pub async fn preview(&self) -> Result<Vec<Candidate>> {
        let mut shortlisted = self.candidates.shortlisted().await?;
        shortlisted.truncate(PREVIEW_LIMIT);
        Ok(shortlisted)
    }

    pub async fn send_bulk(&self, request: &BulkNotificationRequest) -> Result<BulkReport> {
        let selected = self.session.roster.read().await.selected_ids();
        let payload = build_bulk_payload(request, selected)?;
        let recipients = payload.candidate_ids.len();

        let body = self
            .gateway
            .request(
                Method::POST,
                "/send-notifications/",
                Some(serde_json::to_value(&payload)?),
            )
            .await?;
        let report: BulkReport = decode(ensure_success(body, "Failed to send notifications")?)?;
        info!(
            recipients,
            sent = report.success_count,
            failed = report.failed_count,
            "Bulk notifications processed"
        );

        if report.success_count > 0 {
            self.refresh_roster().await;
        }
        Ok(report)
    }

    pub async fn eligible(&self) -> Result<Vec<Candidate>> {
        Ok(eligible_for_appointment(self.candidates.shortlisted().await?))
    }

    /// One request per candidate; a failure for one does not stop the rest.
    pub async fn send_appointment_letters(
        &self,
        request: &AppointmentLetterRequest,
    ) -> Result<BulkReport> {
        let ids: Vec<i64> = if request.select_all_eligible {
            self.eligible().await?.into_iter().map(|c| c.id).collect()
        } else {
            request.candidate_ids.clone()
        };
        if ids.is_empty() {
            return Err(Error::BadRequest(
                "Select at least one candidate to send appointment letters".to_string(),
            ));
        }

        let payload = serde_json::to_value(AppointmentLetterPayload::from(request))?;
        let mut report = BulkReport::default();

        for id in ids {
            let result = self
                .gateway
                .request(
                    Method::POST,
                    &format!("/candidates/{}/send_appointment_letter/", id),
                    Some(payload.clone()),
                )
                .await
                .and_then(decode::<BackendAck>);

            match result {
                Ok(ack) if ack.success => report.record_success(ack.messages),
                Ok(ack) => report.record_failure(format!(
                    "Failed for candidate ID {}: {}",
                    id,
                    ack.summary("unknown error")
                )),
                Err(e) => {
                    warn!(id, "Appointment letter request failed: {}", e);
                    report.record_failure(format!("Error for candidate ID {}: {}", id, e));
                }
            }
        }

        info!(
            sent = report.success_count,
            failed = report.failed_count,
            "Appointment letters processed"
        );
        if report.success_count > 0 {
            self.refresh_roster().await;
        }
        Ok(report)
    }

    async fn refresh_roster(&self) {
        if let Err(e) = self.candidates.reload().await {
            warn!("Failed to refresh candidates: {}", e);
        }
    }
}
