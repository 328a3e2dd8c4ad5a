use reqwest::Method;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dto::candidate_dto::{CandidateListResponse, CandidateRow, InterviewSlot};
use crate::dto::common_dto::{BackendAck, Notice};
use crate::error::{Error, Result};
use crate::gateway::{decode, ensure_success, Gateway};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::session::DashboardSession;
use crate::stores::{CandidateFilter, RosterStore};

/// Accepts a bare array or a paginated `{results: [...]}` envelope.
pub(crate) fn decode_list<T: serde::de::DeserializeOwned>(body: JsonValue) -> Result<Vec<T>> {
    match body {
        JsonValue::Array(_) => decode(body),
        JsonValue::Object(mut map) => match map.remove("results") {
            Some(results) => decode(results),
            None => Err(Error::api(502, "Unexpected list payload from backend")),
        },
        JsonValue::Null => Ok(Vec::new()),
        _ => Err(Error::api(502, "Unexpected list payload from backend")),
    }
}

fn list_response(roster: &RosterStore) -> CandidateListResponse {
    let candidates: Vec<CandidateRow> = roster
        .visible()
        .into_iter()
        .map(|c| CandidateRow {
            displayed_status: roster.displayed_status(c),
            selected: roster.is_selected(c.id),
            candidate: c.clone(),
        })
        .collect();
    CandidateListResponse {
        total: candidates.len(),
        loaded: roster.len(),
        selected_ids: roster.selected_ids(),
        candidates,
    }
}

#[derive(Clone)]
pub struct CandidateService {
    gateway: Arc<dyn Gateway>,
    session: DashboardSession,
}

impl CandidateService {
    pub fn new(gateway: Arc<dyn Gateway>, session: DashboardSession) -> Self {
        Self { gateway, session }
    }

    /// Fetches the full roster. A response that arrives after a newer one
    /// has already been applied is dropped.
    pub async fn reload(&self) -> Result<usize> {
        let ticket = self.session.roster.write().await.begin_load();
        let body = self
            .gateway
            .request(Method::GET, "/candidates/", None)
            .await?;
        let candidates: Vec<Candidate> = decode_list(body)?;
        let fetched = candidates.len();

        let mut roster = self.session.roster.write().await;
        if roster.apply_snapshot(ticket, candidates) {
            info!(count = fetched, "Candidate roster loaded");
        } else {
            debug!("Discarded stale candidate snapshot");
        }
        Ok(roster.len())
    }

    /// Re-fetch after a successful mutation. The mutation already landed,
    /// so a failed refresh is logged rather than reported as a failure.
    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.reload().await {
            warn!("Failed to refresh candidates: {}", e);
        }
    }

    pub async fn view(&self, filter: Option<CandidateFilter>) -> CandidateListResponse {
        match filter {
            Some(filter) => {
                let mut roster = self.session.roster.write().await;
                roster.apply_filter(filter);
                list_response(&roster)
            }
            None => list_response(&*self.session.roster.read().await),
        }
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Candidate> {
        let body = self
            .gateway
            .request(Method::GET, &format!("/candidates/{}/", id), None)
            .await
            .map_err(|e| match e {
                Error::Api { status: 404, .. } => {
                    Error::NotFound(format!("Candidate {} not found", id))
                }
                other => other,
            })?;
        decode(body)
    }

    pub async fn shortlisted(&self) -> Result<Vec<Candidate>> {
        let body = self
            .gateway
            .request(Method::GET, "/candidates/shortlisted/", None)
            .await?;
        decode_list(body)
    }

    /// The row shows `status` while the PATCH is in flight and falls back to
    /// the snapshot value if it fails.
    pub async fn update_status(&self, id: i64, status: &str) -> Result<Notice> {
        let requested: CandidateStatus = status.parse().map_err(Error::BadRequest)?;
        let previous = self
            .session
            .roster
            .write()
            .await
            .begin_status_change(id, requested)
            .ok_or_else(|| Error::NotFound(format!("Candidate {} is not loaded", id)))?;

        let result = self
            .gateway
            .request(
                Method::PATCH,
                &format!("/candidates/{}/update_status/", id),
                Some(json!({ "status": requested })),
            )
            .await
            .and_then(|body| ensure_success(body, "Failed to update status"));

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                self.session.roster.write().await.finish_status_change(id, requested);
                warn!(id, from = %previous, to = %requested, "Status update failed: {}", e);
                return Err(e);
            }
        };

        self.refresh_after_mutation().await;
        self.session.roster.write().await.finish_status_change(id, requested);

        let ack: BackendAck = decode(body).unwrap_or_default();
        info!(id, from = %previous, to = %requested, "Candidate status updated");
        Ok(Notice::success(
            ack.summary(&format!("Status updated to {}", requested)),
        ))
    }

    pub async fn notify(&self, id: i64, slot: &InterviewSlot) -> Result<Notice> {
        let body = self
            .gateway
            .request(
                Method::POST,
                &format!("/candidates/{}/send_notification/", id),
                Some(serde_json::to_value(slot)?),
            )
            .await?;
        let body = ensure_success(body, "Failed to send notification")?;
        self.refresh_after_mutation().await;

        let ack: BackendAck = decode(body).unwrap_or_default();
        info!(id, "Interview notification sent");
        Ok(Notice::success(ack.summary("Notification sent")))
    }

    pub async fn delete(&self, id: i64) -> Result<Notice> {
        let body = self
            .gateway
            .request(
                Method::DELETE,
                &format!("/candidates/{}/delete_candidate/", id),
                None,
            )
            .await?;
        let body = ensure_success(body, "Failed to delete candidate")?;
        self.refresh_after_mutation().await;

        let ack: BackendAck = decode(body).unwrap_or_default();
        info!(id, "Candidate deleted");
        Ok(Notice::success(ack.summary("Candidate deleted")))
    }

    pub async fn toggle(&self, id: i64) -> Result<Vec<i64>> {
        let mut roster = self.session.roster.write().await;
        if roster.get(id).is_none() {
            return Err(Error::NotFound(format!("Candidate {} is not loaded", id)));
        }
        roster.toggle(id);
        Ok(roster.selected_ids())
    }

    pub async fn select_all(&self, checked: bool) -> Vec<i64> {
        let mut roster = self.session.roster.write().await;
        roster.select_all(checked);
        roster.selected_ids()
    }

    pub async fn clear_selection(&self) {
        self.session.roster.write().await.clear_selection();
    }

    pub async fn selected_ids(&self) -> Vec<i64> {
        self.session.roster.read().await.selected_ids()
    }
}
