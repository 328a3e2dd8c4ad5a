use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dto::common_dto::Notice;
use crate::dto::email_dto::{EmailListResponse, EmailSnapshot, UpdateEmailsPayload};
use crate::error::{Error, Result};
use crate::gateway::{decode, ensure_success, Gateway};
use crate::models::email::EmailFlag;
use crate::session::DashboardSession;
use crate::stores::{BulkOutcome, EmailFilter, TriageStore};

fn list_response(triage: &TriageStore) -> EmailListResponse {
    let emails: Vec<_> = triage.visible().into_iter().cloned().collect();
    EmailListResponse {
        total: emails.len(),
        stats: triage.stats(),
        selected_ids: triage.selected_ids(),
        all_selected: triage.all_visible_selected(),
        emails,
    }
}

/// Email triage actions. Every local mutation is followed by a full-replace
/// write-back of the whole collection.
#[derive(Clone)]
pub struct EmailService {
    gateway: Arc<dyn Gateway>,
    session: DashboardSession,
}

impl EmailService {
    pub fn new(gateway: Arc<dyn Gateway>, session: DashboardSession) -> Self {
        Self { gateway, session }
    }

    pub async fn reload(&self) -> Result<usize> {
        let ticket = self.session.triage.write().await.begin_load();
        let body = self.gateway.request(Method::GET, "/emails/", None).await?;
        let snapshot: EmailSnapshot = decode(body)?;
        if !snapshot.success {
            let message = snapshot
                .message
                .unwrap_or_else(|| "Failed to load emails".to_string());
            return Err(Error::api(200, message));
        }

        let fetched = snapshot.emails.len();
        let mut triage = self.session.triage.write().await;
        if triage.apply_snapshot(ticket, snapshot.emails) {
            info!(count = fetched, "Email snapshot loaded");
        } else {
            debug!("Discarded stale email snapshot");
        }
        Ok(triage.all().len())
    }

    pub async fn view(&self, filter: Option<EmailFilter>) -> EmailListResponse {
        match filter {
            Some(filter) => {
                let mut triage = self.session.triage.write().await;
                triage.apply_filter(filter);
                list_response(&triage)
            }
            None => list_response(&*self.session.triage.read().await),
        }
    }

    /// Sends the whole collection to the backend.
    ///
    /// Write-backs queue on the session's persist lane and snapshot the store
    /// only once they hold it, so the last one to land carries every edit made
    /// before it. A failure leaves the local edit in place.
    async fn persist(&self) -> Result<()> {
        let _lane = self.session.persist_lane().await;
        let emails = self.session.triage.read().await.snapshot();
        let count = emails.len();

        let body = serde_json::to_value(UpdateEmailsPayload { emails })?;
        let response = self
            .gateway
            .request(Method::POST, "/update-emails/", Some(body))
            .await
            .and_then(|body| ensure_success(body, "Failed to save emails"))
            .map_err(|e| {
                warn!(count, "Email write-back failed: {}", e);
                e
            })?;
        debug!(count, ?response, "Email collection persisted");
        Ok(())
    }

    pub async fn set_flag(&self, id: &str, flag: EmailFlag) -> Result<Notice> {
        let changed = self.session.triage.write().await.set_flag(id, flag.clone());
        if !changed {
            return Ok(Notice::info(format!("Email {} not found; nothing changed", id)));
        }
        self.persist().await?;
        Ok(Notice::success(format!("Email marked as {}", flag)))
    }

    pub async fn remove(&self, id: &str) -> Result<Notice> {
        let removed = self.session.triage.write().await.remove(id);
        if !removed {
            return Ok(Notice::info(format!("Email {} not found; nothing removed", id)));
        }
        self.persist().await?;
        Ok(Notice::success("Email removed"))
    }

    pub async fn bulk_set_flag(&self, flag: EmailFlag) -> Result<Notice> {
        let outcome = self.session.triage.write().await.bulk_set_flag(flag.clone());
        match outcome {
            BulkOutcome::NothingSelected => Ok(Notice::warning("No emails selected")),
            BulkOutcome::Applied { count } => {
                self.persist().await?;
                Ok(Notice::success(format!(
                    "{} email(s) marked as {}",
                    count, flag
                )))
            }
        }
    }

    pub async fn bulk_remove(&self) -> Result<Notice> {
        let outcome = self.session.triage.write().await.bulk_remove();
        match outcome {
            BulkOutcome::NothingSelected => Ok(Notice::warning("No emails selected")),
            BulkOutcome::Applied { count } => {
                self.persist().await?;
                Ok(Notice::success(format!("{} email(s) removed", count)))
            }
        }
    }

    pub async fn toggle(&self, id: &str) -> Result<Vec<String>> {
        let mut triage = self.session.triage.write().await;
        if triage.get(id).is_none() {
            return Err(Error::NotFound(format!("Email {} is not loaded", id)));
        }
        triage.toggle(id);
        Ok(triage.selected_ids())
    }

    pub async fn select_all(&self, checked: bool) -> Vec<String> {
        let mut triage = self.session.triage.write().await;
        triage.select_all(checked);
        triage.selected_ids()
    }

    pub async fn clear_selection(&self) {
        self.session.triage.write().await.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MockGateway, UploadForm};
    use async_trait::async_trait;
    use serde_json::{json, Value as JsonValue};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn emails_body() -> JsonValue {
        json!({
            "success": true,
            "emails": [
                {"ID": "a", "From": "boss@corp.io", "Subject": "Q3 plan", "Summary": "Planning", "Type": "Office", "Flag": "not spam", "Score": 90},
                {"ID": "b", "From": "deals@shop.io", "Subject": "Sale!", "Summary": "Discounts", "Type": "Marketing", "Flag": "spam", "Score": 10},
                {"ID": "c", "From": "hr@corp.io", "Subject": "Interview", "Summary": "Schedule", "Type": "Meeting", "Flag": "not spam", "Score": "75.0", "Thread": "t-9"}
            ]
        })
    }

    fn is_load(method: &Method, path: &str) -> bool {
        *method == Method::GET && path == "/emails/"
    }

    fn is_persist(method: &Method, path: &str) -> bool {
        *method == Method::POST && path == "/update-emails/"
    }

    async fn loaded(mock: MockGateway) -> (EmailService, DashboardSession) {
        let session = DashboardSession::new();
        let service = EmailService::new(Arc::new(mock), session.clone());
        service.reload().await.unwrap();
        (service, session)
    }

    fn load_expectation(mock: &mut MockGateway) {
        mock.expect_request()
            .withf(|m, p, _| is_load(m, &p.to_string()))
            .times(1)
            .returning(|_, _, _| Ok(emails_body()));
    }

    #[tokio::test]
    async fn flagging_an_absent_email_does_not_persist() {
        let mut mock = MockGateway::new();
        load_expectation(&mut mock);
        mock.expect_request()
            .withf(|m, p, _| is_persist(m, &p.to_string()))
            .times(0);

        let (service, _) = loaded(mock).await;
        let notice = service.set_flag("zzz", EmailFlag::Spam).await.unwrap();
        assert_eq!(notice.level, crate::dto::common_dto::NoticeLevel::Info);
        let notice = service.remove("zzz").await.unwrap();
        assert_eq!(notice.level, crate::dto::common_dto::NoticeLevel::Info);
    }

    #[tokio::test]
    async fn removal_writes_back_full_collection_with_unknown_fields() {
        let sent = Arc::new(Mutex::new(Vec::<JsonValue>::new()));
        let capture = sent.clone();

        let mut mock = MockGateway::new();
        load_expectation(&mut mock);
        mock.expect_request()
            .withf(|m, p, _| is_persist(m, &p.to_string()))
            .times(1)
            .returning(move |_, _, body| {
                capture.lock().unwrap().push(body.unwrap_or(JsonValue::Null));
                Ok(json!({"success": true, "message": "Emails updated successfully"}))
            });

        let (service, session) = loaded(mock).await;
        service.remove("b").await.unwrap();

        let sent = sent.lock().unwrap();
        let emails = sent[0]["emails"].as_array().unwrap();
        let ids: Vec<&str> = emails.iter().map(|e| e["ID"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(emails[1]["Thread"], "t-9");
        assert_eq!(session.triage.read().await.all().len(), 2);
    }

    #[tokio::test]
    async fn bulk_action_with_empty_selection_only_warns() {
        let mut mock = MockGateway::new();
        load_expectation(&mut mock);
        mock.expect_request()
            .withf(|m, p, _| is_persist(m, &p.to_string()))
            .times(0);

        let (service, _) = loaded(mock).await;
        let notice = service.bulk_set_flag(EmailFlag::Spam).await.unwrap();
        assert_eq!(notice.level, crate::dto::common_dto::NoticeLevel::Warning);
        let notice = service.bulk_remove().await.unwrap();
        assert_eq!(notice.message, "No emails selected");
    }

    #[tokio::test]
    async fn failed_write_back_keeps_local_edit_and_reports_error() {
        let mut mock = MockGateway::new();
        load_expectation(&mut mock);
        mock.expect_request()
            .withf(|m, p, _| is_persist(m, &p.to_string()))
            .times(1)
            .returning(|_, _, _| Err(Error::api(500, "Disk full")));

        let (service, session) = loaded(mock).await;
        service.toggle("a").await.unwrap();
        service.toggle("c").await.unwrap();
        let err = service.bulk_set_flag(EmailFlag::Spam).await.unwrap_err();
        assert_eq!(err.to_string(), "Disk full");

        let triage = session.triage.read().await;
        assert!(triage.get("a").unwrap().is_spam());
        assert_eq!(triage.selected_ids(), vec!["a".to_string(), "c".to_string()]);
    }

    #[tokio::test]
    async fn unsuccessful_snapshot_is_an_error_and_keeps_state() {
        let mut mock = MockGateway::new();
        mock.expect_request()
            .withf(|m, p, _| is_load(m, &p.to_string()))
            .returning(|_, _, _| {
                Ok(json!({"success": false, "message": "Email file not found", "emails": []}))
            });

        let session = DashboardSession::new();
        let service = EmailService::new(Arc::new(mock), session.clone());
        let err = service.reload().await.unwrap_err();
        assert_eq!(err.to_string(), "Email file not found");
        assert!(session.triage.read().await.all().is_empty());
    }

    #[tokio::test]
    async fn view_reports_stats_and_filter() {
        let mut mock = MockGateway::new();
        load_expectation(&mut mock);

        let (service, _) = loaded(mock).await;
        let view = service
            .view(Some(EmailFilter {
                flag: Some(EmailFlag::NotSpam),
                min_importance: Some(80),
                ..Default::default()
            }))
            .await;
        assert_eq!(view.total, 1);
        assert_eq!(view.emails[0].id, "a");
        assert_eq!(view.stats.total, 3);
        assert_eq!(view.stats.spam, 1);
        assert_eq!(view.stats.important, 1);
    }

    #[tokio::test]
    async fn snapshot_with_null_pipeline_fields_still_loads() {
        let mut mock = MockGateway::new();
        mock.expect_request()
            .withf(|m, p, _| is_load(m, &p.to_string()))
            .returning(|_, _, _| {
                Ok(json!({
                    "success": true,
                    "emails": [
                        {"ID": "a", "From": "x@corp.io", "Summary": null, "Flag": null, "Score": 50},
                        {"ID": "b", "From": null, "Subject": null, "Flag": "spam", "Score": null}
                    ]
                }))
            });

        let (_, session) = loaded(mock).await;
        let triage = session.triage.read().await;
        assert_eq!(triage.all().len(), 2);
        assert_eq!(triage.stats().spam, 1);
    }

    /// Holds the first write-back before recording it, as a slow network would.
    #[derive(Default)]
    struct SlowFirstWrite {
        writes: AtomicUsize,
        landed: Mutex<Vec<JsonValue>>,
    }

    #[async_trait]
    impl Gateway for SlowFirstWrite {
        async fn request(
            &self,
            method: Method,
            path: &str,
            body: Option<JsonValue>,
        ) -> Result<JsonValue> {
            if is_load(&method, path) {
                return Ok(emails_body());
            }
            if self.writes.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.landed
                .lock()
                .unwrap()
                .push(body.unwrap_or(JsonValue::Null));
            Ok(json!({"success": true}))
        }

        async fn upload(&self, _path: &str, _form: UploadForm) -> Result<JsonValue> {
            unreachable!("no uploads in triage")
        }
    }

    #[tokio::test]
    async fn concurrent_edits_land_in_order_and_last_write_carries_both() {
        let gateway = Arc::new(SlowFirstWrite::default());
        let session = DashboardSession::new();
        let service = EmailService::new(gateway.clone(), session.clone());
        service.reload().await.unwrap();

        let (first, second) = tokio::join!(
            service.set_flag("a", EmailFlag::Spam),
            service.set_flag("c", EmailFlag::Spam)
        );
        first.unwrap();
        second.unwrap();

        let landed = gateway.landed.lock().unwrap();
        assert_eq!(landed.len(), 2);
        let last = landed.last().unwrap()["emails"].as_array().unwrap().clone();
        let flag_of = |id: &str| {
            last.iter()
                .find(|e| e["ID"] == id)
                .map(|e| e["Flag"].clone())
                .unwrap()
        };
        assert_eq!(flag_of("a"), "spam");
        assert_eq!(flag_of("c"), "spam");
    }
}
