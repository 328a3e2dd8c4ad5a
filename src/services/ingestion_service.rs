use bytes::Bytes;
use reqwest::Method;
use std::sync::Arc;
use tracing::{info, warn};

use super::candidate_service::CandidateService;
use crate::dto::common_dto::BackendAck;
use crate::dto::ingestion_dto::{AnalysisOutcome, SyncOutcome, UploadReport, UploadResult};
use crate::error::{Error, Result};
use crate::gateway::{decode, ensure_success, Gateway, UploadForm};
use crate::utils::validation::is_pdf_file_name;

const DRIVE_AUTH_HINT: &str =
    "Google Drive authorization is no longer valid. Re-authorize the OAuth client and try again";

fn is_drive_auth_failure(message: &str) -> bool {
    ["disabled_client", "invalid_grant", "OAuth"]
        .iter()
        .any(|marker| message.contains(marker))
}

#[derive(Clone)]
pub struct IngestionService {
    gateway: Arc<dyn Gateway>,
    candidates: CandidateService,
}

impl IngestionService {
    pub fn new(gateway: Arc<dyn Gateway>, candidates: CandidateService) -> Self {
        Self {
            gateway,
            candidates,
        }
    }

    pub async fn sync_drive(&self) -> Result<SyncOutcome> {
        let result = self
            .gateway
            .request(Method::POST, "/sync-drive/", None)
            .await
            .and_then(|body| ensure_success(body, "Drive sync failed"));

        match result {
            Ok(body) => {
                let outcome: SyncOutcome = decode(body)?;
                info!("{}", outcome.message);
                Ok(outcome)
            }
            Err(Error::Api { status, message }) if is_drive_auth_failure(&message) => {
                warn!(status, "Drive sync rejected: {}", message);
                Err(Error::api(status, format!("{}. {}", message, DRIVE_AUTH_HINT)))
            }
            Err(e) => Err(e),
        }
    }

    /// Uploads each file separately. Non-PDF files are counted as failures
    /// without being sent.
    pub async fn upload_resumes(&self, files: Vec<(String, Bytes)>) -> Result<UploadReport> {
        if files.is_empty() {
            return Err(Error::BadRequest("No file provided".to_string()));
        }

        let mut report = UploadReport::default();
        for (file_name, bytes) in files {
            if !is_pdf_file_name(&file_name) {
                report.push(UploadResult {
                    file_name,
                    uploaded: false,
                    message: "Only PDF files are allowed".to_string(),
                });
                continue;
            }

            let form = UploadForm::new(file_name.clone(), bytes);
            let result = self
                .gateway
                .upload("/upload-resume/", form)
                .await
                .and_then(|body| ensure_success(body, "Upload failed"))
                .and_then(decode::<BackendAck>);

            let entry = match result {
                Ok(ack) => UploadResult {
                    message: ack.summary("Uploaded"),
                    file_name,
                    uploaded: true,
                },
                Err(e) => {
                    warn!(file = %file_name, "Resume upload failed: {}", e);
                    UploadResult {
                        message: e.to_string(),
                        file_name,
                        uploaded: false,
                    }
                }
            };
            report.push(entry);
        }

        info!(
            uploaded = report.success_count,
            failed = report.failed_count,
            "Resume upload finished"
        );
        Ok(report)
    }

    /// Scores every pending resume against the active job description.
    pub async fn analyze(&self) -> Result<AnalysisOutcome> {
        let body = self
            .gateway
            .request(Method::POST, "/analyze-resumes/", None)
            .await?;
        let outcome: AnalysisOutcome = decode(ensure_success(body, "Analysis failed")?)?;
        info!(
            job_id = ?outcome.job_id,
            processed = outcome.total_processed,
            shortlisted = outcome.shortlisted_count,
            "Resume analysis finished"
        );

        if let Err(e) = self.candidates.reload().await {
            warn!("Failed to refresh candidates: {}", e);
        }
        Ok(outcome)
    }
}
