use bytes::Bytes;
use reqwest::Method;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::candidate_service::decode_list;
use crate::dto::job_description_dto::CreateJobDescriptionPayload;
use crate::error::{Error, Result};
use crate::gateway::{decode, Gateway, UploadForm};
use crate::models::job_description::JobDescription;
use crate::utils::validation::is_pdf_file_name;

fn not_found_as(id: i64) -> impl FnOnce(Error) -> Error {
    move |e| match e {
        Error::Api { status: 404, .. } => {
            Error::NotFound(format!("Job description {} not found", id))
        }
        other => other,
    }
}

#[derive(Clone)]
pub struct JobDescriptionService {
    gateway: Arc<dyn Gateway>,
}

impl JobDescriptionService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// `None` when the backend has no active job description.
    pub async fn active(&self) -> Result<Option<JobDescription>> {
        match self
            .gateway
            .request(Method::GET, "/job-descriptions/active/", None)
            .await
        {
            Ok(body) => Ok(Some(decode(body)?)),
            Err(Error::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn list(&self) -> Result<Vec<JobDescription>> {
        let body = self
            .gateway
            .request(Method::GET, "/job-descriptions/", None)
            .await?;
        decode_list(body)
    }

    pub async fn get(&self, id: i64) -> Result<JobDescription> {
        let body = self
            .gateway
            .request(Method::GET, &format!("/job-descriptions/{}/", id), None)
            .await
            .map_err(not_found_as(id))?;
        decode(body)
    }

    /// The backend makes the new description the active one.
    pub async fn create_text(&self, payload: &CreateJobDescriptionPayload) -> Result<JobDescription> {
        payload.validate()?;
        let body = self
            .gateway
            .request(
                Method::POST,
                "/job-descriptions/create_text/",
                Some(serde_json::to_value(payload.trimmed())?),
            )
            .await?;
        let created: JobDescription = decode(body)?;
        info!(id = created.id, title = %created.title, "Job description created");
        Ok(created)
    }

    pub async fn upload_pdf(
        &self,
        title: &str,
        file_name: &str,
        bytes: Bytes,
    ) -> Result<JobDescription> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::BadRequest("Title is required".to_string()));
        }
        if !is_pdf_file_name(file_name) {
            return Err(Error::BadRequest("Only PDF files are allowed".to_string()));
        }
        if bytes.is_empty() {
            return Err(Error::BadRequest("No file provided".to_string()));
        }

        let form = UploadForm::new(file_name, bytes).with_field("title", title);
        let body = self
            .gateway
            .upload("/job-descriptions/upload_pdf/", form)
            .await?;
        let created: JobDescription = decode(body)?;
        info!(id = created.id, file = %file_name, "Job description uploaded");
        Ok(created)
    }

    pub async fn set_active(&self, id: i64) -> Result<JobDescription> {
        let body = self
            .gateway
            .request(
                Method::POST,
                &format!("/job-descriptions/{}/set_active/", id),
                None,
            )
            .await
            .map_err(not_found_as(id))?;
        let activated: JobDescription = decode(body)?;
        info!(id, "Job description activated");
        Ok(activated)
    }
}
