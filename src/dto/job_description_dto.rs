use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::job_description::{JobDescription, JobDescriptionSource};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobDescriptionPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub title: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
}

impl CreateJobDescriptionPayload {
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: self.requirements.trim().to_string(),
        }
    }
}

/// A job description as the dashboard lists it, tagged with how it was created.
#[derive(Debug, Clone, Serialize)]
pub struct JobDescriptionResponse {
    #[serde(flatten)]
    pub job: JobDescription,
    pub source: JobDescriptionSource,
}

impl From<JobDescription> for JobDescriptionResponse {
    fn from(job: JobDescription) -> Self {
        Self {
            source: job.source(),
            job,
        }
    }
}
