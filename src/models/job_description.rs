use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobDescriptionSource {
    PdfUpload,
    TextInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobDescription {
    pub fn source(&self) -> JobDescriptionSource {
        match self.file_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => JobDescriptionSource::PdfUpload,
            _ => JobDescriptionSource::TextInput,
        }
    }
}
