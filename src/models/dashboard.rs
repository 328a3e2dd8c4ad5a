use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub total_resumes: i64,
    #[serde(default)]
    pub processed_resumes: i64,
    #[serde(default)]
    pub shortlisted_count: i64,
    #[serde(default)]
    pub error_message: String,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_candidates: i64,
    #[serde(default)]
    pub shortlisted: i64,
    #[serde(default)]
    pub notified: i64,
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub recent_jobs: Vec<AnalysisJob>,
}
