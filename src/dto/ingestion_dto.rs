use serde::{Deserialize, Serialize};

use crate::models::candidate::Candidate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOutcome {
    pub success: bool,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub file_name: String,
    pub uploaded: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub success_count: usize,
    pub failed_count: usize,
    pub results: Vec<UploadResult>,
}

impl UploadReport {
    pub fn push(&mut self, result: UploadResult) {
        if result.uploaded {
            self.success_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.results.push(result);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOutcome {
    pub success: bool,
    pub message: String,
    pub job_id: Option<i64>,
    pub total_processed: i64,
    pub shortlisted_count: i64,
    pub candidates: Vec<Candidate>,
}
