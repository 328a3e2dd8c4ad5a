use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common_dto::non_empty;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::stores::CandidateFilter;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub min_score: Option<String>,
}

impl CandidateListQuery {
    pub fn is_unset(&self) -> bool {
        self.search.is_none() && self.status.is_none() && self.min_score.is_none()
    }

    pub fn into_filter(self) -> Result<CandidateFilter> {
        let status = non_empty(self.status)
            .map(|s| s.parse::<CandidateStatus>())
            .transpose()
            .map_err(Error::BadRequest)?;
        // Unparseable minimum score means no minimum.
        let min_score = non_empty(self.min_score)
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(0);
        Ok(CandidateFilter {
            search: self.search.unwrap_or_default(),
            status,
            min_score,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub displayed_status: CandidateStatus,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateRow>,
    pub total: usize,
    pub loaded: usize,
    pub selected_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct InterviewSlot {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub date: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub time: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub location: String,
}
