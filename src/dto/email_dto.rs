use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common_dto::non_empty;
use crate::models::email::{EmailFlag, EmailRecord};
use crate::stores::{EmailFilter, EmailStats};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailListQuery {
    pub search: Option<String>,
    pub flag: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub intention: Option<String>,
    pub min_importance: Option<String>,
}

impl EmailListQuery {
    /// No filter key was sent at all, as opposed to keys sent empty.
    pub fn is_unset(&self) -> bool {
        self.search.is_none()
            && self.flag.is_none()
            && self.kind.is_none()
            && self.intention.is_none()
            && self.min_importance.is_none()
    }

    pub fn into_filter(self) -> EmailFilter {
        EmailFilter {
            search: self.search.unwrap_or_default(),
            flag: non_empty(self.flag).map(EmailFlag::from),
            kind: non_empty(self.kind),
            intention: non_empty(self.intention),
            min_importance: non_empty(self.min_importance).and_then(|s| s.parse().ok()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailListResponse {
    pub emails: Vec<EmailRecord>,
    pub total: usize,
    pub stats: EmailStats,
    pub selected_ids: Vec<String>,
    pub all_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetFlagPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub flag: String,
}

/// `GET /emails/` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailSnapshot {
    pub success: bool,
    pub emails: Vec<EmailRecord>,
    pub message: Option<String>,
}

/// `POST /update-emails/` body: the whole collection, replacing the stored one.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEmailsPayload {
    pub emails: Vec<EmailRecord>,
}
