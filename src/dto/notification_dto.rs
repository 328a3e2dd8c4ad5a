use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecipientMode {
    /// Let the backend pick the ten best shortlisted candidates.
    TopShortlisted,
    /// Use the roster's current checkbox selection.
    Selected,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkNotificationRequest {
    pub recipients: RecipientMode,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub date: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub time: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub location: String,
}

/// Body of `POST /send-notifications/`. An empty `candidate_ids` tells the
/// backend to notify its top 10 shortlisted candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkNotificationPayload {
    pub candidate_ids: Vec<i64>,
    pub date: String,
    pub time: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BulkReport {
    pub success_count: usize,
    pub failed_count: usize,
    pub messages: Vec<String>,
}

impl BulkReport {
    pub fn record_success(&mut self, messages: impl IntoIterator<Item = String>) {
        self.success_count += 1;
        self.messages.extend(messages);
    }

    pub fn record_failure(&mut self, message: String) {
        self.failed_count += 1;
        self.messages.push(message);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AppointmentLetterRequest {
    #[serde(default)]
    pub candidate_ids: Vec<i64>,
    /// Send to every eligible shortlisted candidate instead of `candidate_ids`.
    #[serde(default)]
    pub select_all_eligible: bool,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub position_title: String,
    #[serde(default)]
    pub department: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub salary: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub start_date: String,
    #[validate(range(min = 1))]
    pub probation_months: i32,
}

/// Body of `POST /candidates/{id}/send_appointment_letter/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentLetterPayload {
    pub position_title: String,
    pub department: String,
    pub salary: String,
    pub start_date: String,
    pub probation_months: i32,
}

impl From<&AppointmentLetterRequest> for AppointmentLetterPayload {
    fn from(req: &AppointmentLetterRequest) -> Self {
        Self {
            position_title: req.position_title.trim().to_string(),
            department: req.department.trim().to_string(),
            salary: req.salary.trim().to_string(),
            start_date: req.start_date.trim().to_string(),
            probation_months: req.probation_months,
        }
    }
}
