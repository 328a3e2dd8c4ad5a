use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

/// Transient message the view layer shows as a toast after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SelectAllPayload {
    pub checked: bool,
}

/// `{success, message?, messages?}` acknowledgement used by most action endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendAck {
    pub success: bool,
    pub message: Option<String>,
    pub messages: Vec<String>,
}

impl BackendAck {
    pub fn summary(&self, fallback: &str) -> String {
        match (&self.message, self.messages.is_empty()) {
            (Some(message), _) if !message.is_empty() => message.clone(),
            (_, false) => self.messages.join(", "),
            _ => fallback.to_string(),
        }
    }
}

/// Reads an optional query value, treating an empty string as unset.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResponse<Id> {
    pub count: usize,
    pub selected_ids: Vec<Id>,
}

impl<Id> SelectionResponse<Id> {
    pub fn new(selected_ids: Vec<Id>) -> Self {
        Self {
            count: selected_ids.len(),
            selected_ids,
        }
    }
}
