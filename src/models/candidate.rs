use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Shortlisted,
    Rejected,
    Notified,
    Appointed,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 5] = [
        CandidateStatus::Pending,
        CandidateStatus::Shortlisted,
        CandidateStatus::Rejected,
        CandidateStatus::Notified,
        CandidateStatus::Appointed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Pending => "pending",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Rejected => "rejected",
            CandidateStatus::Notified => "notified",
            CandidateStatus::Appointed => "appointed",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                format!("Invalid status. Must be one of: {}", valid.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(rename = "candidate_name")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<String>,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default)]
    pub fitness_reasoning: String,
    #[serde(default)]
    pub matching_skills: String,
    #[serde(default)]
    pub missing_skills: String,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub resume_file: Option<String>,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub probation_months: Option<i32>,
    #[serde(default)]
    pub appointment_sent: bool,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub appointment_sent_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Case-insensitive containment on name, email and phone.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(self.name.as_str())
            || self.email.as_deref().is_some_and(contains)
            || self.phone.as_deref().is_some_and(contains)
    }

    /// The backend stores the literal "Not Provided" when parsing found no address.
    pub fn has_contact_email(&self) -> bool {
        self.email
            .as_deref()
            .map(str::trim)
            .is_some_and(|e| !e.is_empty() && e != "Not Provided")
    }
}
