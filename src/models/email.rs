use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Scores arrive from the classification pipeline as ints, floats or numeric strings.
fn deserialize_score_flexible<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScoreRepr {
        Int(i64),
        Float(f64),
        String(String),
        Null(()),
    }

    let clamp = |v: f64| v.round().clamp(0.0, 100.0) as i32;
    match ScoreRepr::deserialize(deserializer)? {
        ScoreRepr::Int(i) => Ok(clamp(i as f64)),
        ScoreRepr::Float(f) => Ok(clamp(f)),
        ScoreRepr::String(s) => s
            .trim()
            .parse::<f64>()
            .map(clamp)
            .map_err(|_| serde::de::Error::custom(format!("Invalid score string: {}", s))),
        ScoreRepr::Null(()) => Ok(0),
    }
}

/// The pipeline writes `null` for fields it could not extract.
fn deserialize_text_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_flag_or_null<'de, D>(deserializer: D) -> std::result::Result<EmailFlag, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(EmailFlag::from)
        .unwrap_or_default())
}

/// Only the exact pipeline values map to known variants; anything else is
/// kept verbatim so a write-back never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmailFlag {
    Spam,
    NotSpam,
    Other(String),
}

impl EmailFlag {
    pub fn as_str(&self) -> &str {
        match self {
            EmailFlag::Spam => "spam",
            EmailFlag::NotSpam => "not spam",
            EmailFlag::Other(s) => s,
        }
    }
}

impl From<String> for EmailFlag {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "spam" => EmailFlag::Spam,
            "not spam" => EmailFlag::NotSpam,
            _ => EmailFlag::Other(raw),
        }
    }
}

impl Default for EmailFlag {
    fn default() -> Self {
        EmailFlag::Other(String::new())
    }
}

impl From<&str> for EmailFlag {
    fn from(raw: &str) -> Self {
        EmailFlag::from(raw.to_string())
    }
}

impl From<EmailFlag> for String {
    fn from(flag: EmailFlag) -> Self {
        match flag {
            EmailFlag::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EmailFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified email as written by the analysis pipeline.
///
/// Keys the dashboard does not model are kept in `extra` and written back
/// untouched, since persistence replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "From", default, deserialize_with = "deserialize_text_or_null")]
    pub from: String,
    #[serde(rename = "Date", default, deserialize_with = "deserialize_text_or_null")]
    pub date: String,
    #[serde(rename = "Subject", default, deserialize_with = "deserialize_text_or_null")]
    pub subject: String,
    #[serde(rename = "Body", default, deserialize_with = "deserialize_text_or_null")]
    pub body: String,
    #[serde(rename = "Summary", default, deserialize_with = "deserialize_text_or_null")]
    pub summary: String,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Intention", default)]
    pub intention: Option<String>,
    #[serde(rename = "Flag", default, deserialize_with = "deserialize_flag_or_null")]
    pub flag: EmailFlag,
    #[serde(
        rename = "Score",
        default,
        deserialize_with = "deserialize_score_flexible"
    )]
    pub score: i32,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl EmailRecord {
    pub const IMPORTANT_SCORE: i32 = 80;

    pub fn is_spam(&self) -> bool {
        self.flag == EmailFlag::Spam
    }

    pub fn is_important(&self) -> bool {
        self.score >= Self::IMPORTANT_SCORE
    }

    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.subject.to_lowercase().contains(needle)
            || self.from.to_lowercase().contains(needle)
            || self.summary.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_pipeline_fields_on_round_trip() {
        let raw = json!({
            "ID": "18c2f",
            "From": "billing@vendor.io",
            "Date": "2026-02-01T10:00:00",
            "Subject": "Invoice",
            "Body": "Please find attached",
            "Summary": "Monthly invoice",
            "Type": "Transactional",
            "Intention": "Payment",
            "Flag": "not spam",
            "Score": "72.6",
            "ThreadId": "t-1"
        });
        let record: EmailRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.flag, EmailFlag::NotSpam);
        assert_eq!(record.score, 73);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["ThreadId"], "t-1");
        assert_eq!(back["Flag"], "not spam");
        assert_eq!(back["Score"], 73);
    }

    #[test]
    fn unknown_flags_are_preserved_verbatim() {
        let flag = EmailFlag::from("Needs Review".to_string());
        assert_eq!(flag, EmailFlag::Other("Needs Review".into()));
        assert_eq!(String::from(flag), "Needs Review");
        assert_eq!(EmailFlag::from("spam"), EmailFlag::Spam);
        assert_eq!(EmailFlag::from("SPAM"), EmailFlag::Other("SPAM".into()));
    }

    #[test]
    fn flag_casing_survives_round_trip() {
        let record: EmailRecord =
            serde_json::from_value(json!({"ID": "a", "Flag": "Spam", "Score": 10})).unwrap();
        assert!(!record.is_spam());
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["Flag"], "Spam");
    }

    #[test]
    fn null_text_and_flag_fields_load_and_write_back() {
        let record: EmailRecord = serde_json::from_value(json!({
            "ID": "a",
            "From": null,
            "Subject": null,
            "Summary": null,
            "Flag": null,
            "Score": 50
        }))
        .unwrap();
        assert_eq!(record.summary, "");
        assert_eq!(record.flag, EmailFlag::Other(String::new()));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["ID"], "a");
        assert_eq!(back["Flag"], "");

        let missing: EmailRecord = serde_json::from_value(json!({"ID": "b"})).unwrap();
        assert_eq!(missing.flag, EmailFlag::default());
    }

    #[test]
    fn missing_or_null_score_counts_as_zero() {
        let record: EmailRecord = serde_json::from_value(json!({
            "ID": "a",
            "Flag": "spam",
            "Score": null
        }))
        .unwrap();
        assert_eq!(record.score, 0);
        assert!(record.kind.is_none());
    }
}
