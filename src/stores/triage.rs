use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use super::sequence::{RequestSequencer, Ticket};
use crate::models::email::{EmailFlag, EmailRecord};

/// Each predicate is optional; an unset one does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailFilter {
    pub search: String,
    pub flag: Option<EmailFlag>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub intention: Option<String>,
    pub min_importance: Option<i32>,
}

impl EmailFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.flag.is_none()
            && self.kind.is_none()
            && self.intention.is_none()
            && self.min_importance.is_none()
    }

    pub fn matches(&self, email: &EmailRecord, needle: &str) -> bool {
        email.matches_search(needle)
            && self.flag.as_ref().map_or(true, |flag| &email.flag == flag)
            && self
                .kind
                .as_deref()
                .map_or(true, |kind| email.kind.as_deref() == Some(kind))
            && self
                .intention
                .as_deref()
                .map_or(true, |intention| email.intention.as_deref() == Some(intention))
            && self.min_importance.map_or(true, |min| email.score >= min)
    }
}

pub fn filter_emails(all: &[EmailRecord], filter: &EmailFilter) -> Vec<EmailRecord> {
    let needle = filter.search.trim().to_lowercase();
    all.iter()
        .filter(|email| filter.matches(email, &needle))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BulkOutcome {
    /// Nothing was selected; reported as a warning, nothing persisted.
    NothingSelected,
    Applied { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailStats {
    pub total: usize,
    pub spam: usize,
    pub important: usize,
    pub average_importance: i32,
}

/// Email triage state for one dashboard session.
///
/// `filtered` holds ids rather than copies so a flag edit shows up in the
/// current view without re-running the filter.
#[derive(Debug, Default)]
pub struct TriageStore {
    all: Vec<EmailRecord>,
    filter: EmailFilter,
    filtered: Vec<String>,
    selected: BTreeSet<String>,
    sequencer: RequestSequencer,
}

impl TriageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    pub fn apply_snapshot(&mut self, ticket: Ticket, emails: Vec<EmailRecord>) -> bool {
        if !self.sequencer.try_apply(ticket) {
            return false;
        }
        self.all = emails;
        let present: HashSet<&str> = self.all.iter().map(|e| e.id.as_str()).collect();
        self.selected.retain(|id| present.contains(id.as_str()));
        self.rerun_filter();
        true
    }

    pub fn apply_filter(&mut self, filter: EmailFilter) -> Vec<EmailRecord> {
        self.filter = filter;
        self.rerun_filter();
        self.visible().into_iter().cloned().collect()
    }

    fn rerun_filter(&mut self) {
        self.filtered = filter_emails(&self.all, &self.filter)
            .into_iter()
            .map(|e| e.id)
            .collect();
    }

    pub fn filter(&self) -> &EmailFilter {
        &self.filter
    }

    pub fn all(&self) -> &[EmailRecord] {
        &self.all
    }

    pub fn get(&self, id: &str) -> Option<&EmailRecord> {
        self.all.iter().find(|e| e.id == id)
    }

    /// Records of the last filter run, resolved against current data.
    pub fn visible(&self) -> Vec<&EmailRecord> {
        let filtered: HashSet<&str> = self.filtered.iter().map(String::as_str).collect();
        self.all
            .iter()
            .filter(|e| filtered.contains(e.id.as_str()))
            .collect()
    }

    /// Copy of the whole collection, as sent on write-back.
    pub fn snapshot(&self) -> Vec<EmailRecord> {
        self.all.clone()
    }

    /// Returns false (and changes nothing) when `id` is not loaded.
    pub fn set_flag(&mut self, id: &str, flag: EmailFlag) -> bool {
        match self.all.iter_mut().find(|e| e.id == id) {
            Some(email) => {
                email.flag = flag;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.all.len();
        self.all.retain(|e| e.id != id);
        self.selected.remove(id);
        self.filtered.retain(|f| f != id);
        self.all.len() != before
    }

    pub fn bulk_set_flag(&mut self, flag: EmailFlag) -> BulkOutcome {
        if self.selected.is_empty() {
            return BulkOutcome::NothingSelected;
        }
        for email in self.all.iter_mut() {
            if self.selected.contains(&email.id) {
                email.flag = flag.clone();
            }
        }
        BulkOutcome::Applied {
            count: self.selected.len(),
        }
    }

    pub fn bulk_remove(&mut self) -> BulkOutcome {
        if self.selected.is_empty() {
            return BulkOutcome::NothingSelected;
        }
        let selected = std::mem::take(&mut self.selected);
        let before = self.all.len();
        self.all.retain(|e| !selected.contains(&e.id));
        self.filtered.retain(|id| !selected.contains(id));
        BulkOutcome::Applied {
            count: before - self.all.len(),
        }
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.selected.contains(id)
    }

    pub fn select_all(&mut self, checked: bool) {
        for id in &self.filtered {
            if checked {
                self.selected.insert(id.clone());
            } else {
                self.selected.remove(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// State of the header checkbox: every visible row is selected.
    pub fn all_visible_selected(&self) -> bool {
        !self.filtered.is_empty() && self.filtered.iter().all(|id| self.selected.contains(id))
    }

    pub fn stats(&self) -> EmailStats {
        let total = self.all.len();
        let spam = self.all.iter().filter(|e| e.is_spam()).count();
        let important = self.all.iter().filter(|e| e.is_important()).count();
        let average_importance = if total == 0 {
            0
        } else {
            let sum: i64 = self.all.iter().map(|e| e.score as i64).sum();
            (sum as f64 / total as f64).round() as i32
        };
        EmailStats {
            total,
            spam,
            important,
            average_importance,
        }
    }

    pub fn reset(&mut self) {
        self.all.clear();
        self.filter = EmailFilter::default();
        self.filtered.clear();
        self.selected.clear();
        self.sequencer.invalidate();
    }
}
