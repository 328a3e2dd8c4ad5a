use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use super::sequence::{RequestSequencer, Ticket};
use crate::models::candidate::{Candidate, CandidateStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilter {
    pub search: String,
    pub status: Option<CandidateStatus>,
    pub min_score: i32,
}

/// Candidates matching every active predicate, in snapshot order.
pub fn filter_candidates(all: &[Candidate], filter: &CandidateFilter) -> Vec<Candidate> {
    let needle = filter.search.trim().to_lowercase();
    all.iter()
        .filter(|c| c.matches_search(&needle))
        .filter(|c| filter.status.map_or(true, |status| c.status == status))
        .filter(|c| c.score >= filter.min_score)
        .cloned()
        .collect()
}

/// The candidate roster held for one dashboard session.
#[derive(Debug, Default)]
pub struct RosterStore {
    all: Vec<Candidate>,
    filter: CandidateFilter,
    rendered: Vec<i64>,
    selected: BTreeSet<i64>,
    status_overrides: HashMap<i64, CandidateStatus>,
    sequencer: RequestSequencer,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    /// Replaces the snapshot unless a newer load already landed.
    pub fn apply_snapshot(&mut self, ticket: Ticket, candidates: Vec<Candidate>) -> bool {
        if !self.sequencer.try_apply(ticket) {
            return false;
        }
        self.all = candidates;

        let present: HashSet<i64> = self.all.iter().map(|c| c.id).collect();
        self.selected.retain(|id| present.contains(id));
        self.status_overrides.retain(|id, _| present.contains(id));
        self.rerender();
        true
    }

    pub fn apply_filter(&mut self, filter: CandidateFilter) -> Vec<Candidate> {
        self.filter = filter;
        self.rerender();
        self.visible().into_iter().cloned().collect()
    }

    fn rerender(&mut self) {
        self.rendered = filter_candidates(&self.all, &self.filter)
            .iter()
            .map(|c| c.id)
            .collect();
    }

    pub fn filter(&self) -> &CandidateFilter {
        &self.filter
    }

    pub fn all(&self) -> &[Candidate] {
        &self.all
    }

    pub fn get(&self, id: i64) -> Option<&Candidate> {
        self.all.iter().find(|c| c.id == id)
    }

    pub fn visible(&self) -> Vec<&Candidate> {
        let rendered: HashSet<i64> = self.rendered.iter().copied().collect();
        self.all.iter().filter(|c| rendered.contains(&c.id)).collect()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Flips one row's checkbox. Unknown ids are ignored.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.selected.contains(&id)
    }

    /// Applies to the rendered rows only, so an active filter limits the scope.
    pub fn select_all(&mut self, checked: bool) {
        for id in &self.rendered {
            if checked {
                self.selected.insert(*id);
            } else {
                self.selected.remove(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    /// Shows `requested` on the row while the update is in flight.
    /// Returns the confirmed status, or `None` when the id is unknown.
    pub fn begin_status_change(
        &mut self,
        id: i64,
        requested: CandidateStatus,
    ) -> Option<CandidateStatus> {
        let previous = self.get(id)?.status;
        self.status_overrides.insert(id, requested);
        Some(previous)
    }

    /// Drops the in-flight value for `requested`; the row shows the snapshot
    /// status again. A newer change still in flight on the same row is kept.
    pub fn finish_status_change(&mut self, id: i64, requested: CandidateStatus) {
        if self.status_overrides.get(&id) == Some(&requested) {
            self.status_overrides.remove(&id);
        }
    }

    pub fn displayed_status(&self, candidate: &Candidate) -> CandidateStatus {
        self.status_overrides
            .get(&candidate.id)
            .copied()
            .unwrap_or(candidate.status)
    }

    pub fn reset(&mut self) {
        self.all.clear();
        self.filter = CandidateFilter::default();
        self.rendered.clear();
        self.selected.clear();
        self.status_overrides.clear();
        self.sequencer.invalidate();
    }
}
