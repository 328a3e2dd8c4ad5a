use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::stores::{RosterStore, TriageStore};

/// Client-side state for one dashboard session.
///
/// Store locks guard in-memory state only and are released before any
/// gateway call. Email write-backs queue on `persist_lane` so two edits
/// can never land at the backend out of order.
#[derive(Clone, Default)]
pub struct DashboardSession {
    pub roster: Arc<RwLock<RosterStore>>,
    pub triage: Arc<RwLock<TriageStore>>,
    persist_lane: Arc<Mutex<()>>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn persist_lane(&self) -> MutexGuard<'_, ()> {
        self.persist_lane.lock().await
    }

    /// Clears both stores. Responses to loads started before the reset are dropped.
    pub async fn reset(&self) {
        self.roster.write().await.reset();
        self.triage.write().await.reset();
        tracing::info!("Dashboard session reset");
    }
}
