//! Client-side session state. Stores are plain data with synchronous
//! operations; services do the network calls and feed results back in.

pub mod roster;
pub mod sequence;
pub mod triage;

pub use roster::{CandidateFilter, RosterStore};
pub use sequence::{RequestSequencer, Ticket};
pub use triage::{BulkOutcome, EmailFilter, EmailStats, TriageStore};
