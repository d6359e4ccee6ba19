//! Request orchestrator module.
//!
//! Owns the UI state and the one outbound call per submission.
//!
//! # Architecture
//!
//! ```text
//! egui update()  ──begin()──▶ InFlightTicket
//!        │                        │
//!        └── OrchestratorCommand::Submit { ticket, payload } (mpsc)
//!                                 │
//!                                 ▼
//!                 Orchestrator::run()  ← async tokio task
//!                                 │
//!                                 └─ GenerationClient::generate → settle
//!
//! SharedState (Arc<Mutex<UiState>>) ←─── read by egui update() each frame
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{InFlightTicket, Orchestrator, OrchestratorCommand, SubmitError, SubmitOutcome};
pub use state::{
    lock_state, new_shared_state, Outcome, RequestPhase, ResultView, SharedState, UiState,
};
