//! UI state owned by the orchestrator.
//!
//! [`UiState`] is the single source of truth for what the window shows: the
//! last result, the in-flight flag, the last error and the selected
//! animation kind.  It lives behind [`SharedState`] (`Arc<Mutex<UiState>>`);
//! the orchestrator task mutates it and the egui update loop reads it each
//! frame.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::{RequestResult, ServiceHealth};
use crate::form::AnimationKind;

// ---------------------------------------------------------------------------
// RequestPhase / Outcome
// ---------------------------------------------------------------------------

/// Request lifecycle.
///
/// ```text
/// Idle ──submit──▶ InFlight
/// InFlight ──success / failure / transport error──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    InFlight,
}

/// How the most recent request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing submitted yet.
    Unset,
    Succeeded,
    Failed,
}

/// What the lower half of the window should show right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    Empty,
    Busy(AnimationKind),
    Error(&'a str),
    Video(&'a RequestResult),
}

// ---------------------------------------------------------------------------
// UiState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct UiState {
    /// Last successful result; survives later failures.
    pub result: Option<RequestResult>,
    /// `true` strictly between submit acceptance and settlement.
    pub in_flight: bool,
    /// Last failure message.  Never `Some("")`.
    pub error: Option<String>,
    pub animation_kind: AnimationKind,
    pub last_outcome: Outcome,
    /// Bumped on every successful result, so the view can auto-start each
    /// new video once even if the address repeats.
    pub result_generation: u64,
    /// Monotonic id of the last accepted submission.
    pub request_seq: u64,
    /// Last health probe: `Ok` report or a display message.
    pub service_health: Option<Result<ServiceHealth, String>>,
    pub health_checking: bool,
}

impl UiState {
    pub fn new(animation_kind: AnimationKind) -> Self {
        Self {
            result: None,
            in_flight: false,
            error: None,
            animation_kind,
            last_outcome: Outcome::Unset,
            result_generation: 0,
            request_seq: 0,
            service_health: None,
            health_checking: false,
        }
    }

    pub fn phase(&self) -> RequestPhase {
        if self.in_flight {
            RequestPhase::InFlight
        } else {
            RequestPhase::Idle
        }
    }

    /// Pick between spinner, error and video based on the in-flight flag and
    /// the most recent outcome.
    pub fn view(&self) -> ResultView<'_> {
        if self.in_flight {
            return ResultView::Busy(self.animation_kind);
        }
        match (self.last_outcome, &self.error, &self.result) {
            (Outcome::Failed, Some(message), _) => ResultView::Error(message.as_str()),
            (_, _, Some(result)) => ResultView::Video(result),
            (_, Some(message), None) => ResultView::Error(message.as_str()),
            _ => ResultView::Empty,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(AnimationKind::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`UiState`].
///
/// Cheap to clone.  Lock through [`lock_state`] for a short critical section;
/// never hold the guard across `.await`.
pub type SharedState = Arc<Mutex<UiState>>;

pub fn new_shared_state(animation_kind: AnimationKind) -> SharedState {
    Arc::new(Mutex::new(UiState::new(animation_kind)))
}

/// Lock the state, recovering the data if a previous holder panicked.
pub fn lock_state(state: &SharedState) -> MutexGuard<'_, UiState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
