//! Request orchestrator — drives the submit → request → settle cycle.
//!
//! [`Orchestrator`] owns the [`SharedState`] and a [`GenerationClient`].  The
//! UI thread calls [`Orchestrator::begin`] to claim the single in-flight slot
//! and then hands the resulting [`InFlightTicket`] plus the payload to the
//! worker task over a `tokio::sync::mpsc` channel.
//!
//! # Request flow
//!
//! ```text
//! begin()                       in_flight = true, error cleared
//!   └─▶ OrchestratorCommand::Submit { ticket, payload }
//!         └─▶ client.generate(payload).await
//!               ├─ Ok(result) → result stored, generation bumped
//!               └─ Err(e)     → e.user_message() stored as error
//!         └─▶ ticket settles    in_flight = false
//! ```
//!
//! A ticket that is dropped without settling (worker gone, panic while
//! parsing) still clears `in_flight` and records [`UNKNOWN_FAILURE`].

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::client::{GenerationClient, UNKNOWN_FAILURE};
use crate::form::{AnimationKind, SubmissionPayload};

use super::state::{lock_state, Outcome, SharedState, UiState};

// ---------------------------------------------------------------------------
// SubmitError / SubmitOutcome
// ---------------------------------------------------------------------------

/// Why a submission was not started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Another submission is still in flight.
    #[error("Es läuft bereits eine Anfrage")]
    Busy,
}

/// How one `submit` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    /// Failed; carries the message now shown to the user.
    Failed(String),
    /// Refused because a request was already in flight.  No call was made.
    Rejected,
}

// ---------------------------------------------------------------------------
// InFlightTicket
// ---------------------------------------------------------------------------

/// Proof that the caller holds the single in-flight slot.
///
/// [`settle`](Self::settle) applies the outcome and clears `in_flight` under
/// one lock.  Dropping an unsettled ticket clears `in_flight` as well.
#[derive(Debug)]
pub struct InFlightTicket {
    state: SharedState,
    id: u64,
    armed: bool,
}

impl InFlightTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Apply `outcome` to the state and release the slot.
    pub fn settle(mut self, outcome: impl FnOnce(&mut UiState)) {
        let mut st = lock_state(&self.state);
        outcome(&mut *st);
        st.in_flight = false;
        self.armed = false;
    }
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        log::warn!("orchestrator: request #{} dropped before settling", self.id);
        let mut st = lock_state(&self.state);
        st.in_flight = false;
        st.error = Some(UNKNOWN_FAILURE.to_string());
        st.last_outcome = Outcome::Failed;
    }
}

// ---------------------------------------------------------------------------
// OrchestratorCommand
// ---------------------------------------------------------------------------

/// Work items for [`Orchestrator::run`].
#[derive(Debug)]
pub enum OrchestratorCommand {
    /// Perform one generation request for an already-accepted submission.
    Submit {
        ticket: InFlightTicket,
        payload: SubmissionPayload,
    },
    /// Probe the service health endpoint.  Runs beside any submission and
    /// never touches `in_flight`.
    CheckHealth,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Owns the UI state and performs the outbound calls.
///
/// Cheap to clone; the UI keeps one clone for [`begin`](Self::begin) and
/// [`select_animation`](Self::select_animation) while another runs
/// [`run`](Self::run) on the tokio runtime.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use text_to_video::client::HttpGenerationClient;
/// use text_to_video::config::AppConfig;
/// use text_to_video::orchestrator::{new_shared_state, Orchestrator};
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let state = new_shared_state(config.defaults.animation);
/// let client = Arc::new(HttpGenerationClient::from_config(&config.service));
/// let orchestrator = Orchestrator::new(state, client);
///
/// let (command_tx, command_rx) = tokio::sync::mpsc::channel(8);
/// tokio::spawn(orchestrator.clone().run(command_rx));
/// # drop(command_tx);
/// # }
/// ```
#[derive(Clone)]
pub struct Orchestrator {
    state: SharedState,
    client: Arc<dyn GenerationClient>,
}

impl Orchestrator {
    pub fn new(state: SharedState, client: Arc<dyn GenerationClient>) -> Self {
        Self { state, client }
    }

    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    // -----------------------------------------------------------------------
    // Submission lifecycle
    // -----------------------------------------------------------------------

    /// Atomically claim the in-flight slot and clear the previous error.
    pub fn begin(&self) -> Result<InFlightTicket, SubmitError> {
        let mut st = lock_state(&self.state);
        if st.in_flight {
            log::debug!("orchestrator: submission rejected, request #{} still in flight", st.request_seq);
            return Err(SubmitError::Busy);
        }
        st.in_flight = true;
        st.error = None;
        st.request_seq += 1;

        Ok(InFlightTicket {
            state: Arc::clone(&self.state),
            id: st.request_seq,
            armed: true,
        })
    }

    /// [`begin`](Self::begin) followed by [`dispatch`](Self::dispatch).
    pub async fn submit(&self, payload: SubmissionPayload) -> SubmitOutcome {
        match self.begin() {
            Ok(ticket) => self.dispatch(ticket, payload).await,
            Err(SubmitError::Busy) => SubmitOutcome::Rejected,
        }
    }

    /// Issue exactly one request for an accepted submission and settle it.
    pub async fn dispatch(&self, ticket: InFlightTicket, payload: SubmissionPayload) -> SubmitOutcome {
        log::info!(
            "orchestrator: request #{} started ({:?} flow, {} words)",
            ticket.id(),
            payload.mode,
            crate::form::word_count(&payload.primary_text)
        );

        match self.client.generate(&payload).await {
            Ok(result) => {
                if result.is_free() {
                    log::info!("orchestrator: request #{} generated at no cost", ticket.id());
                }
                log::info!(
                    "orchestrator: request #{} succeeded → {}",
                    ticket.id(),
                    result.media_locator
                );
                ticket.settle(|st| {
                    st.result = Some(result);
                    st.error = None;
                    st.last_outcome = Outcome::Succeeded;
                    st.result_generation += 1;
                });
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                let message = e.user_message();
                log::error!("orchestrator: request #{} failed: {e}", ticket.id());
                let shown = message.clone();
                ticket.settle(|st| {
                    st.error = Some(shown);
                    st.last_outcome = Outcome::Failed;
                });
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Change the animation kind.  Refused while a request is in flight.
    pub fn select_animation(&self, kind: AnimationKind) -> bool {
        let mut st = lock_state(&self.state);
        if st.in_flight {
            return false;
        }
        st.animation_kind = kind;
        true
    }

    // -----------------------------------------------------------------------
    // Health probe
    // -----------------------------------------------------------------------

    pub async fn check_health(&self) {
        lock_state(&self.state).health_checking = true;

        let report = self.client.health().await.map_err(|e| e.user_message());
        match &report {
            Ok(health) => log::info!("orchestrator: service health = {}", health.status),
            Err(message) => log::warn!("orchestrator: health probe failed: {message}"),
        }

        let mut st = lock_state(&self.state);
        st.service_health = Some(report);
        st.health_checking = false;
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Process commands until `commands` is closed.
    ///
    /// Submissions run one at a time on this task.  Health checks run on
    /// their own tasks, beside any submission.
    pub async fn run(self, mut commands: mpsc::Receiver<OrchestratorCommand>) {
        let mut health_checks = JoinSet::new();

        while let Some(command) = commands.recv().await {
            match command {
                OrchestratorCommand::Submit { ticket, payload } => {
                    self.dispatch(ticket, payload).await;
                }
                OrchestratorCommand::CheckHealth => {
                    let this = self.clone();
                    health_checks.spawn(async move { this.check_health().await });
                }
            }
            while health_checks.try_join_next().is_some() {}
        }

        while health_checks.join_next().await.is_some() {}
        log::info!("orchestrator: command channel closed, shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::client::{GenerationError, RequestResult, ServiceHealth, GENERIC_FAILURE};
    use crate::form::{FormMode, GenerationOptions};
    use crate::orchestrator::state::{new_shared_state, ResultView};

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Returns a canned response and records what `in_flight` looked like
    /// while the call was running.
    struct StubClient {
        response: Result<RequestResult, GenerationError>,
        watched: Mutex<Option<SharedState>>,
        seen_in_flight: Mutex<Vec<bool>>,
        calls: AtomicUsize,
        health_hangs: bool,
    }

    impl StubClient {
        fn new(response: Result<RequestResult, GenerationError>) -> Self {
            Self {
                response,
                watched: Mutex::new(None),
                seen_in_flight: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                health_hangs: false,
            }
        }

        fn watch(&self, state: &SharedState) {
            *self.watched.lock().unwrap() = Some(Arc::clone(state));
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationClient for StubClient {
        async fn generate(
            &self,
            _payload: &SubmissionPayload,
        ) -> Result<RequestResult, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(state) = self.watched.lock().unwrap().as_ref() {
                let flag = lock_state(state).in_flight;
                self.seen_in_flight.lock().unwrap().push(flag);
            }
            self.response.clone()
        }

        async fn health(&self) -> Result<ServiceHealth, GenerationError> {
            if self.health_hangs {
                std::future::pending::<()>().await;
            }
            Ok(ServiceHealth {
                status: "healthy".into(),
                message: Some("FREE AI Text-to-Video API is running".into()),
                version: Some("3.0.0".into()),
            })
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn video(url: &str, message: Option<&str>) -> RequestResult {
        RequestResult {
            media_locator: url.into(),
            status_message: message.map(str::to_string),
            cost_indicator: Some("FREE".into()),
            media_kind: None,
            audio_locator: None,
            service_used: None,
        }
    }

    fn payload(text: &str) -> SubmissionPayload {
        SubmissionPayload {
            primary_text: text.into(),
            auxiliary_text: text.into(),
            options: GenerationOptions::default(),
            mode: FormMode::Simple,
        }
    }

    fn make_orchestrator(
        response: Result<RequestResult, GenerationError>,
    ) -> (Orchestrator, Arc<StubClient>, SharedState) {
        let state = new_shared_state(AnimationKind::Combined);
        let client = Arc::new(StubClient::new(response));
        client.watch(&state);
        let orc = Orchestrator::new(Arc::clone(&state), client.clone());
        (orc, client, state)
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn success_stores_result_and_clears_flag() {
        let (orc, client, state) = make_orchestrator(Ok(video("/media/out.mp4", Some("done"))));

        let outcome = orc.submit(payload("Eine Katze")).await;

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(client.calls(), 1);
        assert_eq!(*client.seen_in_flight.lock().unwrap(), vec![true]);

        let st = lock_state(&state);
        assert!(!st.in_flight);
        assert!(st.error.is_none());
        assert_eq!(st.result_generation, 1);
        let result = st.result.as_ref().unwrap();
        assert_eq!(result.media_locator, "/media/out.mp4");
        assert_eq!(result.status_message.as_deref(), Some("done"));
        assert!(matches!(st.view(), ResultView::Video(_)));
    }

    #[tokio::test]
    async fn remote_failure_is_shown_verbatim_and_keeps_prior_result() {
        let (orc, client, state) = make_orchestrator(Err(GenerationError::Remote {
            status: 429,
            message: "quota exceeded".into(),
        }));
        lock_state(&state).result = Some(video("/old.mp4", None));

        let outcome = orc.submit(payload("Hallo")).await;

        assert_eq!(outcome, SubmitOutcome::Failed("quota exceeded".into()));
        assert_eq!(*client.seen_in_flight.lock().unwrap(), vec![true]);
        let st = lock_state(&state);
        assert!(!st.in_flight);
        assert_eq!(st.error.as_deref(), Some("quota exceeded"));
        assert_eq!(st.result.as_ref().unwrap().media_locator, "/old.mp4");
        assert_eq!(st.view(), ResultView::Error("quota exceeded"));
    }

    #[tokio::test]
    async fn remote_failure_without_message_uses_fallback() {
        let (orc, _client, state) = make_orchestrator(Err(GenerationError::Remote {
            status: 500,
            message: String::new(),
        }));

        orc.submit(payload("Hallo")).await;

        assert_eq!(lock_state(&state).error.as_deref(), Some(GENERIC_FAILURE));
    }

    #[tokio::test]
    async fn decode_failure_clears_flag() {
        let (orc, client, state) =
            make_orchestrator(Err(GenerationError::Decode("expected value at line 1".into())));

        let outcome = orc.submit(payload("Hallo")).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(ref m) if m.contains("line 1")));
        assert_eq!(*client.seen_in_flight.lock().unwrap(), vec![true]);
        let st = lock_state(&state);
        assert!(!st.in_flight);
        assert_eq!(st.last_outcome, Outcome::Failed);
    }

    #[tokio::test]
    async fn overlapping_submission_is_rejected_without_a_call() {
        let (orc, client, state) = make_orchestrator(Ok(video("/a.mp4", None)));

        let ticket = orc.begin().expect("first submission accepted");
        assert_eq!(orc.begin().unwrap_err(), SubmitError::Busy);
        assert_eq!(orc.submit(payload("zweiter")).await, SubmitOutcome::Rejected);
        assert_eq!(client.calls(), 0);
        assert!(lock_state(&state).in_flight);

        orc.dispatch(ticket, payload("erster")).await;
        assert_eq!(client.calls(), 1);
        assert!(!lock_state(&state).in_flight);
    }

    #[tokio::test]
    async fn begin_clears_previous_error() {
        let (orc, _client, state) = make_orchestrator(Ok(video("/a.mp4", None)));
        lock_state(&state).error = Some("alt".into());

        let ticket = orc.begin().unwrap();
        assert!(lock_state(&state).error.is_none());
        drop(ticket);
    }

    #[test]
    fn dropped_ticket_releases_slot_with_fallback_error() {
        let (orc, _client, state) = make_orchestrator(Ok(video("/a.mp4", None)));

        let ticket = orc.begin().unwrap();
        drop(ticket);

        let st = lock_state(&state);
        assert!(!st.in_flight);
        assert_eq!(st.error.as_deref(), Some(UNKNOWN_FAILURE));
    }

    #[test]
    fn settled_ticket_does_not_touch_newer_request() {
        let (orc, _client, state) = make_orchestrator(Ok(video("/a.mp4", None)));

        let first = orc.begin().unwrap();
        first.settle(|st| st.last_outcome = Outcome::Succeeded);
        let _second = orc.begin().unwrap();

        let st = lock_state(&state);
        assert!(st.in_flight);
        assert!(st.error.is_none());
        assert_eq!(st.request_seq, 2);
    }

    #[test]
    fn animation_kind_is_locked_while_in_flight() {
        let (orc, _client, state) = make_orchestrator(Ok(video("/a.mp4", None)));

        assert!(orc.select_animation(AnimationKind::Text));
        let ticket = orc.begin().unwrap();
        assert!(!orc.select_animation(AnimationKind::Basic));
        assert_eq!(lock_state(&state).animation_kind, AnimationKind::Text);
        ticket.settle(|_| {});
    }

    #[tokio::test]
    async fn run_processes_commands_until_channel_closes() {
        let (orc, client, state) = make_orchestrator(Ok(video("/v.mp4", Some("fertig"))));
        let (tx, rx) = mpsc::channel(4);

        let ticket = orc.begin().unwrap();
        tx.send(OrchestratorCommand::Submit {
            ticket,
            payload: payload("Das Raumschiff"),
        })
        .await
        .unwrap();
        tx.send(OrchestratorCommand::CheckHealth).await.unwrap();
        drop(tx);

        orc.clone().run(rx).await;

        assert_eq!(client.calls(), 1);
        let st = lock_state(&state);
        assert!(!st.in_flight);
        assert_eq!(st.result_generation, 1);
        assert!(!st.health_checking);
        let health = st.service_health.as_ref().unwrap().as_ref().unwrap();
        assert!(health.is_healthy());
    }

    #[tokio::test]
    async fn hung_health_check_does_not_hold_up_a_submission() {
        let state = new_shared_state(AnimationKind::Combined);
        let mut stub = StubClient::new(Ok(video("/v.mp4", None)));
        stub.health_hangs = true;
        let client = Arc::new(stub);
        let orc = Orchestrator::new(Arc::clone(&state), client.clone());
        let (tx, rx) = mpsc::channel(4);
        let worker = tokio::spawn(orc.clone().run(rx));

        tx.send(OrchestratorCommand::CheckHealth).await.unwrap();
        let ticket = orc.begin().unwrap();
        tx.send(OrchestratorCommand::Submit {
            ticket,
            payload: payload("Das Raumschiff"),
        })
        .await
        .unwrap();

        let settled = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while lock_state(&state).in_flight {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await;

        assert!(settled.is_ok(), "submission stuck behind the health check");
        assert_eq!(client.calls(), 1);
        let st = lock_state(&state);
        assert_eq!(st.result_generation, 1);
        assert!(st.health_checking);
        drop(st);
        worker.abort();
    }

    #[tokio::test]
    async fn second_success_replaces_result_wholesale() {
        let (orc, _client, state) = make_orchestrator(Ok(video("/neu.mp4", None)));
        {
            let mut st = lock_state(&state);
            st.result = Some(video("/alt.mp4", Some("alt")));
            st.result_generation = 4;
        }

        orc.submit(payload("Text")).await;

        let st = lock_state(&state);
        let result = st.result.as_ref().unwrap();
        assert_eq!(result.media_locator, "/neu.mp4");
        assert!(result.status_message.is_none());
        assert_eq!(st.result_generation, 5);
    }
}
