//! Real-time tracker
//!
//! A cancellable polling loop bound to one flight code. Every poll publishes
//! its outcome through a `watch` channel as one [`TrackerState`] value, so a
//! reader never sees the snapshot of one poll next to the error of another.
//!
//! Cancellation is cooperative: the token is checked before each fetch and
//! raced against each inter-poll wait, but an in-flight fetch is never
//! interrupted. A session generation counter keeps a loop that outlived its
//! session from overwriting the state of the next one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use routewatch_domain::constants::{MSG_INVALID_FLIGHT_CODE, MSG_NO_FLIGHT_DATA};
use routewatch_domain::{FlightSnapshot, Result, RouteWatchError, TrackerState};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::flights::ports::FlightSource;
use crate::utils::clock::{system_clock, Clock};

struct TrackingSession {
    id: u64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Polls the flight source for one flight at a fixed interval.
///
/// At most one session is active per tracker. Must be started from within a
/// Tokio runtime.
pub struct FlightTracker {
    source: Arc<dyn FlightSource>,
    poll_interval: Duration,
    clock: Clock,
    state: Arc<watch::Sender<TrackerState>>,
    generation: Arc<AtomicU64>,
    session: Mutex<Option<TrackingSession>>,
}

impl FlightTracker {
    /// Create an idle tracker that waits `poll_interval` between fetches.
    pub fn new(source: Arc<dyn FlightSource>, poll_interval: Duration) -> Self {
        let (state, _) = watch::channel(TrackerState::default());

        Self {
            source,
            poll_interval,
            clock: system_clock(),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            session: Mutex::new(None),
        }
    }

    /// Override the clock used to stamp `last_polled_at`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Begin tracking `flight_code`.
    ///
    /// Returns `Ok(false)` without touching the running session when the
    /// tracker is already tracking, whatever code is passed. Otherwise the
    /// previous snapshot and error are cleared and the first fetch starts
    /// immediately.
    pub fn start(&self, flight_code: &str) -> Result<bool> {
        let flight_code = flight_code.trim();
        if flight_code.is_empty() {
            return Err(RouteWatchError::InvalidInput(MSG_INVALID_FLIGHT_CODE.to_string()));
        }

        let mut session = self.session.lock();
        if self.state.borrow().running {
            debug!(flight = flight_code, "tracker already running; start ignored");
            return Ok(false);
        }

        let id = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.send_replace(TrackerState {
            flight_code: Some(flight_code.to_string()),
            running: true,
            ..TrackerState::default()
        });

        let cancel = CancellationToken::new();
        let poller = Poller {
            source: Arc::clone(&self.source),
            flight_code: flight_code.to_string(),
            interval: self.poll_interval,
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            session_id: id,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(poller.run());

        if let Some(stale) = session.replace(TrackingSession { id, cancel, handle }) {
            stale.cancel.cancel();
            warn!(session = stale.id, "cancelled a session left in the slot while idle");
        }

        info!(flight = flight_code, session = id, "tracking started");
        Ok(true)
    }

    /// Clear the running flag and cancel the loop.
    ///
    /// Idempotent. Returns whether a session was running. The last snapshot
    /// and error stay readable until the next `start`.
    pub fn stop(&self) -> bool {
        let (session, was_running) = self.take_session();

        if let Some(session) = session {
            session.cancel.cancel();
            info!(session = session.id, "tracking stopped");
        }

        was_running
    }

    /// Stop and wait up to `timeout` for the loop task to exit.
    ///
    /// Returns `false` when the task had to be aborted or panicked.
    pub async fn stop_and_wait(&self, timeout: Duration) -> bool {
        let (session, _) = self.take_session();

        let Some(session) = session else {
            return true;
        };
        session.cancel.cancel();

        let abort = session.handle.abort_handle();
        match tokio::time::timeout(timeout, session.handle).await {
            Ok(Ok(())) => {
                debug!(session = session.id, "tracking loop joined");
                true
            }
            Ok(Err(err)) => {
                warn!(session = session.id, error = %err, "tracking loop ended abnormally");
                false
            }
            Err(_) => {
                warn!(session = session.id, ?timeout, "tracking loop did not exit in time; aborting");
                abort.abort();
                false
            }
        }
    }

    /// Consistent copy of the current state.
    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every poll and every start/stop.
    pub fn subscribe(&self) -> watch::Receiver<TrackerState> {
        self.state.subscribe()
    }

    /// Whether a session is currently running.
    pub fn is_tracking(&self) -> bool {
        self.state.borrow().running
    }

    /// Empty the session slot and clear the running flag as one step under
    /// the slot lock, so a concurrent `start` sees either both or neither.
    fn take_session(&self) -> (Option<TrackingSession>, bool) {
        let mut slot = self.session.lock();
        let was_running = self.clear_running();
        (slot.take(), was_running)
    }

    fn clear_running(&self) -> bool {
        self.state.send_if_modified(|state| std::mem::replace(&mut state.running, false))
    }
}

impl Drop for FlightTracker {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            session.cancel.cancel();
        }
    }
}

struct Poller {
    source: Arc<dyn FlightSource>,
    flight_code: String,
    interval: Duration,
    clock: Clock,
    state: Arc<watch::Sender<TrackerState>>,
    generation: Arc<AtomicU64>,
    session_id: u64,
    cancel: CancellationToken,
}

impl Poller {
    async fn run(self) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let outcome = self.source.fetch_by_code(&self.flight_code).await;
            self.publish(outcome);

            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        debug!(flight = %self.flight_code, session = self.session_id, "tracking loop exited");
    }

    fn publish(&self, outcome: Result<Vec<FlightSnapshot>>) {
        let (snapshot, error) = match outcome {
            Ok(snapshots) => match snapshots.into_iter().next() {
                Some(snapshot) => (Some(snapshot), None),
                None => (None, Some(MSG_NO_FLIGHT_DATA.to_string())),
            },
            Err(err) => {
                warn!(flight = %self.flight_code, error = %err, "tracking poll failed");
                (None, Some(format!("Error: {err}")))
            }
        };
        let polled_at = (self.clock)();

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::Acquire) != self.session_id {
                return false;
            }
            state.last_snapshot = snapshot;
            state.last_error = error;
            state.last_polled_at = Some(polled_at);
            state.poll_count += 1;
            true
        });

        if !published {
            debug!(session = self.session_id, "discarding poll result from a replaced session");
        }
    }
}
