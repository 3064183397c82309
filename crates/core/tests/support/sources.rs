//! Scripted `FlightSource` for driving the services deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use routewatch_core::FlightSource;
use routewatch_domain::{FlightSnapshot, Result, RouteWatchError};

/// Replays queued responses in order, then repeats the fallback forever.
pub struct MockFlightSource {
    script: Mutex<VecDeque<Result<Vec<FlightSnapshot>>>>,
    fallback: Result<Vec<FlightSnapshot>>,
    delay: Duration,
    calls: AtomicUsize,
    requests: Mutex<Vec<FetchRequest>>,
}

/// What a caller asked the source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    ByCode(String),
    ByRoute { departure_iata: String, arrival_iata: String, limit: usize },
}

impl MockFlightSource {
    pub fn returning(snapshots: Vec<FlightSnapshot>) -> Self {
        Self::with_fallback(Ok(snapshots))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_fallback(Err(RouteWatchError::Network(message.to_string())))
    }

    fn with_fallback(fallback: Result<Vec<FlightSnapshot>>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a one-off response served before the fallback.
    pub fn then(self, response: Result<Vec<FlightSnapshot>>) -> Self {
        self.script.lock().push_back(response);
        self
    }

    /// Make every fetch take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }

    async fn respond(&self, request: FetchRequest) -> Result<Vec<FlightSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let scripted = self.script.lock().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl FlightSource for MockFlightSource {
    async fn fetch_by_code(&self, flight_code: &str) -> Result<Vec<FlightSnapshot>> {
        self.respond(FetchRequest::ByCode(flight_code.to_string())).await
    }

    async fn fetch_by_route(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
        limit: usize,
    ) -> Result<Vec<FlightSnapshot>> {
        self.respond(FetchRequest::ByRoute {
            departure_iata: departure_iata.to_string(),
            arrival_iata: arrival_iata.to_string(),
            limit,
        })
        .await
    }
}
