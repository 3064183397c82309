//! Shared helpers for `routewatch-app` integration tests.
#![allow(dead_code)]

use std::time::Duration;

use routewatch_domain::{Config, DatabaseConfig, FlightApiConfig, IngestionConfig, TrackingConfig};
use routewatch_lib::AppContext;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An application context wired to a mock flight API and a throwaway
/// database.
pub struct TestApp {
    pub ctx: AppContext,
    pub server: MockServer,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Build the context after `customize` adjusts the test configuration.
    pub async fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let server = MockServer::start().await;
        let temp_dir = TempDir::new().expect("temp dir should be created");

        let mut config = Config {
            database: DatabaseConfig {
                path: temp_dir.path().join("routewatch.db").to_string_lossy().into_owned(),
                pool_size: 4,
            },
            flight_api: FlightApiConfig { base_url: server.uri(), ..FlightApiConfig::default() },
            ingestion: IngestionConfig {
                initial_delay_seconds: 0,
                require_network: false,
                ..IngestionConfig::default()
            },
            tracking: TrackingConfig { poll_interval_seconds: 1 },
            ..Config::default()
        };
        customize(&mut config);

        let ctx = AppContext::new(config).expect("context should be created");
        Self { ctx, server, _temp_dir: temp_dir }
    }

    /// Answer route queries for `departure` to `arrival` with `flights`.
    pub async fn mount_route(&self, departure: &str, arrival: &str, flights: Vec<Value>) {
        self.mount_slow_route(departure, arrival, flights, Duration::ZERO).await;
    }

    /// Like [`TestApp::mount_route`], but every response is held back by
    /// `delay`.
    pub async fn mount_slow_route(
        &self,
        departure: &str,
        arrival: &str,
        flights: Vec<Value>,
        delay: Duration,
    ) {
        Mock::given(method("GET"))
            .and(path("/v1/flights"))
            .and(query_param("dep_iata", departure))
            .and(query_param("arr_iata", arrival))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": flights }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer lookups of a single flight code with `flights`.
    pub async fn mount_flight(&self, code: &str, flights: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/v1/flights"))
            .and(query_param("flight_iata", code))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": flights })))
            .mount(&self.server)
            .await;
    }
}

/// Flight payload in the remote source's JSON shape.
pub fn flight_json(code: &str, departure: &str, arrival: &str) -> Value {
    json!({
        "flight_status": "active",
        "flight": { "iata": code },
        "departure": { "iata": "LAX", "airport": "Los Angeles International", "scheduled": departure },
        "arrival": { "iata": "JFK", "airport": "John F Kennedy International", "scheduled": arrival },
        "airline": { "name": "American Airlines" }
    })
}
