//! AviationStack-compatible flight data client
//!
//! Implements [`FlightSource`] against the `GET v1/flights` endpoint. The
//! access key is forwarded as an opaque query parameter when configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use routewatch_core::FlightSource;
use routewatch_domain::{FlightApiConfig, FlightSnapshot, Result, RouteWatchError};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::http::HttpClient;

const FLIGHTS_PATH: &str = "v1/flights";

/// Flight source backed by an AviationStack-style HTTP API.
#[derive(Clone)]
pub struct AviationStackClient {
    http: HttpClient,
    flights_url: Url,
    access_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightsEnvelope {
    #[serde(default)]
    data: Option<Vec<FlightSnapshot>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl AviationStackClient {
    /// Build a client with its own HTTP stack from `config`.
    pub fn new(config: &FlightApiConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .max_attempts(config.max_attempts)
            .build()?;

        Self::with_http_client(http, &config.base_url, config.access_key.clone())
    }

    /// Build a client over a preconfigured [`HttpClient`].
    pub fn with_http_client(
        http: HttpClient,
        base_url: &str,
        access_key: Option<String>,
    ) -> Result<Self> {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let flights_url = Url::parse(&base)
            .and_then(|base| base.join(FLIGHTS_PATH))
            .map_err(|err| RouteWatchError::Config(format!("invalid flight API base URL '{base_url}': {err}")))?;

        Ok(Self { http, flights_url, access_key: access_key.filter(|key| !key.is_empty()) })
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<Vec<FlightSnapshot>> {
        let mut request = self.http.request(Method::GET, self.flights_url.clone());
        if let Some(key) = &self.access_key {
            request = request.query(&[("access_key", key)]);
        }
        request = request.query(query);

        let envelope: FlightsEnvelope = self.http.get_json(request).await?;

        if let Some(error) = envelope.error {
            return Err(RouteWatchError::Network(format!(
                "flight API error {}: {}",
                error.code.as_deref().unwrap_or("unknown"),
                error.message.as_deref().unwrap_or("no message")
            )));
        }

        envelope
            .data
            .ok_or_else(|| RouteWatchError::Network("flight API response has no data field".into()))
    }
}

#[async_trait]
impl FlightSource for AviationStackClient {
    #[instrument(skip(self))]
    async fn fetch_by_code(&self, flight_code: &str) -> Result<Vec<FlightSnapshot>> {
        let snapshots = self.fetch(&[("flight_iata", flight_code.to_string())]).await?;
        debug!(count = snapshots.len(), "flight lookup returned");
        Ok(snapshots)
    }

    #[instrument(skip(self))]
    async fn fetch_by_route(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
        limit: usize,
    ) -> Result<Vec<FlightSnapshot>> {
        let mut snapshots = self
            .fetch(&[
                ("dep_iata", departure_iata.to_string()),
                ("arr_iata", arrival_iata.to_string()),
                ("limit", limit.to_string()),
            ])
            .await?;
        snapshots.truncate(limit);

        debug!(count = snapshots.len(), "route lookup returned");
        Ok(snapshots)
    }
}
