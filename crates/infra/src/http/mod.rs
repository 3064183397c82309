//! HTTP client used by the remote flight source adapter

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
