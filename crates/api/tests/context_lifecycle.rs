//! Integration tests for AppContext lifecycle
//!
//! Startup, background job control, health reporting and shutdown.

mod support;

use routewatch_domain::RouteWatchError;
use routewatch_lib::{start_tracking, AppContext};
use support::{flight_json, TestApp};

fn component<'a>(
    status: &'a routewatch_lib::utils::health::HealthStatus,
    name: &str,
) -> &'a routewatch_lib::utils::health::ComponentHealth {
    status.components.iter().find(|c| c.name == name).expect("component should be reported")
}

#[tokio::test(flavor = "multi_thread")]
async fn scheduler_is_reported_until_background_jobs_start() {
    let app = TestApp::new().await;

    let before = app.ctx.health_check().await;
    assert!(!before.is_healthy);
    assert!(component(&before, "database").is_healthy);
    assert!(!component(&before, "ingestion_scheduler").is_healthy);

    app.ctx.start_background_jobs().await.expect("jobs should start");

    let after = app.ctx.health_check().await;
    assert!(after.is_healthy, "unexpected health: {after:?}");
    assert_eq!(after.score, 1.0);
    assert_eq!(component(&after, "tracker").message.as_deref(), Some("idle"));

    app.ctx.shutdown().await.expect("shutdown should succeed");
    assert!(!app.ctx.ingestion_scheduler.read().await.is_running());
}

#[tokio::test(flavor = "multi_thread")]
async fn starting_background_jobs_twice_is_a_no_op() {
    let app = TestApp::new().await;

    app.ctx.start_background_jobs().await.unwrap();
    app.ctx.start_background_jobs().await.unwrap();
    assert!(app.ctx.ingestion_scheduler.read().await.is_running());

    app.ctx.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn disabled_ingestion_never_starts_the_scheduler() {
    let app = TestApp::with_config(|config| config.ingestion.enabled = false).await;

    app.ctx.start_background_jobs().await.unwrap();

    assert!(!app.ctx.ingestion_scheduler.read().await.is_running());
    let health = app.ctx.health_check().await;
    assert!(health.is_healthy);
    assert_eq!(component(&health, "ingestion_scheduler").message.as_deref(), Some("disabled"));
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_without_start_succeeds() {
    let app = TestApp::new().await;
    app.ctx.shutdown().await.expect("shutdown should succeed");
    app.ctx.shutdown().await.expect("second shutdown should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_stops_an_active_tracker() {
    let app = TestApp::new().await;
    app.mount_flight(
        "AA100",
        vec![flight_json("AA100", "2024-01-01T08:00:00+00:00", "2024-01-01T13:20:00+00:00")],
    )
    .await;

    assert!(start_tracking(&app.ctx, "AA100").unwrap());
    assert!(app.ctx.tracker.is_tracking());

    app.ctx.shutdown().await.unwrap();

    let state = app.ctx.tracker.state();
    assert!(!state.running);
    assert_eq!(state.flight_code.as_deref(), Some("AA100"));
}

#[tokio::test(flavor = "multi_thread")]
async fn network_gate_is_built_from_the_flight_api_url() {
    let app = TestApp::with_config(|config| config.ingestion.require_network = true).await;

    app.ctx.start_background_jobs().await.expect("jobs should start behind the gate");
    app.ctx.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_flight_api_url_fails_fast() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut config = routewatch_domain::Config::default();
    config.database.path = temp_dir.path().join("routewatch.db").to_string_lossy().into_owned();
    config.flight_api.base_url = "not a url".into();

    let err = AppContext::new(config).err().expect("context creation should fail");

    assert!(matches!(err, RouteWatchError::Config(_)), "unexpected error: {err:?}");
}
