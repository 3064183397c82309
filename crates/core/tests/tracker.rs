//! Real-time tracker lifecycle.

mod support;

use std::sync::Arc;
use std::time::Duration;

use routewatch_core::FlightTracker;
use routewatch_domain::constants::{MSG_INVALID_FLIGHT_CODE, MSG_NO_FLIGHT_DATA};
use routewatch_domain::{RouteWatchError, TrackerState};
use support::lax_jfk;
use support::sources::{FetchRequest, MockFlightSource};
use tokio::sync::watch;

const FAST: Duration = Duration::from_millis(20);
const WAIT: Duration = Duration::from_secs(5);

async fn wait_for(
    rx: &mut watch::Receiver<TrackerState>,
    predicate: impl FnMut(&TrackerState) -> bool,
) -> TrackerState {
    tokio::time::timeout(WAIT, rx.wait_for(predicate))
        .await
        .expect("tracker state did not converge in time")
        .expect("tracker dropped")
        .clone()
}

#[tokio::test(flavor = "multi_thread")]
async fn first_poll_publishes_snapshot_without_error() {
    let source = Arc::new(MockFlightSource::returning(vec![lax_jfk("AA100", 300)]));
    let tracker = FlightTracker::new(Arc::clone(&source) as _, Duration::from_secs(60));
    let mut rx = tracker.subscribe();

    assert!(tracker.start(" AA100 ").unwrap());
    let state = wait_for(&mut rx, |s| s.poll_count == 1).await;

    assert!(state.running);
    assert_eq!(state.flight_code.as_deref(), Some("AA100"));
    assert_eq!(state.last_snapshot.as_ref().and_then(|s| s.flight_code()), Some("AA100"));
    assert_eq!(state.last_error, None);
    assert!(state.last_polled_at.is_some());
    assert_eq!(source.requests()[0], FetchRequest::ByCode("AA100".into()));

    tracker.stop();
}

#[tokio::test(flavor = "multi_thread")]
async fn failures_replace_snapshot_and_error_together() {
    let source = Arc::new(
        MockFlightSource::returning(vec![lax_jfk("AA100", 300)])
            .then(Ok(vec![lax_jfk("AA100", 300)]))
            .then(Err(RouteWatchError::Network("HTTP 503".into())))
            .then(Ok(vec![])),
    );
    let tracker = FlightTracker::new(Arc::clone(&source) as _, FAST);
    let mut rx = tracker.subscribe();

    tracker.start("AA100").unwrap();

    let first = wait_for(&mut rx, |s| s.poll_count == 1).await;
    assert!(first.last_snapshot.is_some() && first.last_error.is_none());

    let second = wait_for(&mut rx, |s| s.poll_count == 2).await;
    assert!(second.last_snapshot.is_none());
    assert_eq!(second.last_error.as_deref(), Some("Error: Network error: HTTP 503"));

    let third = wait_for(&mut rx, |s| s.poll_count == 3).await;
    assert!(third.last_snapshot.is_none());
    assert_eq!(third.last_error.as_deref(), Some(MSG_NO_FLIGHT_DATA));

    let fourth = wait_for(&mut rx, |s| s.poll_count == 4).await;
    assert!(fourth.last_snapshot.is_some() && fourth.last_error.is_none());

    tracker.stop();
}

#[tokio::test(flavor = "multi_thread")]
async fn start_while_tracking_keeps_the_existing_session() {
    let source = Arc::new(MockFlightSource::returning(vec![lax_jfk("AA100", 300)]));
    let tracker = FlightTracker::new(Arc::clone(&source) as _, Duration::from_secs(60));
    let mut rx = tracker.subscribe();

    assert!(tracker.start("AA100").unwrap());
    wait_for(&mut rx, |s| s.poll_count == 1).await;

    assert!(!tracker.start("DL200").unwrap());

    let state = tracker.state();
    assert_eq!(state.flight_code.as_deref(), Some("AA100"));
    assert_eq!(state.poll_count, 1);
    assert!(source.requests().iter().all(|r| r == &FetchRequest::ByCode("AA100".into())));

    tracker.stop();
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_is_idempotent_from_idle_and_tracking() {
    let tracker =
        FlightTracker::new(Arc::new(MockFlightSource::returning(vec![])), Duration::from_secs(60));

    assert!(!tracker.stop());
    assert!(!tracker.stop());
    assert!(!tracker.is_tracking());

    tracker.start("AA100").unwrap();
    assert!(tracker.stop());
    assert!(!tracker.stop());
    assert!(!tracker.is_tracking());
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_ends_polling_and_keeps_last_result_visible() {
    let source = Arc::new(MockFlightSource::returning(vec![lax_jfk("AA100", 300)]));
    let tracker = FlightTracker::new(Arc::clone(&source) as _, FAST);
    let mut rx = tracker.subscribe();

    tracker.start("AA100").unwrap();
    wait_for(&mut rx, |s| s.poll_count >= 2).await;

    assert!(tracker.stop_and_wait(WAIT).await);
    let calls_after_stop = source.calls();
    tokio::time::sleep(FAST * 5).await;

    assert_eq!(source.calls(), calls_after_stop);
    let state = tracker.state();
    assert!(!state.running);
    assert!(state.last_snapshot.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_does_not_interrupt_an_in_flight_fetch() {
    let source = Arc::new(
        MockFlightSource::returning(vec![lax_jfk("AA100", 300)]).with_delay(Duration::from_millis(200)),
    );
    let tracker = FlightTracker::new(Arc::clone(&source) as _, Duration::from_secs(60));
    let mut rx = tracker.subscribe();

    tracker.start("AA100").unwrap();
    while source.calls() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    tracker.stop();

    let state = wait_for(&mut rx, |s| s.poll_count == 1).await;
    assert!(!state.running);
    assert!(state.last_snapshot.is_some());
    assert_eq!(source.calls(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn restart_clears_previous_results_and_ignores_stale_loop() {
    let slow = Arc::new(
        MockFlightSource::returning(vec![lax_jfk("AA100", 300)]).with_delay(Duration::from_millis(200)),
    );
    let tracker = FlightTracker::new(Arc::clone(&slow) as _, Duration::from_secs(60));
    let mut rx = tracker.subscribe();

    tracker.start("AA100").unwrap();
    while slow.calls() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    tracker.stop();
    assert!(tracker.start("DL200").unwrap());

    let state = tracker.state();
    assert_eq!(state.flight_code.as_deref(), Some("DL200"));
    assert_eq!(state.poll_count, 0);

    let state = wait_for(&mut rx, |s| s.poll_count >= 1).await;
    assert_eq!(state.flight_code.as_deref(), Some("DL200"));
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(tracker.state().poll_count, 1);

    tracker.stop();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_start_and_stop_leave_no_orphaned_loop() {
    let source = Arc::new(MockFlightSource::returning(vec![lax_jfk("AA100", 300)]));
    let tracker = Arc::new(FlightTracker::new(Arc::clone(&source) as _, FAST));

    let starter = {
        let tracker = Arc::clone(&tracker);
        tokio::spawn(async move {
            for _ in 0..500 {
                tracker.start("AA100").unwrap();
                tokio::task::yield_now().await;
            }
        })
    };
    let stopper = {
        let tracker = Arc::clone(&tracker);
        tokio::spawn(async move {
            for _ in 0..500 {
                tracker.stop();
                tokio::task::yield_now().await;
            }
        })
    };
    starter.await.unwrap();
    stopper.await.unwrap();

    assert!(tracker.stop_and_wait(WAIT).await);
    assert!(!tracker.is_tracking());

    // Cancelled loops may still finish a fetch that was already in flight.
    tokio::time::sleep(FAST * 5).await;
    let settled = source.calls();
    tokio::time::sleep(FAST * 10).await;

    assert_eq!(source.calls(), settled, "a loop kept polling after the tracker went idle");
}

#[tokio::test]
async fn blank_flight_code_is_rejected() {
    let tracker =
        FlightTracker::new(Arc::new(MockFlightSource::returning(vec![])), Duration::from_secs(60));

    let err = tracker.start("   ").unwrap_err();

    assert_eq!(err, RouteWatchError::InvalidInput(MSG_INVALID_FLIGHT_CODE.to_string()));
    assert!(!tracker.is_tracking());
}
