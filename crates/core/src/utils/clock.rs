//! Wall-clock access

use std::sync::Arc;

/// Source of "now" in Unix epoch milliseconds.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Clock backed by the system time.
pub fn system_clock() -> Clock {
    Arc::new(now_millis)
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
