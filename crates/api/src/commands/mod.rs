//! Commands - presentation layer to backend bridge

mod health;
mod history;
mod ingestion;
mod routes;
mod tracking;

pub use health::*;
pub use history::*;
pub use ingestion::*;
pub use routes::*;
pub use tracking::*;
