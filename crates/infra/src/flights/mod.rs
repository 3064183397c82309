//! Remote flight source adapters

pub mod aviationstack;

pub use aviationstack::AviationStackClient;
