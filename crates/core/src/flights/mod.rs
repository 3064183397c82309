//! Remote flight source boundary

pub mod ports;
