//! Flight duration history: normalization, ingestion and reads

pub mod ingestor;
pub mod normalizer;
pub mod ports;
pub mod service;

pub use ingestor::IngestionService;
pub use service::HistoryService;
