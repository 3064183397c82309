//! On-demand route queries against the remote flight source

pub mod service;

pub use service::RouteQueryService;
