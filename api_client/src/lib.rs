//! HTTP client for the dataset service and the flows that drive a
//! [`common::orchestrator::SearchOrchestrator`] through it.

pub mod config;
pub mod client;
pub mod api;
pub mod session;
