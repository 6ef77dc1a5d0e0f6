//! One module per dataset service endpoint.

mod upload;
pub use upload::ProgressSink;

mod filters;
mod search;
mod export;
mod clear;
