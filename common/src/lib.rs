//! Common library exports shared between the api client and the frontend.

extern crate serde;


pub mod facet;
pub mod error;
pub mod status;
pub mod search_query;
pub mod search_result;
pub mod option_store;
pub mod selection;
pub mod facet_filter;
pub mod projector;
pub mod text_highlight;
pub mod download;
pub mod upload;
pub mod orchestrator;
