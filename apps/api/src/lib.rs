//! Resume export service: a paginated layout engine with PDF and Word-HTML
//! back-ends, served over HTTP by the `resume-export-api` binary.

pub mod config;
pub mod document;
pub mod errors;
pub mod export;
pub mod layout;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
