//! # Inventar Backend Library
//!
//! A small inventory-tracking service: items with a name and a quantity,
//! kept in memory and mirrored to a single JSON file after every change.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **Tokio**: async runtime, file I/O and the store lock
//! - **Serde**: JSON bodies and the on-disk format
//!
//! ## Core Components
//!
//! - [`app`]: router assembly, frontend serving and middleware stack
//! - [`config`]: layered configuration (embedded defaults, TOML files, env)
//! - [`error`]: centralized error handling and HTTP error responses
//! - [`extract`]: extractors that reject with the JSON error body
//! - [`metrics`]: operation counters
//! - [`middleware`]: security headers
//! - [`routes`]: HTTP API endpoint handlers
//! - [`state`]: shared application state
//! - [`store`]: the file-backed item store and id allocator
//! - [`types`]: items and request/response bodies

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
