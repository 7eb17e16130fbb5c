//! Middleware components for HTTP request processing.
//!
//! Cross-cutting response handling that is layered onto the router in
//! [`crate::app::build_app`].

pub mod security_headers;
