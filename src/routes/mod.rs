//! HTTP route handlers for the Inventar API.
//!
//! - `items`: CRUD, search and totals over the inventory
//! - `export`: download of the raw inventory file
//! - `health`: health, readiness, metrics and version endpoints

pub mod export;
pub mod health;
pub mod items;
