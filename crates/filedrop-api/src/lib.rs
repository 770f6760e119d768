//! Filedrop API
//!
//! HTTP surface for the upload service: router, handlers, error mapping,
//! and process setup.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
