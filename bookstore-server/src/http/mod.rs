//! HTTP server layer
//!
//! Local stand-in for API Gateway: requests become events, envelopes
//! become responses.

pub mod server;

pub use server::{router, run_server, ServerConfig, ServerError};
