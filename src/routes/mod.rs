//! Route groups mounted by the HTTP server.
//!
//! - `ping`: liveness
//! - `llm`: provider credential status (no inference is performed here)

pub mod llm;
pub mod ping;
