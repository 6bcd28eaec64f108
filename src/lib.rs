//! AI layer HTTP service.
//!
//! A small axum service exposing `ping` and `llm` route groups behind a
//! permissive CORS policy, with all output going through a named logger
//! registry (console plus a time-rotated file).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod security;

pub use config::{ServiceConfig, Settings};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::logging::{LoggerHandle, LoggerOptions, LoggerRegistry};
