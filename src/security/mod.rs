//! Security policy applied at the HTTP edge.
//!
//! # Responsibilities
//! - CORS policy (cors.rs)

pub mod cors;
