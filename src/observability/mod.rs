//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events, routed through the installed logger handle
//!       (logging/: console + rotating file, fixed line layout)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout and log/project.log
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
