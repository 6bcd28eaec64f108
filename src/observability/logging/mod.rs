//! Named logger registry with console and rotating-file sinks.
//!
//! # Data Flow
//! ```text
//! LoggerRegistry::acquire(name)
//!     → existing handle? return it unchanged
//!     → else: create log dir (+ .gitkeep), build sinks, cache handle
//!
//! tracing::info!(..) under a handle's dispatcher
//!     → format.rs (fixed line layout)
//!     → console sink (stdout, INFO and above)
//!     → file sink (rotation.rs, handle's level and above)
//! ```
//!
//! # Design Decisions
//! - First acquisition of a name wins; later options are ignored
//! - The log file is opened on the first line, the directory on acquisition
//! - Release is explicit; nothing is registered to run at process exit

mod clock;
mod error;
mod format;
mod handle;
mod level;
mod registry;
mod rotation;
mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::LogError;
pub use format::{LineFormat, TIMESTAMP_FORMAT};
pub use handle::{LoggerHandle, LoggerOptions, PLACEHOLDER_FILE};
pub use level::{level_label, parse_level};
pub use registry::LoggerRegistry;
pub use rotation::{RotatingFile, Rotation};
