//! Error type for the logger registry.

use std::path::PathBuf;

/// Errors raised while setting up or tearing down logger sinks.
///
/// Emitting a line never returns one of these: write failures on an
/// established sink are reported by the subscriber on stderr.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Logger names are registry keys and must not be empty.
    #[error("logger name must not be empty")]
    EmptyName,

    /// Filesystem failure while preparing or closing a sink.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unknown rotation trigger.
    #[error("invalid rotation interval: {0:?}")]
    InvalidRotation(String),

    /// Unknown level name.
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    /// A global default subscriber was already installed.
    #[error("a global tracing dispatcher is already installed")]
    Install,
}

impl LogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogError::Io {
            path: path.into(),
            source,
        }
    }
}
