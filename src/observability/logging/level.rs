//! Level names accepted in configuration and printed in log lines.

use tracing::Level;

use super::error::LogError;

/// Parse a level name.
///
/// Accepts `TRACE`, `DEBUG`, `INFO`, `WARN`/`WARNING`, `ERROR` and
/// `CRITICAL` in any case. There is no level above ERROR in `tracing`, so
/// `CRITICAL` collapses onto it.
pub fn parse_level(name: &str) -> Result<Level, LogError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" => Ok(Level::ERROR),
        _ => Err(LogError::InvalidLevel(name.to_string())),
    }
}

/// The label written into the `LEVEL` column of a log line.
pub fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

/// Serde adapter storing a [`Level`] as its name.
pub(crate) mod serde_level {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use tracing::Level;

    pub fn serialize<S: Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::level_label(level))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
        let name = String::deserialize(deserializer)?;
        super::parse_level(&name).map_err(de::Error::custom)
    }
}
