//! Named logger handles.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{Dispatch, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, Layer, Registry};

use super::clock::Clock;
use super::error::LogError;
use super::format::LineFormat;
use super::level::serde_level;
use super::rotation::{RotatingFile, Rotation};
use super::sink::{ConsoleWriter, FileWriter, SinkSet};

/// Placeholder written into a freshly created log directory.
pub const PLACEHOLDER_FILE: &str = ".gitkeep";

/// Sink configuration used when a handle is first built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Directory holding the active and rotated files.
    pub log_dir: PathBuf,

    /// Active file name inside `log_dir`.
    pub file_name: String,

    /// Rotated files to keep; 0 keeps all of them.
    pub backup_count: usize,

    /// Rotation trigger.
    pub rotation: Rotation,

    /// Threshold of the file sink. The console sink is always INFO.
    #[serde(with = "serde_level")]
    pub level: Level,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("log"),
            file_name: "project.log".to_string(),
            backup_count: 30,
            rotation: Rotation::Midnight,
            level: Level::INFO,
        }
    }
}

/// A configured, named logging facility.
///
/// Log through it with the ordinary `tracing` macros, either inside
/// [`LoggerHandle::in_scope`] or after [`LoggerHandle::install`].
pub struct LoggerHandle {
    name: String,
    options: LoggerOptions,
    dispatch: Dispatch,
    sinks: Arc<SinkSet>,
}

impl std::fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("released", &self.sinks.is_released())
            .finish()
    }
}

impl LoggerHandle {
    /// Build the console and file sinks for `name`.
    ///
    /// Creates `options.log_dir` (with a placeholder file) when missing. The
    /// log file itself is not opened until the first line is written.
    pub(crate) fn build(
        name: &str,
        options: LoggerOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LogError> {
        prepare_log_dir(&options.log_dir)?;

        let file = RotatingFile::new(
            &options.log_dir,
            &options.file_name,
            options.rotation,
            options.backup_count,
            clock.clone(),
        );
        let sinks = SinkSet::new(file);

        let console = fmt::layer()
            .event_format(LineFormat::new(clock.clone()))
            .with_writer(ConsoleWriter(sinks.clone()))
            .with_filter(LevelFilter::INFO);
        let file = fmt::layer()
            .event_format(LineFormat::new(clock))
            .with_writer(FileWriter(sinks.clone()))
            .with_ansi(false)
            .with_filter(LevelFilter::from_level(options.level));

        let subscriber = Registry::default().with(console).with(file);

        Ok(Self {
            name: name.to_string(),
            options,
            dispatch: Dispatch::new(subscriber),
            sinks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options the handle was built with.
    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    /// Path of the active log file.
    pub fn log_path(&self) -> &Path {
        self.sinks.file_path()
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this handle as the current thread's default subscriber.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Install this handle as the process-wide default subscriber.
    pub fn install(&self) -> Result<(), LogError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| LogError::Install)
    }

    /// Flush and close the file sink and detach the console sink.
    ///
    /// Calling it again is a no-op. The handle stays usable; lines logged
    /// through it afterwards are discarded.
    pub fn release(&self) -> Result<(), LogError> {
        self.sinks.release()
    }

    pub fn is_released(&self) -> bool {
        self.sinks.is_released()
    }
}

fn prepare_log_dir(dir: &Path) -> Result<(), LogError> {
    if dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| LogError::io(dir, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o777))
            .map_err(|e| LogError::io(dir, e))?;
    }

    let placeholder = dir.join(PLACEHOLDER_FILE);
    File::create(&placeholder).map_err(|e| LogError::io(&placeholder, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LoggerOptions::default();
        assert_eq!(options.log_dir, PathBuf::from("log"));
        assert_eq!(options.file_name, "project.log");
        assert_eq!(options.backup_count, 30);
        assert_eq!(options.rotation, Rotation::Midnight);
        assert_eq!(options.level, Level::INFO);
    }

    #[test]
    fn test_options_from_toml() {
        let options: LoggerOptions = toml::from_str(
            r#"
            log_dir = "/var/log/ai-layer"
            rotation = "H"
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(options.log_dir, PathBuf::from("/var/log/ai-layer"));
        assert_eq!(options.rotation, Rotation::Hours);
        assert_eq!(options.level, Level::DEBUG);
        assert_eq!(options.file_name, "project.log");
    }

    #[test]
    fn test_options_reject_bad_rotation() {
        let result: Result<LoggerOptions, _> = toml::from_str(r#"rotation = "fortnightly""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_prepare_existing_dir_leaves_it_alone() {
        let dir = tempfile::tempdir().unwrap();
        prepare_log_dir(dir.path()).unwrap();
        assert!(!dir.path().join(PLACEHOLDER_FILE).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_new_dir_is_world_writable() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("log");
        prepare_log_dir(&dir).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
        assert!(dir.join(PLACEHOLDER_FILE).exists());
    }
}
