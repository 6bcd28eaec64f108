//! Process-wide registry of named logger handles.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::clock::{Clock, SystemClock};
use super::error::LogError;
use super::handle::{LoggerHandle, LoggerOptions};

/// A cache of logger handles keyed by name.
///
/// The first acquisition of a name builds its sinks; every later
/// acquisition returns the same handle and ignores the options passed.
/// Construction happens under the map's entry lock, so concurrent callers
/// never build two sink sets for one name.
#[derive(Debug)]
pub struct LoggerRegistry {
    handles: DashMap<String, Arc<LoggerHandle>>,
    clock: Arc<dyn Clock>,
}

impl LoggerRegistry {
    /// Create an empty registry using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty registry whose handles read time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            handles: DashMap::new(),
            clock,
        }
    }

    /// Acquire `name` with the default options.
    pub fn acquire(&self, name: &str) -> Result<Arc<LoggerHandle>, LogError> {
        self.acquire_with(name, LoggerOptions::default())
    }

    /// Acquire `name`, building it from `options` if it does not exist yet.
    pub fn acquire_with(
        &self,
        name: &str,
        options: LoggerOptions,
    ) -> Result<Arc<LoggerHandle>, LogError> {
        if name.is_empty() {
            return Err(LogError::EmptyName);
        }

        let existing = match self.handles.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let handle = Arc::new(LoggerHandle::build(name, options, self.clock.clone())?);
                entry.insert(handle.clone());
                return Ok(handle);
            }
        };

        if existing.options() != &options {
            tracing::debug!(
                logger = %name,
                "Logger already registered; ignoring new options"
            );
        }
        Ok(existing)
    }

    /// Look up a handle without creating it.
    pub fn get(&self, name: &str) -> Option<Arc<LoggerHandle>> {
        self.handles.get(name).map(|entry| entry.value().clone())
    }

    /// Close the sinks of `handle`. The handle stays registered.
    pub fn release(&self, handle: &LoggerHandle) -> Result<(), LogError> {
        handle.release()
    }

    /// Close the sinks of every registered handle.
    ///
    /// All handles are released even if one fails; the first error is returned.
    pub fn release_all(&self) -> Result<(), LogError> {
        let handles: Vec<Arc<LoggerHandle>> =
            self.handles.iter().map(|entry| entry.value().clone()).collect();

        let mut first_error = None;
        for handle in handles {
            if let Err(e) = handle.release() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handles.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
