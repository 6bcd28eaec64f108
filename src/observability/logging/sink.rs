//! Console and rotating-file sinks shared by a logger handle.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

use super::error::LogError;
use super::rotation::RotatingFile;

/// The sinks owned by one handle.
///
/// Both writers stay installed in the handle's subscriber for its whole
/// life; releasing the set turns them into no-ops.
#[derive(Debug)]
pub(crate) struct SinkSet {
    console_attached: AtomicBool,
    file: Mutex<Option<RotatingFile>>,
    file_path: PathBuf,
}

impl SinkSet {
    pub(crate) fn new(file: RotatingFile) -> Arc<Self> {
        Arc::new(Self {
            console_attached: AtomicBool::new(true),
            file_path: file.path().to_path_buf(),
            file: Mutex::new(Some(file)),
        })
    }

    pub(crate) fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    pub(crate) fn is_released(&self) -> bool {
        !self.console_attached.load(Ordering::Acquire)
            && self
                .file
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_none()
    }

    /// Detach the console and close the file. Idempotent.
    pub(crate) fn release(&self) -> Result<(), LogError> {
        self.console_attached.store(false, Ordering::Release);
        let _ = io::stdout().flush();

        let taken = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match taken {
            Some(mut file) => file
                .close()
                .map_err(|source| LogError::io(&self.file_path, source)),
            None => Ok(()),
        }
    }
}

/// Writer for standard output.
#[derive(Debug, Clone)]
pub(crate) struct ConsoleWriter(pub(crate) Arc<SinkSet>);

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.0.console_attached.load(Ordering::Acquire) {
            io::stdout().lock().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Writer for the rotating file. Each formatted event arrives as one buffer
/// and is appended under the sink lock.
#[derive(Debug, Clone)]
pub(crate) struct FileWriter(pub(crate) Arc<SinkSet>);

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.0.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = file.as_mut() {
            file.write_record(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
