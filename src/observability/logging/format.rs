//! The fixed log line layout.
//!
//! ```text
//! 15-10-2026 09:41:07 - INFO - server - line : 88 - listening \n\n
//! ```
//!
//! Downstream tooling parses these files, so the layout is a contract:
//! timestamp `DD-MM-YYYY HH:MM:SS`, level, module, line number, message, a
//! space, then a newline plus the record terminator (a trailing blank line).

use std::fmt::{self, Write as _};
use std::path::Path;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::clock::Clock;
use super::level::level_label;

/// `strftime` layout of the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Event formatter producing the fixed line layout.
#[derive(Debug, Clone)]
pub struct LineFormat {
    clock: Arc<dyn Clock>,
}

impl LineFormat {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut message = MessageVisitor::default();
        event.record(&mut message);

        write!(
            writer,
            "{} - {} - {} - line : {} - {} \n\n",
            self.clock.now().format(TIMESTAMP_FORMAT),
            level_label(meta.level()),
            module_name(meta),
            meta.line().unwrap_or(0),
            message.finish(),
        )
    }
}

/// Short module name: the source file stem, else the last module path
/// segment, else the target.
fn module_name<'a>(meta: &'a Metadata<'a>) -> &'a str {
    meta.file()
        .and_then(|file| Path::new(file).file_stem())
        .and_then(|stem| stem.to_str())
        .or_else(|| meta.module_path().and_then(|path| path.rsplit("::").next()))
        .unwrap_or_else(|| meta.target())
}

/// Collects the `message` field followed by any other fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut out = self.message;
        out.push_str(&self.fields);
        out
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
