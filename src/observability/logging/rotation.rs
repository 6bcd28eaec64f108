//! Time-based rotating log file.
//!
//! # Responsibilities
//! - Compute rotation boundaries from the wall clock
//! - Rename the active file to `<file>.<suffix>` when a boundary passes
//! - Delete rotated files beyond the retention count
//!
//! The active file is opened on the first write, not at construction.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDateTime, TimeZone, Weekday};

use super::clock::Clock;
use super::error::LogError;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// When the active log file is rotated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rotation {
    /// `S`: every second.
    Seconds,
    /// `M`: every minute.
    Minutes,
    /// `H`: every hour.
    Hours,
    /// `D`: every 24 hours from the time the file was started.
    Days,
    /// `midnight`: at local midnight.
    #[default]
    Midnight,
    /// `W0`..`W6`: at the local midnight that ends the given weekday.
    Weekly(Weekday),
}

impl Rotation {
    /// Length of one rotation period.
    pub fn interval(&self) -> Duration {
        match self {
            Rotation::Seconds => Duration::seconds(1),
            Rotation::Minutes => Duration::minutes(1),
            Rotation::Hours => Duration::hours(1),
            Rotation::Days | Rotation::Midnight => Duration::days(1),
            Rotation::Weekly(_) => Duration::days(7),
        }
    }

    /// `strftime` layout of the suffix appended to rotated files.
    pub fn suffix_format(&self) -> &'static str {
        match self {
            Rotation::Seconds => "%Y-%m-%d_%H-%M-%S",
            Rotation::Minutes => "%Y-%m-%d_%H-%M",
            Rotation::Hours => "%Y-%m-%d_%H",
            Rotation::Days | Rotation::Midnight | Rotation::Weekly(_) => "%Y-%m-%d",
        }
    }

    /// Shape of a suffix produced by [`Rotation::suffix_format`]; `#` is a digit.
    fn suffix_shape(&self) -> &'static str {
        match self {
            Rotation::Seconds => "####-##-##_##-##-##",
            Rotation::Minutes => "####-##-##_##-##",
            Rotation::Hours => "####-##-##_##",
            Rotation::Days | Rotation::Midnight | Rotation::Weekly(_) => "####-##-##",
        }
    }

    /// Whether `suffix` could have been produced by this rotation.
    pub fn matches_suffix(&self, suffix: &str) -> bool {
        let shape = self.suffix_shape();
        suffix.len() == shape.len()
            && shape.chars().zip(suffix.chars()).all(|(expected, actual)| match expected {
                '#' => actual.is_ascii_digit(),
                sep => sep == actual,
            })
    }

    /// Local time stamped onto the file rotated at `boundary`.
    ///
    /// Calendar rotations step back over the local calendar, so a day
    /// shortened or lengthened by DST still names the day that ended.
    /// Fixed-length rotations name the start of the period.
    fn period_stamp(&self, period_start: NaiveDateTime, boundary: NaiveDateTime) -> NaiveDateTime {
        match self {
            Rotation::Midnight => boundary - Duration::days(1),
            Rotation::Weekly(_) => boundary - Duration::days(7),
            Rotation::Seconds | Rotation::Minutes | Rotation::Hours | Rotation::Days => {
                period_start
            }
        }
    }

    /// First rotation boundary strictly after `from`.
    pub fn next_boundary(&self, from: DateTime<Local>) -> DateTime<Local> {
        match self {
            Rotation::Seconds | Rotation::Minutes | Rotation::Hours | Rotation::Days => {
                from + self.interval()
            }
            Rotation::Midnight => local_midnight_after(from, 0),
            Rotation::Weekly(day) => {
                let today = from.weekday().num_days_from_monday() as i64;
                let target = day.num_days_from_monday() as i64;
                local_midnight_after(from, (target - today).rem_euclid(7))
            }
        }
    }
}

/// The local midnight that starts the day `1 + extra_days` after `from`'s date.
fn local_midnight_after(from: DateTime<Local>, extra_days: i64) -> DateTime<Local> {
    let date = from.date_naive() + Duration::days(1 + extra_days);
    date.and_hms_opt(0, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        // Midnight skipped by a DST transition: fall back to a fixed offset.
        .unwrap_or_else(|| from + Duration::days(1 + extra_days))
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Seconds => f.write_str("S"),
            Rotation::Minutes => f.write_str("M"),
            Rotation::Hours => f.write_str("H"),
            Rotation::Days => f.write_str("D"),
            Rotation::Midnight => f.write_str("midnight"),
            Rotation::Weekly(day) => write!(f, "W{}", day.num_days_from_monday()),
        }
    }
}

impl FromStr for Rotation {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "S" => Ok(Rotation::Seconds),
            "M" => Ok(Rotation::Minutes),
            "H" => Ok(Rotation::Hours),
            "D" => Ok(Rotation::Days),
            "MIDNIGHT" => Ok(Rotation::Midnight),
            _ => upper
                .strip_prefix('W')
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| WEEKDAYS.get(n).copied())
                .map(Rotation::Weekly)
                .ok_or_else(|| LogError::InvalidRotation(s.to_string())),
        }
    }
}

impl TryFrom<String> for Rotation {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rotation> for String {
    fn from(rotation: Rotation) -> Self {
        rotation.to_string()
    }
}

/// An append-only log file rotated on wall-clock boundaries.
#[derive(Debug)]
pub struct RotatingFile {
    dir: PathBuf,
    file_name: String,
    path: PathBuf,
    rotation: Rotation,
    backup_count: usize,
    clock: Arc<dyn Clock>,
    period_start: DateTime<Local>,
    rollover_at: DateTime<Local>,
    file: Option<File>,
}

impl RotatingFile {
    /// Prepare a rotating file at `dir/file_name` without opening it.
    ///
    /// If the file already exists its modification time anchors the first
    /// boundary, so a file left from an earlier period rotates on first write.
    pub fn new(
        dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        rotation: Rotation,
        backup_count: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let dir = dir.into();
        let file_name = file_name.into();
        let path = dir.join(&file_name);

        let anchor = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| clock.now());

        Self {
            period_start: anchor,
            rollover_at: rotation.next_boundary(anchor),
            dir,
            file_name,
            path,
            rotation,
            backup_count,
            clock,
            file: None,
        }
    }

    /// Path of the active file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the next rotation is due.
    pub fn rollover_at(&self) -> DateTime<Local> {
        self.rollover_at
    }

    /// Append `bytes`, rotating first if a boundary has passed.
    pub fn write_record(&mut self, bytes: &[u8]) -> io::Result<()> {
        let now = self.clock.now();
        if now >= self.rollover_at {
            self.roll_over(now)?;
        }

        if self.file.is_none() {
            self.file = Some(open_append(&self.path)?);
        }
        match self.file.as_mut() {
            Some(file) => file.write_all(bytes),
            None => Ok(()),
        }
    }

    /// Flush and close the active file. A later write reopens it.
    pub fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }

    fn roll_over(&mut self, now: DateTime<Local>) -> io::Result<()> {
        let stamp = self
            .rotation
            .period_stamp(self.period_start.naive_local(), self.rollover_at.naive_local());
        let rotated = self.dir.join(format!(
            "{}.{}",
            self.file_name,
            stamp.format(self.rotation.suffix_format())
        ));
        // Advance first so a failing rename is not retried on every line.
        self.period_start = now;
        self.rollover_at = self.rotation.next_boundary(now);

        self.close()?;
        // An existing backup means another writer sharing this path already
        // rotated it; the next write reopens the fresh active file.
        if rotated.exists() || !self.path.exists() {
            return Ok(());
        }
        fs::rename(&self.path, &rotated)?;

        if self.backup_count > 0 {
            for expired in self.expired_backups()? {
                fs::remove_file(expired)?;
            }
        }
        Ok(())
    }

    /// Rotated files beyond the retention count, oldest first.
    fn expired_backups(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.file_name);
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(suffix) = name.strip_prefix(&prefix) {
                if self.rotation.matches_suffix(suffix) {
                    backups.push(entry.path());
                }
            }
        }

        backups.sort();
        let excess = backups.len().saturating_sub(self.backup_count);
        backups.truncate(excess);
        Ok(backups)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
