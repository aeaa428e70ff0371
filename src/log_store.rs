//! Append-only CSV workout log.
//!
//! The file is created with a header row the first time it is opened (or
//! when it exists but is empty). Every logged set becomes one new row at the
//! end; existing rows are never rewritten. Logs from before sets were counted
//! keep their six columns: new rows are written without the set number.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::estimate::estimate_one_rep_max;
use crate::models::{LogRecord, LEGACY_LOG_HEADER, LOG_HEADER};

/// Column layout of an existing log file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLayout {
    /// `Date,Day,Exercise,Weight,Reps,Set_Number,1RM` (or `Sets_Completed`).
    Current,
    /// `Date,Day,Exercise,Weight,Reps,1RM`.
    WithoutSetNumber,
}

impl LogLayout {
    fn detect(header: &[&str]) -> Result<LogLayout> {
        let is_set_column = |c: &str| c == "Set_Number" || c == "Sets_Completed";
        if header.len() == LOG_HEADER.len()
            && header
                .iter()
                .zip(LOG_HEADER)
                .all(|(got, want)| *got == want || (want == "Set_Number" && is_set_column(*got)))
        {
            return Ok(LogLayout::Current);
        }
        if header == LEGACY_LOG_HEADER {
            return Ok(LogLayout::WithoutSetNumber);
        }
        Err(Error::UnsupportedLog(header.join(",")))
    }
}

/// A row in the six-column layout.
#[derive(Serialize)]
struct LegacyRow<'a> {
    #[serde(with = "crate::models::log_date")]
    date: NaiveDateTime,
    day: &'a str,
    exercise: &'a str,
    weight: f64,
    reps: u32,
    one_rep_max: f64,
}

impl<'a> From<&'a LogRecord> for LegacyRow<'a> {
    fn from(record: &'a LogRecord) -> Self {
        LegacyRow {
            date: record.timestamp,
            day: &record.day,
            exercise: &record.exercise,
            weight: record.weight,
            reps: record.reps,
            one_rep_max: record.one_rep_max,
        }
    }
}

pub struct LogStore {
    path: PathBuf,
    layout: LogLayout,
}

impl LogStore {
    /// Opens the log at `path`, creating it (and its directory) with a header if
    /// absent or empty. An existing header decides the layout of appended rows.
    pub fn open(path: impl Into<PathBuf>) -> Result<LogStore> {
        let path = path.into();
        let empty = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };
        if empty {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(LOG_HEADER)?;
            writer.flush()?;
            info!(path = %path.display(), "created workout log");
            return Ok(LogStore { path, layout: LogLayout::Current });
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;
        let header: Vec<&str> = reader.headers()?.iter().collect();
        let layout = LogLayout::detect(&header)?;
        if layout == LogLayout::WithoutSetNumber {
            warn!(path = %path.display(), "log has no set column, set numbers will not be written");
        }
        Ok(LogStore { path, layout })
    }

    pub fn layout(&self) -> LogLayout {
        self.layout
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logs one set stamped with the current local time.
    pub fn log_set(
        &self,
        day: &str,
        exercise: &str,
        weight: f64,
        reps: u32,
        set_number: Option<u32>,
    ) -> Result<LogRecord> {
        let now = Local::now().naive_local();
        self.log_set_at(now, day, exercise, weight, reps, set_number)
    }

    pub fn log_set_at(
        &self,
        timestamp: NaiveDateTime,
        day: &str,
        exercise: &str,
        weight: f64,
        reps: u32,
        set_number: Option<u32>,
    ) -> Result<LogRecord> {
        let weight = weight.max(0.0);
        let record = LogRecord {
            timestamp,
            day: day.to_string(),
            exercise: exercise.to_string(),
            weight,
            reps,
            set_number,
            one_rep_max: estimate_one_rep_max(weight, reps),
        };
        self.append(&record)?;
        Ok(record)
    }

    pub fn append(&self, record: &LogRecord) -> Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        match self.layout {
            LogLayout::Current => writer.serialize(record)?,
            LogLayout::WithoutSetNumber => writer.serialize(LegacyRow::from(record))?,
        }
        writer.flush()?;
        debug!(
            exercise = %record.exercise,
            weight = record.weight,
            reps = record.reps,
            one_rep_max = record.one_rep_max,
            "appended set"
        );
        Ok(())
    }

    /// Every record in file order. A missing or empty log reads as no history.
    pub fn read_all(&self) -> Result<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}
