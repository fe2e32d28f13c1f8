use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app_dirs::AppDirs;
use crate::clock::SessionClock;
use crate::util::{mean, round_to};

/// Shown in place of a best day when no row qualifies
pub const NO_BEST_DAY: &str = "N/A";

const LOG_FILE_NAME: &str = "study_log.csv";

#[derive(Debug, Error)]
pub enum SessionLogError {
    #[error("failed to write session log: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode session row: {0}")]
    Csv(#[from] csv::Error),
}

/// One saved session; a row in the log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub focused_seconds: u64,
    pub focus_score: f64,
}

impl SessionRecord {
    pub fn new(date: NaiveDate, focused_seconds: u64, focus_score: f64) -> Self {
        Self {
            date,
            focused_seconds,
            focus_score: round_to(focus_score, 2),
        }
    }

    /// Point-in-time copy of the clock for a save action
    pub fn snapshot(clock: &SessionClock, date: NaiveDate) -> Self {
        Self::new(date, clock.focused_seconds(), clock.focus_score())
    }
}

/// Summary over every valid row in the log
#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    pub total_focused_seconds: u64,
    pub average_focus_score: f64,
    pub best_day: String,
    pub best_score: f64,
    pub valid_rows: usize,
    pub skipped_rows: usize,
}

impl Default for Analytics {
    fn default() -> Self {
        Self {
            total_focused_seconds: 0,
            average_focus_score: 0.0,
            best_day: NO_BEST_DAY.to_string(),
            best_score: 0.0,
            valid_rows: 0,
            skipped_rows: 0,
        }
    }
}

/// Append-only CSV store of saved sessions
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    /// Log at the default state location
    pub fn new() -> Self {
        let path = AppDirs::state_dir()
            .map(|dir| dir.join(LOG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one row, creating the file (and its directory) on first use
    pub fn append(&self, record: &SessionRecord) -> Result<(), SessionLogError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.serialize(SessionRecord {
            focus_score: round_to(record.focus_score, 2),
            ..record.clone()
        })?;
        writer.flush()?;

        tracing::info!(
            path = %self.path.display(),
            date = %record.date,
            focused_seconds = record.focused_seconds,
            focus_score = record.focus_score,
            "session saved"
        );

        Ok(())
    }

    /// Fold every row into summary statistics. A missing file reads as empty.
    pub fn aggregate(&self) -> Analytics {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "cannot read session log");
                }
                return Analytics::default();
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut analytics = Analytics::default();
        let mut scores = Vec::new();

        for result in reader.records() {
            if let Err(e) = &result {
                if e.is_io_error() {
                    tracing::warn!(path = %self.path.display(), error = %e, "stopped reading session log");
                    break;
                }
            }
            let Some((date, secs, score)) = result.ok().as_ref().and_then(parse_row) else {
                analytics.skipped_rows += 1;
                continue;
            };

            analytics.total_focused_seconds += secs;
            scores.push(score);
            if score > analytics.best_score {
                analytics.best_score = score;
                analytics.best_day = date;
            }
        }

        analytics.valid_rows = scores.len();
        analytics.average_focus_score = mean(&scores).map_or(0.0, |avg| round_to(avg, 1));

        if analytics.skipped_rows > 0 {
            tracing::debug!(
                skipped = analytics.skipped_rows,
                path = %self.path.display(),
                "skipped malformed session rows"
            );
        }

        analytics
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_row(row: &csv::StringRecord) -> Option<(String, u64, f64)> {
    if row.len() != 3 {
        return None;
    }
    let secs = row.get(1)?.parse::<u64>().ok()?;
    let score = row.get(2)?.parse::<f64>().ok()?;
    Some((row.get(0)?.to_string(), secs, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_record_rounds_score_to_two_decimals() {
        let record = SessionRecord::new(date("2024-01-01"), 10, 66.666_666);
        assert_eq!(record.focus_score, 66.67);
    }

    #[test]
    fn test_snapshot_rounds_exact_half_to_even() {
        let mut clock = SessionClock::new();
        clock.start();
        clock.tick();
        clock.stop();
        for _ in 0..31 {
            clock.tick();
        }
        assert_eq!(clock.focus_score(), 3.125);
        let record = SessionRecord::snapshot(&clock, date("2024-01-01"));
        assert_eq!(record.focus_score, 3.12);
    }

    #[test]
    fn test_snapshot_from_clock() {
        let mut clock = SessionClock::new();
        clock.tick();
        clock.start();
        clock.tick();
        clock.tick();
        let record = SessionRecord::snapshot(&clock, date("2024-03-05"));
        assert_eq!(record.focused_seconds, 2);
        assert_eq!(record.focus_score, 66.67);
        assert_eq!(record.date, date("2024-03-05"));
    }

    #[test]
    fn test_append_writes_plain_rows() {
        let dir = tempdir().unwrap();
        let log = SessionLog::with_path(dir.path().join("log.csv"));
        log.append(&SessionRecord::new(date("2024-01-01"), 3600, 87.5))
            .unwrap();
        log.append(&SessionRecord::new(date("2024-01-01"), 5, 12.346))
            .unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, "2024-01-01,3600,87.5\n2024-01-01,5,12.35\n");
    }

    #[test]
    fn test_append_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let log = SessionLog::with_path(dir.path().join("nested").join("log.csv"));
        assert!(!log.exists());
        log.append(&SessionRecord::new(date("2024-01-01"), 1, 100.0))
            .unwrap();
        assert!(log.exists());
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let dir = tempdir().unwrap();
        // a directory where the file should be
        let log = SessionLog::with_path(dir.path());
        let result = log.append(&SessionRecord::new(date("2024-01-01"), 1, 1.0));
        assert!(matches!(result, Err(SessionLogError::Io(_))));
    }

    #[test]
    fn test_aggregate_missing_file() {
        let dir = tempdir().unwrap();
        let analytics = SessionLog::with_path(dir.path().join("absent.csv")).aggregate();
        assert_eq!(analytics, Analytics::default());
        assert_eq!(analytics.best_day, NO_BEST_DAY);
    }

    #[test]
    fn test_aggregate_skips_and_counts_malformed_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "2024-01-01,100,50.0").unwrap();
        writeln!(file, "garbage").unwrap();
        writeln!(file, "2024-01-02,1,2,3").unwrap();
        writeln!(file, "2024-01-03,abc,10.0").unwrap();
        writeln!(file, "2024-01-04,200,75.0").unwrap();

        let analytics = SessionLog::with_path(&path).aggregate();
        assert_eq!(analytics.valid_rows, 2);
        assert_eq!(analytics.skipped_rows, 3);
        assert_eq!(analytics.total_focused_seconds, 300);
        assert_eq!(analytics.average_focus_score, 62.5);
        assert_eq!(analytics.best_day, "2024-01-04");
    }

    #[test]
    fn test_aggregate_on_directory_returns_empty() {
        let dir = tempdir().unwrap();
        let analytics = SessionLog::with_path(dir.path()).aggregate();
        assert_eq!(analytics.valid_rows, 0);
        assert_eq!(analytics.best_day, NO_BEST_DAY);
    }

    #[test]
    fn test_aggregate_zero_scores_have_no_best_day() {
        let dir = tempdir().unwrap();
        let log = SessionLog::with_path(dir.path().join("log.csv"));
        log.append(&SessionRecord::new(date("2024-01-01"), 0, 0.0))
            .unwrap();

        let analytics = log.aggregate();
        assert_eq!(analytics.valid_rows, 1);
        assert_eq!(analytics.best_day, NO_BEST_DAY);
        assert_eq!(analytics.best_score, 0.0);
    }
}
