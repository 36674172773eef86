//! File-based logging for queue operations.
//!
//! Logs to `<sidecar dir>/sidecar.log` with 1MB rotation. Hook failures are
//! swallowed to keep Claude Code moving, so this log is where they surface.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "sidecar.log";
const MAX_LOG_SIZE: u64 = 1_048_576; // 1MB

/// A single log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub details: Option<String>,
    pub success: bool,
}

impl LogEntry {
    /// Create a new log entry.
    pub fn new(operation: impl Into<String>, details: Option<String>, success: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: operation.into(),
            details,
            success,
        }
    }

    /// Format as a single log line.
    pub fn to_log_line(&self) -> String {
        let status = if self.success { "OK" } else { "ERR" };
        // keep one entry per line even for multi-line message text
        let details = self
            .details
            .as_deref()
            .map(|d| d.replace(['\n', '\r'], " "))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            status,
            self.operation,
            details
        )
    }

    /// Parse from a log line.
    pub fn from_log_line(line: &str) -> Option<Self> {
        // Format: [2024-01-24 10:30:45] OK enqueue some details
        if !line.starts_with('[') {
            return None;
        }

        let timestamp_end = line.find(']')?;
        let timestamp_str = &line[1..timestamp_end];

        let rest = line.get(timestamp_end + 2..)?.trim();
        let parts: Vec<&str> = rest.splitn(3, ' ').collect();
        if parts.len() < 2 {
            return None;
        }

        let success = parts[0] == "OK";
        let operation = parts[1].to_string();
        let details = parts.get(2).map(|s| s.to_string()).filter(|s| s != "-");

        let timestamp = chrono::NaiveDateTime::parse_from_str(timestamp_str, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.and_utc())?;

        Some(Self {
            timestamp,
            operation,
            details,
            success,
        })
    }
}

/// Get the log file path inside `sidecar_dir`.
pub fn get_log_path(sidecar_dir: &Path) -> PathBuf {
    sidecar_dir.join(LOG_FILE_NAME)
}

/// Check if log file needs rotation.
fn needs_rotation(path: &Path) -> bool {
    if let Ok(metadata) = fs::metadata(path) {
        metadata.len() >= MAX_LOG_SIZE
    } else {
        false
    }
}

/// Rotate log file (rename to .old, start fresh).
fn rotate_log(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let old_path = path.with_extension("log.old");

    if old_path.exists() {
        fs::remove_file(&old_path)?;
    }

    fs::rename(path, &old_path)?;

    Ok(())
}

/// Write a log entry.
pub fn log(
    sidecar_dir: &Path,
    operation: impl Into<String>,
    details: Option<String>,
    success: bool,
) -> Result<()> {
    fs::create_dir_all(sidecar_dir)?;
    let path = get_log_path(sidecar_dir);

    if needs_rotation(&path) {
        rotate_log(&path)?;
    }

    let entry = LogEntry::new(operation, details, success);
    let line = entry.to_log_line();

    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", line)?;
    writer.flush()?;

    Ok(())
}

/// Read log entries.
///
/// - `limit`: Maximum number of entries to return (most recent first)
/// - `operation`: Optional filter by operation name
pub fn read_logs(
    sidecar_dir: &Path,
    limit: usize,
    operation: Option<&str>,
) -> Result<Vec<LogEntry>> {
    let path = get_log_path(sidecar_dir);

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(&path)?;
    let reader = BufReader::new(file);

    let mut entries: Vec<LogEntry> = reader
        .lines()
        .map_while(|line| line.ok())
        .filter_map(|line| LogEntry::from_log_line(&line))
        .filter(|entry| operation.map_or(true, |op| entry.operation.eq_ignore_ascii_case(op)))
        .collect();

    // Return most recent first
    entries.reverse();
    entries.truncate(limit);

    Ok(entries)
}

/// Clear all logs, returning how many lines were dropped.
pub fn clear_logs(sidecar_dir: &Path) -> Result<usize> {
    let path = get_log_path(sidecar_dir);

    if !path.exists() {
        return Ok(0);
    }

    let file = File::open(&path)?;
    let reader = BufReader::new(file);
    let count = reader.lines().count();

    File::create(&path)?;

    let old_path = path.with_extension("log.old");
    if old_path.exists() {
        fs::remove_file(&old_path)?;
    }

    Ok(count)
}
