//! Debug trace for hook and queue internals.
//!
//! Off unless `CLAUDE_SIDECAR_DEBUG` is set. Each component gets its own
//! file at `<tmp>/claude-sidecar-{component}.log`.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable that turns tracing on.
pub const DEBUG_ENV: &str = "CLAUDE_SIDECAR_DEBUG";

/// Whether tracing is enabled for this process.
pub fn enabled() -> bool {
    match std::env::var(DEBUG_ENV) {
        Ok(v) => !v.is_empty() && v != "0",
        Err(_) => false,
    }
}

/// Get trace file path for a component
pub fn get_log_path(component: &str) -> PathBuf {
    std::env::temp_dir().join(format!("claude-sidecar-{}.log", component))
}

/// Trace `msg` for `component` if tracing is enabled.
pub fn debug(component: &str, msg: &str) {
    if !enabled() {
        return;
    }
    debug_to(&get_log_path(component), component, msg);
}

/// Append one timestamped trace line to `path`. Failures are ignored.
pub fn debug_to(path: &Path, component: &str, msg: &str) {
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
    let line = format!("[{}] [{}] {}\n", timestamp, component, msg);
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(line.as_bytes());
    }
}
