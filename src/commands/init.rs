//! Init command: register the sidecar hook in Claude Code settings.
//!
//! Adds to `hooks.<Event>` in settings.json:
//!
//! ```json
//! { "matcher": "*", "hooks": [{ "type": "command", "command": "claude-sidecar hook pre-tool-use" }] }
//! ```
//!
//! Idempotent: nothing is written when any command under the event already
//! runs `claude-sidecar hook`. Unrelated settings and hooks are preserved.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::cli::HookType;
use crate::error::{Result, SidecarError};
use crate::models::InitData;

const HOOK_COMMAND_MARKER: &str = "claude-sidecar hook";

/// Claude Code's user settings file (`~/.claude/settings.json`)
pub fn default_settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".claude")
        .join("settings.json")
}

/// Command line Claude Code runs for `variant`.
pub fn hook_command(variant: HookType) -> String {
    format!("{} {}", HOOK_COMMAND_MARKER, variant)
}

fn hook_entry(variant: HookType) -> Value {
    json!({
        "matcher": "*",
        "hooks": [
            {
                "type": "command",
                "command": hook_command(variant)
            }
        ]
    })
}

/// Check entries in either the nested `{matcher, hooks: [...]}` form or the flat `{command}` form.
fn is_sidecar_hook_installed(entries: &[Value]) -> bool {
    fn runs_sidecar(v: &Value) -> bool {
        v.get("command")
            .and_then(|c| c.as_str())
            .is_some_and(|cmd| cmd.contains(HOOK_COMMAND_MARKER))
    }

    entries.iter().any(|entry| {
        runs_sidecar(entry)
            || entry
                .get("hooks")
                .and_then(|h| h.as_array())
                .is_some_and(|inner| inner.iter().any(runs_sidecar))
    })
}

/// Add the hook entry to `settings`. Returns false if it was already there.
pub fn patch_settings(settings: &mut Value, variant: HookType) -> Result<bool> {
    let obj = settings
        .as_object_mut()
        .ok_or_else(|| SidecarError::Settings("settings is not a JSON object".to_string()))?;

    let hooks = obj.entry("hooks").or_insert_with(|| json!({}));
    let hooks_obj = hooks
        .as_object_mut()
        .ok_or_else(|| SidecarError::Settings("hooks is not a JSON object".to_string()))?;

    let event = variant.event_name();
    let entries = hooks_obj.entry(event).or_insert_with(|| json!([]));
    let entries = entries
        .as_array_mut()
        .ok_or_else(|| SidecarError::Settings(format!("hooks.{} is not an array", event)))?;

    if is_sidecar_hook_installed(entries) {
        return Ok(false);
    }

    entries.push(hook_entry(variant));
    Ok(true)
}

/// Patch the settings file at `settings_path`, creating it if needed.
pub fn init(settings_path: &Path, variant: HookType) -> Result<InitData> {
    let mut settings: Value = if settings_path.exists() {
        let content = fs::read_to_string(settings_path)?;
        if content.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(&content).map_err(|e| {
                SidecarError::Settings(format!(
                    "failed to parse {}: {}",
                    settings_path.display(),
                    e
                ))
            })?
        }
    } else {
        json!({})
    };

    let changed = patch_settings(&mut settings, variant)?;

    if changed {
        if let Some(parent) = settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let output = serde_json::to_string_pretty(&settings)?;
        let tmp_path = settings_path.with_extension("json.sidecar-tmp");
        fs::write(&tmp_path, output)?;
        fs::rename(&tmp_path, settings_path)?;
    }

    Ok(InitData {
        settings_path: settings_path.display().to_string(),
        event: variant.event_name().to_string(),
        command: hook_command(variant),
        already_configured: !changed,
    })
}

pub fn render_init(data: &InitData) -> String {
    if data.already_configured {
        format!(
            "Already configured: {} hook in {}",
            data.event, data.settings_path
        )
    } else {
        format!(
            "Installed {} hook `{}` in {}",
            data.event, data.command, data.settings_path
        )
    }
}
