// CLI Parser - Clap derive definitions

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::SidecarError;

/// Claude-Sidecar: feedback queue for Claude Code sessions
#[derive(Parser, Debug)]
#[command(name = "claude-sidecar")]
#[command(version)]
#[command(about = "Queue feedback for a running Claude Code session and deliver it through hooks")]
pub struct Cli {
    /// Sidecar directory holding the queue, lock and logs
    #[arg(long, global = true, env = "CLAUDE_SIDECAR_HOME")]
    pub home: Option<PathBuf>,

    /// Print JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show queued messages without consuming them
    Status,

    /// Drop every queued message
    Clear,

    /// Queue a message for the next hook checkpoint
    Send {
        /// Message text (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Deliver queued messages to Claude Code (called from settings.json hooks)
    Hook {
        /// Hook variant: pre-tool-use, post-tool-use (unknown names fall back to config)
        hook_type: Option<String>,
    },

    /// Register the hook in Claude Code settings
    Init {
        /// Hook variant to install: pre-tool-use, post-tool-use
        #[arg(long, default_value = "pre-tool-use", value_parser = parse_hook_type)]
        variant: HookType,
        /// Settings file to patch (defaults to ~/.claude/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// View operation logs
    Logs {
        /// Number of log entries
        #[arg(short = 'n', long = "limit", default_value = "50")]
        n: usize,
        /// Filter by operation type
        operation: Option<String>,
    },

    /// Clear all logs
    ClearLogs,
}

/// Which checkpoint contract the hook is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookType {
    /// Runs before a tool call; queued feedback blocks the call.
    #[default]
    PreToolUse,
    /// Runs after a tool call; queued feedback is informational.
    PostToolUse,
}

impl HookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::PreToolUse => "pre-tool-use",
            HookType::PostToolUse => "post-tool-use",
        }
    }

    /// Event name Claude Code uses in settings.json and hook input.
    pub fn event_name(&self) -> &'static str {
        match self {
            HookType::PreToolUse => "PreToolUse",
            HookType::PostToolUse => "PostToolUse",
        }
    }

    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "PreToolUse" => Some(HookType::PreToolUse),
            "PostToolUse" => Some(HookType::PostToolUse),
            _ => None,
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookType {
    type Err = SidecarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pre-tool-use" | "pretooluse" | "pre" => Ok(HookType::PreToolUse),
            "post-tool-use" | "posttooluse" | "post" => Ok(HookType::PostToolUse),
            _ => Err(SidecarError::InvalidHookType(s.to_string())),
        }
    }
}

fn parse_hook_type(s: &str) -> Result<HookType, String> {
    s.parse::<HookType>().map_err(|e| format!("{}", e))
}

/// Join the words of a `send` invocation into one message.
pub fn join_message(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

// ============================================================================
// Tests
// ============================================================================
