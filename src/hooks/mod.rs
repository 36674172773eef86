//! Hook handler for Claude Code settings.json integration.
//!
//! The host calls `claude-sidecar hook <variant>` at each tool checkpoint and
//! reads the exit code plus stdout/stderr. The decision logic here is pure;
//! only `main` turns a [`HookOutput`] into a real process exit.

pub mod debug;
pub mod dispatch;

pub use dispatch::{
    decide, format_feedback, handle_hook, parse_requested_variant, resolve_hook_type, BANNER,
    FOOTER,
};

use std::io::{self, Write};

use serde::Deserialize;

/// Exit code telling Claude Code to block the tool call and show stderr.
pub const EXIT_BLOCK: i32 = 2;
/// Exit code letting Claude Code carry on.
pub const EXIT_PROCEED: i32 = 0;

/// Input Claude Code writes to the hook's stdin. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// Claude's session identifier
    #[serde(alias = "sessionId")]
    pub session_id: Option<String>,
    /// Hook event name, e.g. "PreToolUse"
    #[serde(alias = "hookEventName")]
    pub hook_event_name: Option<String>,
    /// Tool about to run (or that just ran)
    #[serde(alias = "toolName")]
    pub tool_name: Option<String>,
    /// Current working directory
    pub cwd: Option<String>,
}

impl HookInput {
    /// Parse hook input, ignoring anything that is not a JSON object.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        serde_json::from_str(raw).ok()
    }
}

/// Outcome of looking at the drained messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookDecision {
    /// Nothing to report.
    Proceed,
    /// Report the formatted feedback block.
    Block(String),
}

/// What the hook process should print and exit with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutput {
    pub exit_code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl HookOutput {
    /// Silent exit 0
    pub fn proceed() -> Self {
        Self {
            exit_code: EXIT_PROCEED,
            stdout: None,
            stderr: None,
        }
    }

    /// Feedback on stderr, exit 2
    pub fn block(feedback: String) -> Self {
        Self {
            exit_code: EXIT_BLOCK,
            stdout: None,
            stderr: Some(feedback),
        }
    }

    /// Feedback on stdout, exit 0
    pub fn report(feedback: String) -> Self {
        Self {
            exit_code: EXIT_PROCEED,
            stdout: Some(feedback),
            stderr: None,
        }
    }

    /// Write the output streams. The caller owns the exit.
    pub fn write_to(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        if let Some(text) = &self.stdout {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        if let Some(text) = &self.stderr {
            err.write_all(text.as_bytes())?;
            err.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_output_proceed() {
        let output = HookOutput::proceed();
        assert_eq!(output.exit_code, 0);
        assert!(output.stdout.is_none());
        assert!(output.stderr.is_none());
    }

    #[test]
    fn test_hook_output_block() {
        let output = HookOutput::block("stop".to_string());
        assert_eq!(output.exit_code, 2);
        assert_eq!(output.stderr.as_deref(), Some("stop"));
        assert!(output.stdout.is_none());
    }

    #[test]
    fn test_hook_output_report() {
        let output = HookOutput::report("fyi".to_string());
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.as_deref(), Some("fyi"));
        assert!(output.stderr.is_none());
    }

    #[test]
    fn test_write_to_routes_streams() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        HookOutput::block("to stderr\n".to_string())
            .write_to(&mut out, &mut err)
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "to stderr\n");

        let mut out = Vec::new();
        let mut err = Vec::new();
        HookOutput::report("to stdout\n".to_string())
            .write_to(&mut out, &mut err)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "to stdout\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_write_to_proceed_is_silent() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        HookOutput::proceed().write_to(&mut out, &mut err).unwrap();
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_hook_input_parse() {
        let json = r#"{
            "session_id": "sess-123",
            "hook_event_name": "PreToolUse",
            "tool_name": "Bash",
            "tool_input": {"command": "ls"},
            "cwd": "/home/user/project"
        }"#;
        let input = HookInput::parse(json).unwrap();
        assert_eq!(input.session_id.as_deref(), Some("sess-123"));
        assert_eq!(input.hook_event_name.as_deref(), Some("PreToolUse"));
        assert_eq!(input.tool_name.as_deref(), Some("Bash"));
        assert_eq!(input.cwd.as_deref(), Some("/home/user/project"));
    }

    #[test]
    fn test_hook_input_camel_case() {
        let input = HookInput::parse(r#"{"sessionId": "abc", "hookEventName": "PostToolUse"}"#)
            .unwrap();
        assert_eq!(input.session_id.as_deref(), Some("abc"));
        assert_eq!(input.hook_event_name.as_deref(), Some("PostToolUse"));
    }

    #[test]
    fn test_hook_input_empty_or_garbage() {
        assert!(HookInput::parse("").is_none());
        assert!(HookInput::parse("  \n").is_none());
        assert!(HookInput::parse("not json").is_none());
        assert!(HookInput::parse("[1, 2]").is_none());
        assert!(HookInput::parse("{}").is_some());
    }
}
