//! Hook dispatcher.
//!
//! Drains the queue once per checkpoint and maps the result onto the
//! variant's contract:
//!
//! | drained        | pre-tool-use        | post-tool-use       |
//! |----------------|---------------------|---------------------|
//! | error or empty | silent, exit 0      | silent, exit 0      |
//! | N >= 1         | block on stderr, 2  | report on stdout, 0 |
//!
//! Failures never block the host; they go to the operation log instead.

use std::path::Path;

use crate::cli::HookType;
use crate::logging;
use crate::models::Message;
use crate::queue::{MessageQueue, QueueLock};

use super::debug::debug;
use super::{HookDecision, HookInput, HookOutput};

pub const BANNER: &str = "=== User Feedback from Claude Sidecar ===";
pub const FOOTER: &str = "==========================================";

/// Render drained messages as the numbered feedback block.
pub fn format_feedback(messages: &[Message]) -> String {
    let total = messages.len();
    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    for (i, message) in messages.iter().enumerate() {
        out.push_str(&format!("[{}/{}] {}\n", i + 1, total, message.text));
    }
    out.push_str(FOOTER);
    out.push('\n');
    out
}

/// Decide whether drained messages need reporting.
pub fn decide(messages: &[Message]) -> HookDecision {
    if messages.is_empty() {
        HookDecision::Proceed
    } else {
        HookDecision::Block(format_feedback(messages))
    }
}

impl HookType {
    /// Map a decision onto this variant's stream and exit code.
    pub fn respond(self, decision: HookDecision) -> HookOutput {
        match (decision, self) {
            (HookDecision::Proceed, _) => HookOutput::proceed(),
            (HookDecision::Block(text), HookType::PreToolUse) => HookOutput::block(text),
            (HookDecision::Block(text), HookType::PostToolUse) => HookOutput::report(text),
        }
    }
}

/// Pick the hook variant: explicit argument, then the host's event name, then config.
pub fn resolve_hook_type(
    explicit: Option<HookType>,
    input: Option<&HookInput>,
    fallback: HookType,
) -> HookType {
    explicit
        .or_else(|| {
            input
                .and_then(|i| i.hook_event_name.as_deref())
                .and_then(HookType::from_event_name)
        })
        .unwrap_or(fallback)
}

/// Parse the variant named on the command line.
///
/// An unknown name is logged to `log_dir` and dropped so resolution falls
/// through to the hook input and config.
pub fn parse_requested_variant(raw: Option<&str>, log_dir: &Path) -> Option<HookType> {
    let raw = raw?;
    match raw.parse::<HookType>() {
        Ok(hook_type) => Some(hook_type),
        Err(e) => {
            debug("hook", &format!("Ignoring variant argument: {}", e));
            let _ = logging::log(log_dir, "hook", Some(e.to_string()), false);
            None
        }
    }
}

/// Run one checkpoint: drain, decide, respond.
///
/// Never fails. Drain errors are logged to `log_dir` and treated as an
/// empty queue.
pub async fn handle_hook<L: QueueLock>(
    queue: &MessageQueue<L>,
    hook_type: HookType,
    log_dir: &Path,
) -> HookOutput {
    let component = format!("hook-{}", hook_type);
    debug(&component, "=== Hook started ===");

    let messages = match queue.drain_all().await {
        Ok(messages) => messages,
        Err(e) => {
            debug(&component, &format!("Drain failed, proceeding: {}", e));
            let _ = logging::log(log_dir, "hook", Some(e.to_string()), false);
            return HookOutput::proceed();
        }
    };

    if messages.is_empty() {
        debug(&component, "Queue empty");
        return HookOutput::proceed();
    }

    debug(
        &component,
        &format!("Delivering {} message(s)", messages.len()),
    );
    let _ = logging::log(
        log_dir,
        "hook",
        Some(format!("delivered {} via {}", messages.len(), hook_type)),
        true,
    );

    hook_type.respond(decide(&messages))
}
