//! Claude-Sidecar CLI
//!
//! Main entry point. Dispatches subcommands and owns the process exit code,
//! which for `hook` is the signal Claude Code acts on.

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use serde::Serialize;
use tokio::io::{AsyncReadExt, BufReader};

use claude_sidecar::commands::{
    clear, default_settings_path, init, render_clear, render_init, render_send, render_status,
    run_interactive, send, status,
};
use claude_sidecar::models::{ClearLogsData, ErrorResponse, LogsData, SuccessResponse};
use claude_sidecar::{
    clear_logs, handle_hook, join_message, parse_requested_variant, read_logs, resolve_hook_type,
    resolve_sidecar_dir, Cli, Command, DefaultAction, HookInput, MessageQueue, Result,
    SidecarConfig,
};

/// How long the hook waits for Claude Code's JSON on stdin.
const HOOK_INPUT_TIMEOUT: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let sidecar_dir = resolve_sidecar_dir(cli.home.as_deref());

    let code = match cli.command {
        Some(Command::Hook { hook_type }) => run_hook(&sidecar_dir, hook_type).await,
        command => run(command, &sidecar_dir, cli.json).await,
    };

    std::process::exit(code);
}

/// Hook path: never fails, exit code is the protocol.
async fn run_hook(sidecar_dir: &Path, requested: Option<String>) -> i32 {
    let config = SidecarConfig::load_or_default(sidecar_dir);
    let explicit = parse_requested_variant(requested.as_deref(), sidecar_dir);
    let input = read_hook_input().await;
    let hook_type = resolve_hook_type(explicit, input.as_ref(), config.hook_variant);

    let queue = MessageQueue::from_config(sidecar_dir, &config);
    let output = handle_hook(&queue, hook_type, sidecar_dir).await;

    let _ = output.write_to(&mut std::io::stdout(), &mut std::io::stderr());
    output.exit_code
}

/// Read Claude Code's hook payload, if it sent one.
async fn read_hook_input() -> Option<HookInput> {
    if std::io::stdin().is_terminal() {
        return None;
    }
    let mut raw = String::new();
    let mut stdin = tokio::io::stdin();
    match tokio::time::timeout(HOOK_INPUT_TIMEOUT, stdin.read_to_string(&mut raw)).await {
        Ok(Ok(_)) => HookInput::parse(&raw),
        _ => None,
    }
}

/// Run every other command, returning the process exit code.
async fn run(command: Option<Command>, sidecar_dir: &Path, json: bool) -> i32 {
    let config = match SidecarConfig::load(sidecar_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {} (using defaults)", e);
            SidecarConfig::default()
        }
    };
    let queue = MessageQueue::from_config(sidecar_dir, &config);

    match command {
        None => match config.default_action {
            DefaultAction::Interactive => {
                let reader = BufReader::new(tokio::io::stdin());
                match run_interactive(&queue, sidecar_dir, reader, &mut std::io::stdout()).await {
                    Ok(_) => 0,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        1
                    }
                }
            }
            DefaultAction::Help => match Cli::command().print_help() {
                Ok(()) => 0,
                Err(_) => 1,
            },
        },

        // status and clear report problems but always exit 0
        Some(Command::Status) => {
            emit(status(&queue).await, json, render_status);
            0
        }

        Some(Command::Clear) => {
            emit(clear(&queue, sidecar_dir).await, json, render_clear);
            0
        }

        Some(Command::Send { text }) => {
            let text = join_message(&text);
            exit_code(emit(send(&queue, sidecar_dir, &text).await, json, render_send))
        }

        Some(Command::Init { variant, settings }) => {
            let settings_path = settings.unwrap_or_else(default_settings_path);
            let result = init(&settings_path, variant);
            if result.is_ok() {
                let _ = claude_sidecar::log(
                    sidecar_dir,
                    "init",
                    Some(format!("{} in {}", variant.event_name(), settings_path.display())),
                    true,
                );
            }
            exit_code(emit(result, json, render_init))
        }

        Some(Command::Logs { n, operation }) => {
            let result = read_logs(sidecar_dir, n, operation.as_deref()).map(to_logs_data);
            exit_code(emit(result, json, render_logs))
        }

        Some(Command::ClearLogs) => {
            let result = clear_logs(sidecar_dir).map(|cleared| ClearLogsData { cleared });
            exit_code(emit(result, json, |data: &ClearLogsData| {
                format!("Cleared {} log line(s)", data.cleared)
            }))
        }

        Some(Command::Hook { hook_type }) => run_hook(sidecar_dir, hook_type).await,
    }
}

/// Print a command result as JSON or text. Returns whether it succeeded.
fn emit<T: Serialize>(result: Result<T>, json: bool, render: impl Fn(&T) -> String) -> bool {
    match result {
        Ok(data) => {
            if json {
                print_json(&SuccessResponse::new(&data));
            } else {
                println!("{}", render(&data));
            }
            true
        }
        Err(e) => {
            if json {
                print_json(&ErrorResponse::new(e.to_string()));
            } else {
                eprintln!("Error: {}", e);
            }
            false
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{}", out),
        Err(e) => eprintln!("Error: failed to serialize output: {}", e),
    }
}

fn exit_code(ok: bool) -> i32 {
    if ok {
        0
    } else {
        1
    }
}

fn to_logs_data(entries: Vec<claude_sidecar::LogEntry>) -> LogsData {
    let count = entries.len();
    LogsData {
        entries: entries
            .into_iter()
            .map(|e| claude_sidecar::models::LogEntry {
                timestamp: e.timestamp.to_rfc3339(),
                level: if e.success { "info".to_string() } else { "error".to_string() },
                operation: e.operation,
                details: e.details,
            })
            .collect(),
        count,
    }
}

fn render_logs(data: &LogsData) -> String {
    if data.entries.is_empty() {
        return "No log entries".to_string();
    }
    data.entries
        .iter()
        .map(|e| {
            format!(
                "{} {} {} {}",
                e.timestamp,
                e.level,
                e.operation,
                e.details.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================
