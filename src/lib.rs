pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod models;
pub mod queue;

pub use cli::{join_message, Cli, Command, HookType};
pub use config::{default_sidecar_dir, resolve_sidecar_dir, DefaultAction, SidecarConfig};
pub use error::{Result, SidecarError};
pub use hooks::{
    handle_hook, parse_requested_variant, resolve_hook_type, HookDecision, HookInput, HookOutput,
};
pub use logging::{clear_logs, log, read_logs, LogEntry};
pub use models::Message;
pub use queue::{FileLock, MessageQueue, QueueLock, QueueStore};
