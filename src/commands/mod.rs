pub mod clear;
pub mod init;
pub mod interactive;
pub mod send;
pub mod status;

pub use clear::{clear, render_clear};
pub use init::{default_settings_path, init, patch_settings, render_init};
pub use interactive::{parse_line, run_interactive, InteractiveInput};
pub use send::{render_send, send};
pub use status::{render_status, status};
