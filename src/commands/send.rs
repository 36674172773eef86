//! Send command: queue one message for the next hook checkpoint.

use std::path::Path;

use crate::error::Result;
use crate::logging;
use crate::models::SendData;
use crate::queue::{MessageQueue, QueueLock};

/// Enqueue `text` and report how many messages are now pending.
pub async fn send<L: QueueLock>(
    queue: &MessageQueue<L>,
    log_dir: &Path,
    text: &str,
) -> Result<SendData> {
    match queue.enqueue(text).await {
        Ok(queued) => {
            let pending = queue.size().await;
            let _ = logging::log(
                log_dir,
                "enqueue",
                Some(format!("{} pending", pending)),
                true,
            );
            Ok(SendData { queued, pending })
        }
        Err(e) => {
            let _ = logging::log(log_dir, "enqueue", Some(e.to_string()), false);
            Err(e)
        }
    }
}

pub fn render_send(data: &SendData) -> String {
    format!("Queued message ({} pending)", data.pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SidecarConfig, LOCK_FILE_NAME};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_send_reports_pending() {
        let dir = TempDir::new().unwrap();
        let queue = MessageQueue::open(dir.path());

        let first = send(&queue, dir.path(), "one").await.unwrap();
        let second = send(&queue, dir.path(), "two").await.unwrap();

        assert_eq!(first.pending, 1);
        assert_eq!(second.pending, 2);
        assert_eq!(second.queued.text, "two");
        assert_eq!(render_send(&second), "Queued message (2 pending)");
    }

    #[tokio::test]
    async fn test_send_failure_is_logged() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOCK_FILE_NAME), "4242").unwrap();
        let config = SidecarConfig {
            lock_retries: 1,
            ..Default::default()
        };
        let queue = MessageQueue::from_config(dir.path(), &config);

        let err = send(&queue, dir.path(), "blocked").await.unwrap_err();
        assert!(err.is_lock_unavailable());

        let logged = logging::read_logs(dir.path(), 10, Some("enqueue")).unwrap();
        assert_eq!(logged.len(), 1);
        assert!(!logged[0].success);
    }
}
