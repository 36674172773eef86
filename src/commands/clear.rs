use std::path::Path;

use crate::error::Result;
use crate::logging;
use crate::models::ClearData;
use crate::queue::{MessageQueue, QueueLock};

/// Drain the queue and throw the messages away.
pub async fn clear<L: QueueLock>(queue: &MessageQueue<L>, log_dir: &Path) -> Result<ClearData> {
    match queue.drain_all().await {
        Ok(drained) => {
            let _ = logging::log(
                log_dir,
                "clear",
                Some(format!("{} message(s)", drained.len())),
                true,
            );
            Ok(ClearData {
                cleared: drained.len(),
            })
        }
        Err(e) => {
            let _ = logging::log(log_dir, "clear", Some(e.to_string()), false);
            Err(e)
        }
    }
}

pub fn render_clear(data: &ClearData) -> String {
    if data.cleared == 0 {
        "Queue already empty".to_string()
    } else {
        format!("Cleared {} message(s)", data.cleared)
    }
}
