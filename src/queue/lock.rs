//! Lock manager for the queue document.
//!
//! Mutual exclusion comes from creating the lock file with `create_new`
//! (`O_CREAT | O_EXCL`), which exactly one process can win. No OS advisory
//! lock is involved, so a holder that crashes leaves the file behind; any
//! lock file whose mtime is older than the staleness window is presumed
//! abandoned and deleted by the next acquirer.
//!
//! A slow but still running holder can therefore lose its lock after the
//! window elapses.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{Result, SidecarError};

/// Lock files older than this are reclaimed.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_millis(5000);
/// Wait between acquisition attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);
/// Acquisition attempts before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Exclusive ownership of the queue's read-modify-write cycle.
#[allow(async_fn_in_trait)]
pub trait QueueLock {
    /// Take the lock, trying at most `max_retries` times.
    ///
    /// Fails with [`SidecarError::LockUnavailable`] once attempts run out.
    async fn acquire(&self, max_retries: u32) -> Result<()>;

    /// Give the lock up. Releasing a lock that is not held is a no-op.
    async fn release(&self);
}

/// Lock backed by the existence of a file.
#[derive(Debug, Clone)]
pub struct FileLock {
    path: PathBuf,
    stale_after: Duration,
    retry_delay: Duration,
}

impl FileLock {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stale_after: DEFAULT_STALE_AFTER,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_timing(mut self, stale_after: Duration, retry_delay: Duration) -> Self {
        self.stale_after = stale_after;
        self.retry_delay = retry_delay;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Age of the current lock file, or `None` if nobody holds it.
    pub async fn age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.path).await.ok()?.modified().ok()?;
        // mtime in the future (clock skew) counts as brand new
        Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Delete the lock file if it has outlived the staleness window.
    async fn reclaim_if_stale(&self) {
        if let Some(age) = self.age().await {
            if age > self.stale_after {
                // another acquirer may have removed it first
                let _ = fs::remove_file(&self.path).await;
            }
        }
    }

    /// One exclusive-create attempt. `Ok(false)` means somebody else holds it.
    async fn try_create(&self) -> std::io::Result<bool> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(mut file) => {
                // holder id is advisory only
                let _ = file.write_all(std::process::id().to_string().as_bytes()).await;
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl QueueLock for FileLock {
    async fn acquire(&self, max_retries: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let attempts = max_retries.max(1);
        for attempt in 0..attempts {
            self.reclaim_if_stale().await;

            if self.try_create().await? {
                return Ok(());
            }

            if attempt + 1 < attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(SidecarError::LockUnavailable {
            path: self.path.clone(),
            retries: attempts,
        })
    }

    async fn release(&self) {
        let _ = fs::remove_file(&self.path).await;
    }
}
