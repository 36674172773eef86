//! Durable, lock-protected message queue shared by every sidecar process.
//!
//! Producers `enqueue`, the hook `drain_all`s, and `status` peeks. Every
//! operation re-reads the document from disk; nothing is cached between
//! calls because other processes mutate the same file.

pub mod lock;
pub mod store;

pub use lock::{FileLock, QueueLock, DEFAULT_MAX_RETRIES};
pub use store::QueueStore;

use std::future::Future;
use std::path::Path;

use crate::config::{SidecarConfig, LOCK_FILE_NAME, QUEUE_FILE_NAME};
use crate::error::Result;
use crate::models::Message;

pub struct MessageQueue<L: QueueLock = FileLock> {
    store: QueueStore,
    lock: L,
    max_retries: u32,
}

impl MessageQueue<FileLock> {
    /// Queue stored in `dir` with default lock timing.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self::from_config(dir, &SidecarConfig::default())
    }

    /// Queue stored in `dir` with lock timing from `config`.
    pub fn from_config(dir: impl AsRef<Path>, config: &SidecarConfig) -> Self {
        let dir = dir.as_ref();
        let lock = FileLock::new(dir.join(LOCK_FILE_NAME))
            .with_timing(config.stale_after(), config.retry_delay());
        Self::with_lock(
            QueueStore::new(dir.join(QUEUE_FILE_NAME)),
            lock,
            config.lock_retries,
        )
    }
}

impl<L: QueueLock> MessageQueue<L> {
    pub fn with_lock(store: QueueStore, lock: L, max_retries: u32) -> Self {
        Self {
            store,
            lock,
            max_retries,
        }
    }

    /// Path of the queue document.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Run `op` while holding the lock. The lock is released whatever `op` returns.
    async fn locked<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.lock.acquire(self.max_retries).await?;
        let result = op().await;
        self.lock.release().await;
        result
    }

    /// Append a message stamped with the current time.
    pub async fn enqueue(&self, text: impl Into<String>) -> Result<Message> {
        let text = text.into();
        let store = &self.store;
        self.locked(move || async move {
            let mut messages = store.read().await?;
            let message = Message::new(text);
            messages.push(message.clone());
            store.write(&messages).await?;
            Ok(message)
        })
        .await
    }

    /// Take every queued message, leaving the queue empty.
    ///
    /// Read-then-clear happens under one lock hold, so concurrent drains
    /// never both see the same messages.
    pub async fn drain_all(&self) -> Result<Vec<Message>> {
        let store = &self.store;
        self.locked(|| async move {
            let messages = store.read().await?;
            if !messages.is_empty() {
                store.write(&[]).await?;
            }
            Ok(messages)
        })
        .await
    }

    /// Snapshot of the queue without consuming it.
    pub async fn peek(&self) -> Result<Vec<Message>> {
        let store = &self.store;
        self.locked(|| store.read()).await
    }

    /// Unlocked, best-effort message count for progress display.
    ///
    /// May race with writers. Returns 0 on any error.
    pub async fn size(&self) -> usize {
        self.store.read().await.map(|m| m.len()).unwrap_or(0)
    }
}
