//! Queue document storage.
//!
//! The document is a pretty-printed JSON array of messages. The store never
//! takes the lock; callers hold it around any read-modify-write cycle.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::Result;
use crate::hooks::debug::debug;
use crate::models::Message;

#[derive(Debug, Clone)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored message.
    ///
    /// A missing or unparsable document reads as an empty queue. Other I/O
    /// failures (permissions, the path being a directory) are returned.
    pub async fn read(&self) -> Result<Vec<Message>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                debug("queue", &format!("Queue document is not UTF-8: {}", e));
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(parse_document(&content))
    }

    /// Replace the document with `messages`.
    ///
    /// Writes a sibling temp file and renames it over the document so readers
    /// never observe a half-written queue.
    pub async fn write(&self, messages: &[Message]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(messages)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).await?;
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "queue.json".to_string());
        self.path
            .with_file_name(format!("{}.{}.tmp", name, std::process::id()))
    }
}

/// Parse a queue document, treating anything malformed as empty.
pub fn parse_document(content: &str) -> Vec<Message> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Message>>(content) {
        Ok(messages) => messages,
        Err(e) => {
            debug("queue", &format!("Ignoring corrupt queue document: {}", e));
            Vec::new()
        }
    }
}
