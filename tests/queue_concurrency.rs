//! Queue behavior across independent handles on the same directory.
//!
//! Each `MessageQueue` here stands in for a separate process: they share
//! nothing but the files on disk.

use std::fs::{self, File};
use std::time::{Duration, SystemTime};

use claude_sidecar::{MessageQueue, SidecarConfig};
use tempfile::TempDir;

fn fast_config() -> SidecarConfig {
    SidecarConfig {
        lock_retries: 200,
        retry_delay_ms: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_concurrent_drains_deliver_once() {
    let dir = TempDir::new().unwrap();
    let producer = MessageQueue::from_config(dir.path(), &fast_config());
    producer.enqueue("only once").await.unwrap();

    let a = MessageQueue::from_config(dir.path(), &fast_config());
    let b = MessageQueue::from_config(dir.path(), &fast_config());
    let (ra, rb) = tokio::join!(a.drain_all(), b.drain_all());

    let mut delivered: Vec<String> = ra
        .unwrap()
        .into_iter()
        .chain(rb.unwrap())
        .map(|m| m.text)
        .collect();
    delivered.sort();
    assert_eq!(delivered, vec!["only once"]);
    assert_eq!(producer.size().await, 0);
}

#[tokio::test]
async fn test_concurrent_enqueues_all_persist() {
    let dir = TempDir::new().unwrap();
    let a = MessageQueue::from_config(dir.path(), &fast_config());
    let b = MessageQueue::from_config(dir.path(), &fast_config());
    let c = MessageQueue::from_config(dir.path(), &fast_config());

    let (ra, rb, rc) = tokio::join!(a.enqueue("alpha"), b.enqueue("beta"), c.enqueue("gamma"));
    ra.unwrap();
    rb.unwrap();
    rc.unwrap();

    let mut texts: Vec<String> = a.peek().await.unwrap().into_iter().map(|m| m.text).collect();
    texts.sort();
    assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
    assert!(!dir.path().join("queue.lock").exists());
}

#[tokio::test]
async fn test_drain_interleaved_with_enqueue_loses_nothing() {
    let dir = TempDir::new().unwrap();
    let producer = MessageQueue::from_config(dir.path(), &fast_config());
    let consumer = MessageQueue::from_config(dir.path(), &fast_config());
    producer.enqueue("before").await.unwrap();

    let (sent, drained) = tokio::join!(producer.enqueue("during"), consumer.drain_all());
    sent.unwrap();
    let first: Vec<String> = drained.unwrap().into_iter().map(|m| m.text).collect();
    let rest: Vec<String> = consumer
        .drain_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.text)
        .collect();

    let mut all: Vec<String> = first.into_iter().chain(rest).collect();
    all.sort();
    assert_eq!(all, vec!["before", "during"]);
}

#[tokio::test]
async fn test_stale_lock_from_crashed_process_is_reclaimed() {
    let dir = TempDir::new().unwrap();
    let lock_path = dir.path().join("queue.lock");
    fs::write(&lock_path, "99999").unwrap();
    let past = SystemTime::now() - Duration::from_secs(60);
    File::options()
        .write(true)
        .open(&lock_path)
        .unwrap()
        .set_modified(past)
        .unwrap();

    let queue = MessageQueue::open(dir.path());
    queue.enqueue("after crash").await.unwrap();

    assert_eq!(queue.size().await, 1);
    assert!(!lock_path.exists());
}

#[tokio::test]
async fn test_fresh_lock_times_out() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("queue.lock"), "4242").unwrap();
    let config = SidecarConfig {
        lock_retries: 2,
        retry_delay_ms: 10,
        ..Default::default()
    };

    let queue = MessageQueue::from_config(dir.path(), &config);
    let err = queue.enqueue("blocked").await.unwrap_err();

    assert!(err.is_lock_unavailable());
    assert!(!dir.path().join("queue.json").exists());
}

#[test]
fn test_corrupt_document_reads_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("queue.json"), "[{\"text\": 12}").unwrap();
    let queue = MessageQueue::open(dir.path());

    let peeked = tokio_test::block_on(queue.peek()).unwrap();
    assert!(peeked.is_empty());
    assert_eq!(tokio_test::block_on(queue.size()), 0);

    tokio_test::block_on(queue.enqueue("recovered")).unwrap();
    let texts: Vec<String> = tokio_test::block_on(queue.drain_all())
        .unwrap()
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, vec!["recovered"]);
}
