//! Integration tests for the remote manager.
//!
//! These tests wire the public API together the way the binary does: a
//! `RemoteManager` over a `RecordingSink`, with the command directory coming
//! from a real fetcher implementation.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bravia_core::{DirectoryEntry, GridPos, LayoutKind, RemoteKey};
use bravia_remote::infrastructure::directory::JsonFileDirectory;
use bravia_remote::infrastructure::sink::RecordingSink;
use bravia_remote::{
    CharOutcome, CommandResolver, DirectoryFetcher, FetchError, Pacing, RemoteError,
    RemoteManager, RemoteSink,
};
use tokio_test::assert_ok;

// ── Fixtures ──────────────────────────────────────────────────────────────────

const DIRECTORY_JSON: &str = r#"{
    "id": 1,
    "result": [
        {"bundled": true, "type": "IR_REMOTE_BUNDLE_TYPE_AEP_N"},
        [
            {"name": "Power", "value": "AAAAAQAAAAEAAAAVAw=="},
            {"name": "YouTube", "value": "AAAAAgAAAMQAAABHAw=="},
            {"name": "Netflix", "value": "AAAAAgAAABoAAAB8Aw=="},
            {"name": "Tv"},
            {"name": "TV", "value": "AAAAAQAAAAEAAAAkAw=="}
        ]
    ]
}"#;

fn write_directory() -> PathBuf {
    let path = std::env::temp_dir().join(format!("bravia-it-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, DIRECTORY_JSON).expect("write directory fixture");
    path
}

fn make_manager(
    sink: RecordingSink,
    fetcher: Arc<dyn DirectoryFetcher>,
) -> (RemoteManager, Arc<RecordingSink>) {
    let sink = Arc::new(sink);
    let manager = RemoteManager::new(
        Arc::clone(&sink) as Arc<dyn RemoteSink>,
        fetcher,
        Pacing::immediate(),
    );
    (manager, sink)
}

/// A fetcher that counts calls and takes a while to answer.
struct SlowCountingFetcher {
    calls: AtomicUsize,
    delay: Duration,
}

#[async_trait]
impl DirectoryFetcher for SlowCountingFetcher {
    async fn fetch_directory(&self) -> Result<Vec<DirectoryEntry>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(vec![DirectoryEntry::new("Home", "h")])
    }
}

// ── Typing ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_typing_latin_text_sends_planned_stream() {
    // Arrange
    let (manager, sink) = make_manager(
        RecordingSink::new(),
        Arc::new(JsonFileDirectory::new("/unused.json")),
    );

    // Act
    let report = manager.type_text("hi").wait().await.unwrap();

    // Assert
    assert_eq!(
        sink.sent_keys(),
        vec![RemoteKey::Down, RemoteKey::Confirm, RemoteKey::Right, RemoteKey::Confirm]
    );
    assert_eq!(report.typed(), "HI");
    assert_eq!(report.end, GridPos::new(1, 1));
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_typing_with_failing_sink_reports_every_character() {
    // Arrange
    let (manager, sink) = make_manager(
        RecordingSink::failing(),
        Arc::new(JsonFileDirectory::new("/unused.json")),
    );

    // Act
    let report = manager.type_text("ねこ").wait().await.unwrap();

    // Assert: every key was attempted and every attempt failed, but the walk
    // still covered both characters.
    assert_eq!(report.layout, LayoutKind::Japanese);
    assert_eq!(report.commands_sent, 0);
    assert_eq!(report.failed_sends, sink.sent_keys().len());
    assert_eq!(report.outcomes.len(), 2);
    assert!(report
        .outcomes
        .iter()
        .all(|o| matches!(o, CharOutcome::Typed { failed_sends, .. } if *failed_sends > 0)));
}

#[tokio::test(start_paused = true)]
async fn test_cancelling_stops_a_paced_walk() {
    // Arrange: default pacing makes this text take several seconds.
    let sink = Arc::new(RecordingSink::new());
    let manager = RemoteManager::new(
        Arc::clone(&sink) as Arc<dyn RemoteSink>,
        Arc::new(JsonFileDirectory::new("/unused.json")),
        Pacing::default(),
    );

    // Act
    let handle = manager.type_text("ZZZZ");
    tokio::time::sleep(Duration::from_millis(400)).await;
    handle.cancel();
    let report = handle.wait().await.unwrap();

    // Assert: keys at 0, 150, 300 went out; nothing after the cancel.
    assert!(report.cancelled);
    assert_eq!(sink.sent_keys().len(), 3);
    assert_eq!(report.end, GridPos::new(3, 0));
}

#[tokio::test(start_paused = true)]
async fn test_dropped_handle_sends_nothing_more() {
    // Arrange
    let sink = Arc::new(RecordingSink::new());
    let manager = RemoteManager::new(
        Arc::clone(&sink) as Arc<dyn RemoteSink>,
        Arc::new(JsonFileDirectory::new("/unused.json")),
        Pacing::default(),
    );

    // Act: only the first Right has gone out when the handle is dropped.
    let handle = manager.type_text("ZZZZ");
    tokio::time::sleep(Duration::from_millis(10)).await;
    drop(handle);
    tokio::time::sleep(Duration::from_secs(30)).await;

    // Assert
    assert_eq!(sink.sent_keys(), vec![RemoteKey::Right]);
}

// ── Named commands ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_shortcuts_resolve_through_saved_directory() {
    // Arrange
    let path = write_directory();
    let (manager, sink) = make_manager(
        RecordingSink::new(),
        Arc::new(JsonFileDirectory::new(&path)),
    );

    // Act
    assert_ok!(manager.youtube().await);
    assert_ok!(manager.tv().await);

    // Assert: "Tv" has no code in the file, so the "TV" alias is used.
    assert_eq!(
        sink.sent_raw(),
        vec!["AAAAAgAAAMQAAABHAw==".to_string(), "AAAAAQAAAAEAAAAkAw==".to_string()]
    );
    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn test_missing_shortcut_is_command_not_found() {
    let path = write_directory();
    let (manager, sink) = make_manager(
        RecordingSink::new(),
        Arc::new(JsonFileDirectory::new(&path)),
    );

    let result = manager.demo_mode().await;

    assert!(matches!(result, Err(RemoteError::CommandNotFound { .. })));
    assert!(sink.sent_raw().is_empty());
    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn test_load_commands_lists_complete_entries() {
    let path = write_directory();
    let (manager, _) = make_manager(
        RecordingSink::new(),
        Arc::new(JsonFileDirectory::new(&path)),
    );

    let commands = manager.load_commands().await;
    let names: Vec<&str> = commands.iter().map(|(n, _)| n).collect();

    assert_eq!(names, vec!["Netflix", "Power", "TV", "YouTube"]);
    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn test_unreadable_directory_is_retried_once_it_appears() {
    // Arrange: the file does not exist yet.
    let path =
        std::env::temp_dir().join(format!("bravia-it-late-{}.json", uuid::Uuid::new_v4()));
    let (manager, _) = make_manager(
        RecordingSink::new(),
        Arc::new(JsonFileDirectory::new(&path)),
    );

    // Act / Assert
    assert!(manager.netflix().await.is_err());
    std::fs::write(&path, DIRECTORY_JSON).unwrap();
    assert_ok!(manager.netflix().await);
    std::fs::remove_file(path).ok();
}

// ── Single flight ─────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_concurrent_resolves_from_many_tasks_fetch_once() {
    // Arrange
    let fetcher = Arc::new(SlowCountingFetcher {
        calls: AtomicUsize::new(0),
        delay: Duration::from_millis(500),
    });
    let resolver = Arc::new(CommandResolver::new(
        Arc::clone(&fetcher) as Arc<dyn DirectoryFetcher>
    ));

    // Act
    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve(&["Home"]).await })
        })
        .collect();
    let mut codes = Vec::new();
    for task in tasks {
        codes.push(task.await.unwrap());
    }

    // Assert
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert!(codes.iter().all(|c| c.as_deref() == Some("h")));
}
