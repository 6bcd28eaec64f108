//! Integration tests for the logger registry.

use std::fs;
use std::sync::Arc;
use std::thread;

use ai_layer::observability::logging::{
    LoggerOptions, LoggerRegistry, Rotation, PLACEHOLDER_FILE,
};
use chrono::Duration;
use tracing::Level;

mod common;

#[test]
fn test_same_name_returns_same_handle_and_single_sink() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::with_clock(common::manual_clock());

    let first = registry.acquire_with("api", common::options_in(dir.path())).unwrap();
    let second = registry.acquire_with("api", common::options_in(dir.path())).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    second.in_scope(|| tracing::info!("only once"));
    first.release().unwrap();

    let content = fs::read_to_string(first.log_path()).unwrap();
    assert_eq!(content.matches("only once").count(), 1);
}

#[test]
fn test_fresh_directory_created_on_acquire_without_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = common::options_in(dir.path());
    let log_dir = options.log_dir.clone();
    assert!(!log_dir.exists());

    let registry = LoggerRegistry::new();
    let handle = registry.acquire_with("api", options).unwrap();

    assert!(log_dir.is_dir());
    assert!(log_dir.join(PLACEHOLDER_FILE).exists());
    assert!(!handle.log_path().exists());
    assert_eq!(common::list_dir(&log_dir), vec![PLACEHOLDER_FILE.to_string()]);
}

#[test]
fn test_line_layout_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::with_clock(common::manual_clock());
    let handle = registry.acquire_with("api", common::options_in(dir.path())).unwrap();

    let line = line!() + 1;
    handle.in_scope(|| tracing::info!("model ready"));
    handle.release().unwrap();

    let content = fs::read_to_string(handle.log_path()).unwrap();
    assert_eq!(
        content,
        format!("15-10-2026 09:41:07 - INFO - logger_registry - line : {line} - model ready \n\n")
    );
}

#[test]
fn test_distinct_names_write_independent_files() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();

    let api = registry
        .acquire_with(
            "api",
            LoggerOptions {
                file_name: "api.log".into(),
                ..common::options_in(dir.path())
            },
        )
        .unwrap();
    let worker = registry
        .acquire_with(
            "worker",
            LoggerOptions {
                file_name: "worker.log".into(),
                ..common::options_in(dir.path())
            },
        )
        .unwrap();
    assert!(!Arc::ptr_eq(&api, &worker));

    api.in_scope(|| tracing::info!("from api"));
    worker.in_scope(|| tracing::info!("from worker"));
    registry.release_all().unwrap();

    let api_log = fs::read_to_string(api.log_path()).unwrap();
    let worker_log = fs::read_to_string(worker.log_path()).unwrap();
    assert!(api_log.contains("from api") && !api_log.contains("from worker"));
    assert!(worker_log.contains("from worker") && !worker_log.contains("from api"));
}

#[test]
fn test_distinct_names_sharing_a_file_both_append() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();

    let a = registry.acquire_with("a", common::options_in(dir.path())).unwrap();
    let b = registry.acquire_with("b", common::options_in(dir.path())).unwrap();

    a.in_scope(|| tracing::info!("first"));
    b.in_scope(|| tracing::info!("second"));
    registry.release_all().unwrap();

    let content = fs::read_to_string(a.log_path()).unwrap();
    assert!(content.contains("first"));
    assert!(content.contains("second"));
}

#[test]
fn test_shared_file_rotates_once_across_midnight() {
    let dir = tempfile::tempdir().unwrap();
    let clock = common::manual_clock();
    let registry = LoggerRegistry::with_clock(clock.clone());

    let a = registry.acquire_with("a", common::options_in(dir.path())).unwrap();
    let b = registry.acquire_with("b", common::options_in(dir.path())).unwrap();

    a.in_scope(|| tracing::info!("a-day1"));
    b.in_scope(|| tracing::info!("b-day1"));
    clock.advance(Duration::days(1));
    a.in_scope(|| tracing::info!("a-day2"));
    b.in_scope(|| tracing::info!("b-day2"));
    registry.release_all().unwrap();

    let log_dir = &a.options().log_dir;
    let backup = fs::read_to_string(log_dir.join("project.log.2026-10-15")).unwrap();
    assert!(backup.contains("a-day1"));
    assert!(backup.contains("b-day1"));
    assert!(!backup.contains("day2"));

    let active = fs::read_to_string(a.log_path()).unwrap();
    assert!(active.contains("a-day2"));
    assert!(active.contains("b-day2"));
    assert!(!active.contains("day1"));
}

#[test]
fn test_file_threshold_follows_requested_level() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();

    let verbose = registry
        .acquire_with(
            "verbose",
            LoggerOptions {
                file_name: "verbose.log".into(),
                level: Level::DEBUG,
                ..common::options_in(dir.path())
            },
        )
        .unwrap();
    let quiet = registry
        .acquire_with(
            "quiet",
            LoggerOptions {
                file_name: "quiet.log".into(),
                level: Level::WARN,
                ..common::options_in(dir.path())
            },
        )
        .unwrap();

    for handle in [&verbose, &quiet] {
        handle.in_scope(|| {
            tracing::debug!("debug detail");
            tracing::info!("info note");
            tracing::warn!("warn note");
        });
    }
    registry.release_all().unwrap();

    let verbose_log = fs::read_to_string(verbose.log_path()).unwrap();
    assert!(verbose_log.contains(" - DEBUG - "));
    assert!(verbose_log.contains("info note"));

    let quiet_log = fs::read_to_string(quiet.log_path()).unwrap();
    assert!(!quiet_log.contains("debug detail"));
    assert!(!quiet_log.contains("info note"));
    assert!(quiet_log.contains(" - WARNING - "));
}

#[test]
fn test_rotation_keeps_backup_count_files() {
    let dir = tempfile::tempdir().unwrap();
    let clock = common::manual_clock();
    let registry = LoggerRegistry::with_clock(clock.clone());
    let handle = registry
        .acquire_with(
            "api",
            LoggerOptions {
                backup_count: 3,
                rotation: Rotation::Midnight,
                ..common::options_in(dir.path())
            },
        )
        .unwrap();

    for day in 0..6 {
        handle.in_scope(|| tracing::info!(day, "daily line"));
        clock.advance(Duration::days(1));
    }
    handle.release().unwrap();

    let files = common::list_dir(&handle.options().log_dir);
    let backups: Vec<&String> = files.iter().filter(|f| f.starts_with("project.log.")).collect();
    assert_eq!(
        backups,
        vec!["project.log.2026-10-17", "project.log.2026-10-18", "project.log.2026-10-19"]
    );
    assert!(files.contains(&"project.log".to_string()));

    let active = fs::read_to_string(handle.log_path()).unwrap();
    assert!(active.contains("daily line day=5"));
}

#[test]
fn test_release_flushes_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let handle = registry.acquire_with("api", common::options_in(dir.path())).unwrap();

    handle.in_scope(|| {
        for i in 0..10 {
            tracing::info!(i, "before release");
        }
    });
    registry.release(&handle).unwrap();
    assert!(handle.is_released());

    let content = fs::read_to_string(handle.log_path()).unwrap();
    assert_eq!(content.matches("before release").count(), 10);

    registry.release(&handle).unwrap();
    handle.release().unwrap();

    handle.in_scope(|| tracing::info!("after release"));
    let content = fs::read_to_string(handle.log_path()).unwrap();
    assert!(!content.contains("after release"));
}

#[test]
fn test_concurrent_acquire_builds_one_handle() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(LoggerRegistry::new());
    let options = common::options_in(dir.path());

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            let options = options.clone();
            thread::spawn(move || {
                let handle = registry.acquire_with("shared", options).unwrap();
                handle.in_scope(|| tracing::info!(worker = i, "hello"));
                handle
            })
        })
        .collect();

    let handles: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();
    for handle in &handles[1..] {
        assert!(Arc::ptr_eq(&handles[0], handle));
    }
    assert_eq!(registry.len(), 1);

    registry.release_all().unwrap();
    let content = fs::read_to_string(handles[0].log_path()).unwrap();
    assert_eq!(content.matches("hello").count(), 8);
    // Every record ends with the blank-line terminator and none are torn.
    assert_eq!(content.matches(" \n\n").count(), 8);
}

#[test]
fn test_unwritable_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let registry = LoggerRegistry::new();
    let result = registry.acquire_with(
        "api",
        LoggerOptions {
            log_dir: blocker.join("log"),
            ..LoggerOptions::default()
        },
    );

    assert!(matches!(
        result,
        Err(ai_layer::observability::logging::LogError::Io { .. })
    ));
    assert!(registry.is_empty());
}
