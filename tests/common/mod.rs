//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use ai_layer::config::{ServiceConfig, Settings};
use ai_layer::http::HttpServer;
use ai_layer::lifecycle::Shutdown;
use ai_layer::observability::logging::{LoggerOptions, ManualClock};
use chrono::{DateTime, Local, TimeZone};
use tokio::task::JoinHandle;

/// A fixed local instant: 15-10-2026 09:41:07.
#[allow(dead_code)]
pub fn fixed_instant() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 15, 9, 41, 7).unwrap()
}

#[allow(dead_code)]
pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(fixed_instant()))
}

/// Default options rooted in a scratch directory.
#[allow(dead_code)]
pub fn options_in(root: &Path) -> LoggerOptions {
    LoggerOptions {
        log_dir: root.join("log"),
        ..LoggerOptions::default()
    }
}

/// Names of the files in `dir`, sorted.
#[allow(dead_code)]
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

/// Start the service on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(
    settings: Settings,
) -> (SocketAddr, Shutdown, JoinHandle<Result<(), std::io::Error>>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(ServiceConfig::default(), settings);
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    (addr, shutdown, handle)
}
