//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use subdomain_redirector::config::RedirectorConfig;
use subdomain_redirector::observability::{AccessLog, LogEntry};
use subdomain_redirector::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// In-memory access log sink.
#[derive(Clone, Default)]
pub struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

/// A redirector running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub log: CapturedLog,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), io::Error>>,
}

impl TestServer {
    pub async fn start(config: RedirectorConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let log = CapturedLog::default();
        let shutdown = Shutdown::new();

        let server = HttpServer::new(config, AccessLog::new(log.clone()));
        let server_shutdown = shutdown.subscribe();
        let handle = tokio::spawn(server.run(listener, server_shutdown));

        Self {
            addr,
            log,
            shutdown,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        self.handle.await.unwrap().unwrap();
    }
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
