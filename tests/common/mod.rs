//! Shared fakes and harness for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sqs_audit_relay::audit::{AuditError, LogRecord, LogStreamClient, ProvisionOutcome, SequenceToken};
use sqs_audit_relay::config::RelayConfig;
use sqs_audit_relay::lifecycle::{assemble, Shutdown};
use sqs_audit_relay::queue::{MessageId, QueueClient, QueueError};

/// Queue that hands out `m-1`, `m-2`, ... or always fails.
#[derive(Default)]
pub struct FakeQueue {
    pub fail_with: Option<QueueError>,
    pub bodies: Mutex<Vec<String>>,
    sent: AtomicU32,
}

impl FakeQueue {
    pub fn failing(error: QueueError) -> Self {
        Self {
            fail_with: Some(error),
            ..Default::default()
        }
    }
}

#[async_trait]
impl QueueClient for FakeQueue {
    async fn send_message(&self, body: String) -> Result<MessageId, QueueError> {
        self.bodies.lock().unwrap().push(body);
        if let Some(e) = &self.fail_with {
            return Err(e.clone());
        }
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("m-{n}"))
    }
}

/// One `put_log_event` call as the service saw it.
#[derive(Debug, Clone)]
pub struct AppendCall {
    pub submitted: Option<String>,
    pub returned: Option<String>,
    pub message: String,
}

#[derive(Default)]
struct LogState {
    groups: HashSet<String>,
    streams: HashSet<(String, String)>,
    create_calls: usize,
    tail: Option<String>,
    issued: u32,
    appends: Vec<AppendCall>,
}

/// In-memory log service that enforces sequence tokens like the real one.
#[derive(Default)]
pub struct FakeLogStream {
    state: Mutex<LogState>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    pub append_delay: Duration,
    pub reject_appends: bool,
}

impl FakeLogStream {
    pub fn with_delay(append_delay: Duration) -> Self {
        Self {
            append_delay,
            ..Default::default()
        }
    }

    /// Every append fails with a non-sequence service error.
    pub fn rejecting() -> Self {
        Self {
            reject_appends: true,
            ..Default::default()
        }
    }

    pub fn appends(&self) -> Vec<AppendCall> {
        self.state.lock().unwrap().appends.clone()
    }

    pub fn group_count(&self) -> usize {
        self.state.lock().unwrap().groups.len()
    }

    pub fn stream_count(&self) -> usize {
        self.state.lock().unwrap().streams.len()
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    /// Highest number of appends the service saw at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogStreamClient for FakeLogStream {
    async fn create_log_group(&self, group: &str) -> ProvisionOutcome {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if state.groups.insert(group.to_string()) {
            ProvisionOutcome::Created
        } else {
            ProvisionOutcome::AlreadyPresent
        }
    }

    async fn create_log_stream(&self, group: &str, stream: &str) -> ProvisionOutcome {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if !state.groups.contains(group) {
            return ProvisionOutcome::Failed(format!("log group {group} does not exist"));
        }
        if state.streams.insert((group.to_string(), stream.to_string())) {
            ProvisionOutcome::Created
        } else {
            ProvisionOutcome::AlreadyPresent
        }
    }

    async fn put_log_event(
        &self,
        _group: &str,
        _stream: &str,
        record: LogRecord,
        token: Option<SequenceToken>,
    ) -> Result<Option<SequenceToken>, AuditError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.append_delay).await;

        let result = {
            let mut state = self.state.lock().unwrap();
            if self.reject_appends {
                state.appends.push(AppendCall {
                    submitted: token,
                    returned: None,
                    message: record.message,
                });
                Err(AuditError::AppendRejected("ServiceUnavailableException".into()))
            } else if token != state.tail {
                let expected = state.tail.clone();
                state.appends.push(AppendCall {
                    submitted: token,
                    returned: None,
                    message: record.message,
                });
                Err(AuditError::SequenceConflict { expected })
            } else {
                state.issued += 1;
                let next = format!("token-{}", state.issued);
                state.tail = Some(next.clone());
                state.appends.push(AppendCall {
                    submitted: token,
                    returned: Some(next.clone()),
                    message: record.message,
                });
                Ok(Some(next))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Provision and serve a relay on an ephemeral port.
pub async fn spawn_relay(
    queue: Arc<FakeQueue>,
    logs: Arc<FakeLogStream>,
) -> (SocketAddr, Shutdown) {
    let mut config = RelayConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    config.queue.url = "https://sqs.test.local/000000000000/relay".to_string();

    let started = assemble(&config, queue, logs).await.unwrap();
    let addr = started.listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = started.server.run(started.listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
