//! Shared fixtures for unit tests: token builder, a scripted transport, and
//! storage that runs out of quota.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tokio::sync::Notify;

use crate::net::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::util::storage::{KeyValueStorage, MemoryStorage, StorageError};

/// Fixed "now" used across tests: 2024-01-01T00:00:00Z.
pub(crate) const NOW_MS: i64 = 1_704_067_200_000;
pub(crate) const NOW_SECS: i64 = NOW_MS / 1000;

/// Build a JWT-shaped token with the given claims and a dummy signature.
pub(crate) fn unsigned_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[derive(Default)]
struct Script {
    responses: VecDeque<Result<ApiResponse, TransportError>>,
    requests: Vec<ApiRequest>,
}

/// Transport that records requests and replays scripted responses in order.
/// With a gate installed, each send waits for one `notify_one` before
/// answering, which lets a test interleave other work mid-request.
#[derive(Clone, Default)]
pub(crate) struct StubTransport {
    script: Arc<Mutex<Script>>,
    gate: Option<Arc<Notify>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self { gate: Some(gate), ..Self::default() }
    }

    pub(crate) fn respond_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.respond_raw(status, &body.to_string())
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.script.lock().unwrap().responses.push_back(Ok(ApiResponse {
            status,
            body: body.to_owned(),
        }));
        self
    }

    pub(crate) fn fail_network(&self, reason: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back(Err(TransportError::Network(reason.to_owned())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().unwrap().requests.clone()
    }
}

#[async_trait(?Send)]
impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.script.lock().unwrap().requests.push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.script
            .lock()
            .unwrap()
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_owned())))
    }
}

/// Memory storage that accepts a fixed number of writes, then rejects every
/// later `set_item` the way a full `localStorage` does.
#[derive(Clone, Default)]
pub(crate) struct QuotaStorage {
    inner: MemoryStorage,
    writes_left: Arc<AtomicUsize>,
}

impl QuotaStorage {
    pub(crate) fn allowing(writes: usize) -> Self {
        Self { inner: MemoryStorage::new(), writes_left: Arc::new(AtomicUsize::new(writes)) }
    }
}

impl KeyValueStorage for QuotaStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let allowed = self
            .writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(StorageError::Rejected("quota".to_owned()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        self.inner.remove_item(key);
    }
}
