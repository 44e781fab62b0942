//! In-memory transport for tests
//!
//! [`ScriptedTransport`] replays queued responses in order and records every
//! request it receives, so tests can assert on exactly what went over the
//! wire and in which order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use yametrika_core::{Transport, TransportRequest, TransportResponse};
use yametrika_domain::{MetrikaError, Result};

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Result<TransportResponse>>,
    requests: Vec<TransportRequest>,
}

/// Transport that answers from a queue of scripted responses
///
/// Clones share the same script, so a test can keep one handle while the
/// client owns another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response
    pub fn push(&self, response: TransportResponse) {
        self.lock().responses.push_back(Ok(response));
    }

    /// Queue a JSON response with the given status
    pub fn push_json(&self, status: u16, body: &str) {
        self.push(TransportResponse::new(status, body).with_header("Content-Type", "application/json"));
    }

    /// Queue a transport failure
    pub fn push_error(&self, err: MetrikaError) {
        self.lock().responses.push_back(Err(err));
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.lock().requests.clone()
    }

    /// Number of queued responses not yet consumed
    pub fn pending(&self) -> usize {
        self.lock().responses.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut script = self.lock();
        let url = request.url.clone();
        script.requests.push(request);
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(MetrikaError::Network(format!("no scripted response for {url}"))))
    }
}
