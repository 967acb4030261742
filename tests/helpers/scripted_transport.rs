// ABOUTME: In-memory HttpTransport that replays scripted responses and records requests
// ABOUTME: Lets follower tests run full poll cycles without network access

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use glucose_follower::providers::{
    FollowerStatus, HttpRequest, HttpResponse, HttpTransport, StatusReporter, TransportError,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport answering requests from a FIFO script
///
/// Running past the end of the script yields a transport error, so a test
/// that triggers an unexpected request fails on its outcome.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a raw response
    pub fn push(&self, response: HttpResponse) -> &Self {
        self.script.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a 200 response with a JSON body
    pub fn push_ok(&self, body: &Value) -> &Self {
        self.push(HttpResponse::new(200, body.to_string()))
    }

    /// Queue a response with the given status and text body
    pub fn push_status(&self, status: u16, body: &str) -> &Self {
        self.push(HttpResponse::new(status, body))
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) -> &Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// URLs requested so far, in order
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    /// Scripted responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Request {
                    url,
                    message: "no scripted response".to_owned(),
                })
            })
    }
}

/// Status reporter that keeps every status it receives
#[derive(Default)]
pub struct RecordingReporter {
    statuses: Mutex<Vec<FollowerStatus>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn statuses(&self) -> Vec<FollowerStatus> {
        self.statuses.lock().unwrap().clone()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, status: FollowerStatus) {
        self.statuses.lock().unwrap().push(status);
    }
}
