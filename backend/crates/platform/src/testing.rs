//! Test doubles for code built on [`crate::upstream`]
//!
//! Enabled for dependents through the `test-util` feature.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::upstream::{UpstreamError, UpstreamRequest, UpstreamResponse, UpstreamTransport};

/// Transport replaying scripted answers in order and recording requests.
/// Once the script runs out every call fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    answers: Mutex<VecDeque<Result<UpstreamResponse, UpstreamError>>>,
    sent: Mutex<Vec<UpstreamRequest>>,
}

impl ScriptedTransport {
    pub fn new(answers: Vec<Result<UpstreamResponse, UpstreamError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Script made only of successful answers
    pub fn replying(answers: Vec<UpstreamResponse>) -> Self {
        Self::new(answers.into_iter().map(Ok).collect())
    }

    /// Requests seen so far, oldest first
    pub fn sent(&self) -> Vec<UpstreamRequest> {
        lock(&self.sent).clone()
    }
}

impl UpstreamTransport for ScriptedTransport {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        lock(&self.sent).push(request);
        lock(&self.answers)
            .pop_front()
            .unwrap_or_else(|| Err(UpstreamError::Transport("no scripted answer left".into())))
    }
}

// A panicking test must not poison the script for the next assertion.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamClient;
    use axum::http::Method;

    #[tokio::test]
    async fn test_replays_in_order_then_fails() {
        let client = UpstreamClient::new(ScriptedTransport::replying(vec![
            UpstreamResponse::new(200, "[1]"),
            UpstreamResponse::new(404, "gone"),
        ]));

        let first: Vec<u8> = client.fetch(UpstreamRequest::get("/a")).await.unwrap();
        assert_eq!(first, vec![1]);
        assert!(matches!(
            client.fetch::<Vec<u8>>(UpstreamRequest::get("/b")).await,
            Err(UpstreamError::Status { status: 404, .. })
        ));
        assert!(matches!(
            client.fetch::<Vec<u8>>(UpstreamRequest::get("/c")).await,
            Err(UpstreamError::Transport(_))
        ));

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].method(), &Method::GET);
        assert_eq!(sent[2].path(), "/c");
    }
}
