//! Scripted weev API transport.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::{Value, json};
use weev_core::{ApiRequest, ApiResponse, Endpoint, Error, ErrorKind, Result, WeevProvider};

/// Tracing target for the mock transport.
pub const TRACING_TARGET: &str = "weev_test::mock";

/// Outcome of a scripted reply.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOutcome {
    /// Respond with the given status and optional JSON body.
    Respond { status: u16, body: Option<Value> },
    /// Fail at the transport level with the given kind.
    Fail(ErrorKind),
}

/// A scripted answer to one request.
#[derive(Debug, Clone, PartialEq)]
pub struct MockReply {
    /// What the transport produces.
    pub outcome: MockOutcome,
    /// How long to wait before producing it.
    pub delay: Option<Duration>,
}

impl MockReply {
    fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            delay: None,
        }
    }

    /// `200 OK` with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self::status(200, body)
    }

    /// Any status with a JSON body.
    pub fn status(status: u16, body: Value) -> Self {
        Self::new(MockOutcome::Respond {
            status,
            body: Some(body),
        })
    }

    /// Any status with an empty body.
    pub fn empty(status: u16) -> Self {
        Self::new(MockOutcome::Respond { status, body: None })
    }

    /// Error status with an `{error}` body.
    pub fn error(status: u16, message: &str) -> Self {
        Self::status(status, json!({ "error": message }))
    }

    /// Connection refused.
    pub fn network_error() -> Self {
        Self::new(MockOutcome::Fail(ErrorKind::NetworkError))
    }

    /// Response body that is not JSON.
    pub fn malformed() -> Self {
        Self::new(MockOutcome::Fail(ErrorKind::Serialization))
    }

    /// Delays this reply by the given duration.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct MockProviderInner {
    scripts: Mutex<HashMap<Endpoint, VecDeque<MockReply>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

/// A [`WeevProvider`] answering from per-endpoint scripts.
///
/// Replies for an endpoint are consumed in order; the last one is repeated
/// for any further call. Endpoints without a script fail with a network
/// error. Clones share scripts and the call log.
#[derive(Clone, Default)]
pub struct MockProvider {
    inner: Arc<MockProviderInner>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("calls", &self.calls().len())
            .finish_non_exhaustive()
    }
}

impl MockProvider {
    /// Creates a provider with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reply for the endpoint.
    #[must_use]
    pub fn on(self, endpoint: Endpoint, reply: MockReply) -> Self {
        self.push(endpoint, reply);
        self
    }

    /// Appends a reply for the endpoint on a shared provider.
    pub fn push(&self, endpoint: Endpoint, reply: MockReply) {
        lock(&self.inner.scripts)
            .entry(endpoint)
            .or_default()
            .push_back(reply);
    }

    /// Replaces every scripted reply for the endpoint.
    pub fn set(&self, endpoint: Endpoint, reply: MockReply) {
        lock(&self.inner.scripts).insert(endpoint, VecDeque::from([reply]));
    }

    /// Returns every request received so far, oldest first.
    pub fn calls(&self) -> Vec<ApiRequest> {
        lock(&self.inner.calls).clone()
    }

    /// Returns the requests received for one endpoint.
    pub fn calls_to(&self, endpoint: &Endpoint) -> Vec<ApiRequest> {
        lock(&self.inner.calls)
            .iter()
            .filter(|request| &request.endpoint == endpoint)
            .cloned()
            .collect()
    }

    /// Returns how many requests were received for one endpoint.
    pub fn count(&self, endpoint: &Endpoint) -> usize {
        lock(&self.inner.calls)
            .iter()
            .filter(|request| &request.endpoint == endpoint)
            .count()
    }

    /// Returns the body of the latest request to the endpoint.
    pub fn last_body(&self, endpoint: &Endpoint) -> Option<Value> {
        self.calls_to(endpoint)
            .pop()
            .and_then(|request| request.body)
    }

    /// Forgets all recorded requests, keeping the scripts.
    pub fn clear_calls(&self) {
        lock(&self.inner.calls).clear();
    }

    fn next_reply(&self, endpoint: &Endpoint) -> Option<MockReply> {
        let mut scripts = lock(&self.inner.scripts);
        let queue = scripts.get_mut(endpoint)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn resolve(request: &ApiRequest, reply: MockReply) -> Result<ApiResponse> {
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    match reply.outcome {
        MockOutcome::Respond { status, body } => {
            let mut response = ApiResponse::new(request.request_id, status);
            response.body = body;
            Ok(response)
        }
        MockOutcome::Fail(kind) => Err(Error::new(kind).with_message("Scripted transport failure")),
    }
}

#[async_trait::async_trait]
impl WeevProvider for MockProvider {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        lock(&self.inner.calls).push(request.clone());

        tracing::trace!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            endpoint = %request.endpoint,
            "Mock request received"
        );

        match self.next_reply(&request.endpoint) {
            Some(reply) => resolve(request, reply).await,
            None => Err(Error::network_error().with_message("No scripted reply")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order_and_last_repeats() {
        let mock = MockProvider::new()
            .on(Endpoint::CheckAuth, MockReply::ok(json!({"authenticated": false})))
            .on(Endpoint::CheckAuth, MockReply::error(500, "boom"));

        let request = ApiRequest::new(Endpoint::CheckAuth);
        assert_eq!(mock.execute(&request).await.unwrap().status_code, 200);
        assert_eq!(mock.execute(&request).await.unwrap().status_code, 500);
        assert_eq!(mock.execute(&request).await.unwrap().status_code, 500);
        assert_eq!(mock.count(&Endpoint::CheckAuth), 3);
    }

    #[tokio::test]
    async fn unscripted_endpoints_fail_at_transport_level() {
        let mock = MockProvider::new();
        let error = mock
            .execute(&ApiRequest::new(Endpoint::Me))
            .await
            .unwrap_err();
        assert!(error.is_connection_failure());
    }

    #[tokio::test]
    async fn bodies_are_recorded() {
        let mock = MockProvider::new().on(Endpoint::Activate, MockReply::empty(204));
        let request =
            ApiRequest::new(Endpoint::Activate).with_body(json!({"codigo_activacion": "X1"}));
        mock.execute(&request).await.unwrap();

        assert_eq!(
            mock.last_body(&Endpoint::Activate),
            Some(json!({"codigo_activacion": "X1"}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_replies_wait() {
        let mock = MockProvider::new().on(
            Endpoint::Categories,
            MockReply::ok(json!({"categorias": []})).delayed(Duration::from_secs(2)),
        );

        let started = tokio::time::Instant::now();
        mock.execute(&ApiRequest::new(Endpoint::Categories))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
