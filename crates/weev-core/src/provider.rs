//! Transport abstraction between the typed service and an HTTP client.

use serde_json::Value;
use uuid::Uuid;

use crate::endpoint::Endpoint;
use crate::error::Result;

/// A single call to the weev API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// The endpoint to call.
    pub endpoint: Endpoint,
    /// JSON body, sent for mutating endpoints.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request without a body.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            endpoint,
            body: None,
        }
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The answer to an [`ApiRequest`].
///
/// Any HTTP status is a response; only transport failures are errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Identifier of the request this responds to.
    pub request_id: Uuid,
    /// HTTP status code.
    pub status_code: u16,
    /// Decoded JSON body, `None` when the body was empty.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Creates a response for the given request.
    pub fn new(request_id: Uuid, status_code: u16) -> Self {
        Self {
            request_id,
            status_code,
            body: None,
        }
    }

    /// Sets the decoded JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns whether the status code is in the 2xx range.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns the `error` field of the body, if present and a string.
    pub fn error_message(&self) -> Option<String> {
        self.body
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

/// Core trait for weev API transports.
///
/// Implement this trait to plug a different HTTP stack (or a test double)
/// under [`WeevService`](crate::WeevService).
#[async_trait::async_trait]
pub trait WeevProvider: Send + Sync {
    /// Sends the request and returns the server's response.
    ///
    /// Returns an error only when no usable response arrived: the server
    /// was unreachable, the transport timed out, or the body was not JSON.
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_range() {
        let id = Uuid::now_v7();
        assert!(ApiResponse::new(id, 200).is_success());
        assert!(ApiResponse::new(id, 201).is_success());
        assert!(!ApiResponse::new(id, 401).is_success());
        assert!(!ApiResponse::new(id, 500).is_success());
    }

    #[test]
    fn error_message_is_read_from_body() {
        let response = ApiResponse::new(Uuid::now_v7(), 401)
            .with_body(json!({"error": "Credenciales inválidas"}));
        assert_eq!(
            response.error_message().as_deref(),
            Some("Credenciales inválidas")
        );

        let response = ApiResponse::new(Uuid::now_v7(), 500).with_body(json!({"error": 3}));
        assert!(response.error_message().is_none());
    }
}
