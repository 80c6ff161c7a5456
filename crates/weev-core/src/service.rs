//! Typed API service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::provider::{ApiRequest, ApiResponse, WeevProvider};
use crate::types::{
    ActivateRequest, ActivationCode, ActivationHistory, ActivationOutcome, AuthStatus,
    BrandDashboard, CategoryList, ClaimReceipt, ConsumerDashboard, LoginRequest, NewProduct,
    ProductEnvelope, RegisterRequest, RewardList, RewardState, User, UserEnvelope,
};

/// Tracing target for API service operations.
pub const TRACING_TARGET: &str = "weev_core::service";

/// Typed weev API client with structured logging.
///
/// Wraps any [`WeevProvider`] and turns raw responses into domain types.
/// Non-success statuses become application errors carrying the server's
/// `error` message; the provider's transport errors pass through unchanged.
#[derive(Clone)]
pub struct WeevService {
    inner: Arc<dyn WeevProvider>,
}

impl fmt::Debug for WeevService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeevService").finish_non_exhaustive()
    }
}

impl WeevService {
    /// Creates a new service over the given provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: WeevProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates a new service over a shared provider.
    pub fn from_arc(provider: Arc<dyn WeevProvider>) -> Self {
        Self { inner: provider }
    }

    /// Asks the server whether the session cookie identifies a user.
    pub async fn check_auth(&self) -> Result<AuthStatus> {
        let response = self.send(Endpoint::CheckAuth, None).await?;
        decode(response)
    }

    /// Fetches the signed-in user.
    pub async fn current_user(&self) -> Result<User> {
        let response = self.send(Endpoint::Me, None).await?;
        decode::<UserEnvelope>(response).map(|envelope| envelope.user)
    }

    /// Signs in with email and password.
    pub async fn login(&self, request: &LoginRequest) -> Result<User> {
        let response = self.send_json(Endpoint::Login, request).await?;
        decode::<UserEnvelope>(response).map(|envelope| envelope.user)
    }

    /// Creates an account and signs in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let response = self.send_json(Endpoint::Register, request).await?;
        decode::<UserEnvelope>(response).map(|envelope| envelope.user)
    }

    /// Ends the server session.
    pub async fn logout(&self) -> Result<()> {
        self.send(Endpoint::Logout, None).await?;
        Ok(())
    }

    /// Activates a product by its code.
    pub async fn activate(&self, code: &ActivationCode) -> Result<ActivationOutcome> {
        let request = ActivateRequest { code: code.clone() };
        let response = self.send_json(Endpoint::Activate, &request).await?;
        decode(response)
    }

    /// Creates a product for the administrator's brand.
    pub async fn create_product(&self, product: &NewProduct) -> Result<ProductEnvelope> {
        let response = self.send_json(Endpoint::CreateProduct, product).await?;
        decode_or_default(response)
    }

    /// Fetches the consumer dashboard.
    pub async fn user_dashboard(&self) -> Result<ConsumerDashboard> {
        let response = self.send(Endpoint::UserDashboard, None).await?;
        decode(response)
    }

    /// Fetches the brand dashboard.
    pub async fn brand_dashboard(&self) -> Result<BrandDashboard> {
        let response = self.send(Endpoint::BrandDashboard, None).await?;
        decode(response)
    }

    /// Lists the consumer's rewards in the given state.
    pub async fn my_rewards(&self, state: RewardState) -> Result<RewardList> {
        let response = self.send(Endpoint::MyRewards { state }, None).await?;
        decode(response)
    }

    /// Claims a granted reward instance.
    pub async fn claim_reward(&self, id: i64) -> Result<ClaimReceipt> {
        let response = self.send(Endpoint::Claim { id }, None).await?;
        decode_or_default(response)
    }

    /// Lists the consumer's activations.
    pub async fn my_activations(&self) -> Result<ActivationHistory> {
        let response = self.send(Endpoint::MyActivations, None).await?;
        decode(response)
    }

    /// Lists the categories of active products.
    pub async fn categories(&self) -> Result<CategoryList> {
        let response = self.send(Endpoint::Categories, None).await?;
        decode(response)
    }

    async fn send_json<B>(&self, endpoint: Endpoint, body: &B) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.send(endpoint, Some(body)).await
    }

    /// Executes a request and turns non-success statuses into errors.
    async fn send(&self, endpoint: Endpoint, body: Option<serde_json::Value>) -> Result<ApiResponse> {
        let mut request = ApiRequest::new(endpoint);
        request.body = body;
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            endpoint = %request.endpoint,
            has_body = request.body.is_some(),
            "Sending API request"
        );

        let result = self.inner.execute(&request).await;
        let elapsed = started_at.elapsed();

        match result {
            Ok(response) if response.is_success() => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    endpoint = %request.endpoint,
                    status_code = response.status_code,
                    elapsed_ms = elapsed.as_millis(),
                    "API request succeeded"
                );
                Ok(response)
            }
            Ok(response) => {
                let error = Error::from_status(response.status_code, response.error_message());
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    endpoint = %request.endpoint,
                    status_code = response.status_code,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "API request rejected"
                );
                Err(error)
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    endpoint = %request.endpoint,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "API request failed"
                );
                Err(error)
            }
        }
    }
}

/// Decodes a successful response body.
///
/// A missing or malformed body on a success status means no usable
/// response arrived.
fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T> {
    let status = response.status_code;
    let body = response
        .body
        .ok_or_else(|| Error::serialization().with_message("Empty response body"))?;

    serde_json::from_value(body).map_err(|e| Error::from(e).with_status(status))
}

/// Like [`decode`] but tolerates an empty body.
fn decode_or_default<T: DeserializeOwned + Default>(response: ApiResponse) -> Result<T> {
    if response.body.is_none() {
        return Ok(T::default());
    }
    decode(response)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;
    use crate::error::ErrorKind;
    use crate::types::UserRole;

    /// Replies with a fixed status and body and remembers the last request.
    struct Fixed {
        status: u16,
        body: Option<Value>,
        last: Mutex<Option<ApiRequest>>,
    }

    impl Fixed {
        fn new(status: u16, body: Option<Value>) -> Self {
            Self {
                status,
                body,
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait::async_trait]
    impl WeevProvider for Fixed {
        async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
            *self.last.lock().unwrap() = Some(request.clone());
            let mut response = ApiResponse::new(request.request_id, self.status);
            response.body = self.body.clone();
            Ok(response)
        }
    }

    struct Unreachable;

    #[async_trait::async_trait]
    impl WeevProvider for Unreachable {
        async fn execute(&self, _request: &ApiRequest) -> Result<ApiResponse> {
            Err(Error::network_error().with_message("connection refused"))
        }
    }

    fn user_json() -> Value {
        json!({
            "id": 5,
            "nombre": "Ana",
            "email": "ana@example.com",
            "user_type": "consumer",
            "puntos_totales": 40
        })
    }

    #[tokio::test]
    async fn login_returns_server_user() {
        let provider = Arc::new(Fixed::new(200, Some(json!({"user": user_json()}))));
        let service = WeevService::from_arc(provider.clone());

        let user = service
            .login(&LoginRequest::new("ana@example.com", "secret"))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Consumer);
        assert_eq!(user.total_points, 40);

        let last = provider.last.lock().unwrap().clone().unwrap();
        assert_eq!(last.endpoint, Endpoint::Login);
        assert_eq!(
            last.body,
            Some(json!({"email": "ana@example.com", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn rejected_login_carries_server_message() {
        let service = WeevService::new(Fixed::new(
            401,
            Some(json!({"error": "Credenciales inválidas"})),
        ));

        let error = service
            .login(&LoginRequest::new("ana@example.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert_eq!(error.server_message(), Some("Credenciales inválidas"));
    }

    #[tokio::test]
    async fn transport_failure_passes_through() {
        let service = WeevService::new(Unreachable);
        let error = service.check_auth().await.unwrap_err();
        assert!(error.is_connection_failure());
        assert_eq!(error.server_message(), None);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_connection_failure() {
        let service = WeevService::new(Fixed::new(200, Some(json!({"unexpected": true}))));
        let error = service.current_user().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);
        assert!(error.server_message().is_none());

        let service = WeevService::new(Fixed::new(200, None));
        let error = service.user_dashboard().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn empty_bodies_are_accepted_where_optional() {
        let service = WeevService::new(Fixed::new(200, None));
        service.logout().await.unwrap();
        let receipt = service.claim_reward(3).await.unwrap();
        assert!(receipt.reward.is_none());
    }

    #[tokio::test]
    async fn rewards_query_uses_state() {
        let provider = Arc::new(Fixed::new(200, Some(json!({"recompensas": []}))));
        let service = WeevService::from_arc(provider.clone());

        let list = service.my_rewards(RewardState::Available).await.unwrap();
        assert!(list.rewards.is_empty());

        let last = provider.last.lock().unwrap().clone().unwrap();
        assert_eq!(last.endpoint.path(), "api/my-rewards?estado=disponible");
        assert!(last.body.is_none());
    }
}
