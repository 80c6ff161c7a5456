//! Reqwest-based HTTP client for the weev API.

use std::sync::Arc;

use reqwest::Client;
use url::Url;
use weev_core::{ApiRequest, ApiResponse, Method, WeevProvider, WeevService};

use super::{Error, ReqwestConfig, TRACING_TARGET};

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    base_url: Url,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client for the weev API.
///
/// Implements [`WeevProvider`]. The session cookie set by the login and
/// registration endpoints is kept in the client's cookie store and sent
/// with every later request, including from clones.
///
/// # Examples
///
/// ```rust,ignore
/// use weev_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let service = client.into_service();
/// let status = service.check_auth().await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    pub fn new(config: ReqwestConfig) -> weev_core::Result<Self> {
        let user_agent = config.effective_user_agent();
        let base_url = config.base_url();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_secs = ?config.http_timeout,
            "Creating reqwest client"
        );

        let mut builder = Client::builder()
            .cookie_store(true)
            .user_agent(&user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(|e| {
            weev_core::Error::configuration()
                .with_message("Failed to create HTTP client")
                .with_source(e)
        })?;

        let inner = ReqwestClientInner {
            http,
            base_url,
            config,
        };

        tracing::info!(
            target: TRACING_TARGET,
            "Reqwest client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this client into a [`WeevService`].
    pub fn into_service(self) -> WeevService {
        WeevService::new(self)
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, Error> {
        let url = self.inner.base_url.join(&request.endpoint.path())?;

        let mut http_request = match request.endpoint.method() {
            Method::Get => self.inner.http.get(url),
            Method::Post => self.inner.http.post(url),
        }
        .header("Accept", "application/json")
        .header("X-Request-Id", request.request_id.to_string());

        if let Some(body) = &request.body {
            http_request = http_request.json(body);
        }

        let http_response = http_request.send().await?;
        let status_code = http_response.status().as_u16();
        let bytes = http_response.bytes().await?;

        let mut response = ApiResponse::new(request.request_id, status_code);
        if !bytes.iter().all(u8::is_ascii_whitespace) {
            response.body = Some(serde_json::from_slice(&bytes)?);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            endpoint = %request.endpoint,
            status_code,
            has_body = response.body.is_some(),
            "Received API response"
        );

        Ok(response)
    }
}

#[async_trait::async_trait]
impl WeevProvider for ReqwestClient {
    async fn execute(&self, request: &ApiRequest) -> weev_core::Result<ApiResponse> {
        self.send(request).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use weev_core::types::{ActivationCode, LoginRequest, UserRole};
    use weev_core::{Endpoint, ErrorKind};

    use super::*;

    async fn login() -> impl IntoResponse {
        (
            [(header::SET_COOKIE, "session=abc123; Path=/; HttpOnly")],
            Json(json!({
                "message": "Login exitoso",
                "user": {
                    "id": 1,
                    "nombre": "Ana",
                    "email": "ana@example.com",
                    "user_type": "consumer"
                }
            })),
        )
    }

    async fn check_auth(headers: HeaderMap) -> Json<Value> {
        let has_session = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|cookie| cookie.contains("session=abc123"));

        if has_session {
            Json(json!({"authenticated": true, "user_type": "consumer"}))
        } else {
            Json(json!({"authenticated": false}))
        }
    }

    async fn activate(Json(body): Json<Value>) -> impl IntoResponse {
        if body["codigo_activacion"] == json!("ABC123") {
            (StatusCode::BAD_REQUEST, Json(json!({"error": "Código ya utilizado"})))
        } else {
            (StatusCode::NOT_FOUND, Json(json!({"error": "Código no encontrado"})))
        }
    }

    async fn categories() -> impl IntoResponse {
        (StatusCode::OK, "<html>maintenance</html>")
    }

    async fn logout() -> StatusCode {
        StatusCode::OK
    }

    async fn serve() -> SocketAddr {
        let router = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/check-auth", get(check_auth))
            .route("/api/auth/logout", post(logout))
            .route("/api/activate", post(activate))
            .route("/api/categories", get(categories));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> ReqwestClient {
        let url = Url::parse(&format!("http://{addr}")).unwrap();
        ReqwestClient::new(ReqwestConfig::new(url)).unwrap()
    }

    #[tokio::test]
    async fn session_cookie_is_kept_between_requests() {
        let service = client_for(serve().await).into_service();

        let status = service.check_auth().await.unwrap();
        assert!(!status.authenticated);

        let user = service
            .login(&LoginRequest::new("ana@example.com", "secret"))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Consumer);

        let status = service.check_auth().await.unwrap();
        assert!(status.authenticated);
        assert_eq!(status.role, Some(UserRole::Consumer));
    }

    #[tokio::test]
    async fn error_bodies_become_application_failures() {
        let service = client_for(serve().await).into_service();

        let code = ActivationCode::normalize("abc123").unwrap();
        let error = service.activate(&code).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Rejected);
        assert_eq!(error.server_message(), Some("Código ya utilizado"));
    }

    #[tokio::test]
    async fn empty_success_body_is_accepted() {
        let client = client_for(serve().await);
        let response = client
            .execute(&ApiRequest::new(Endpoint::Logout))
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn non_json_body_is_a_connection_failure() {
        let service = client_for(serve().await).into_service();
        let error = service.categories().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);
        assert!(error.is_connection_failure());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = client_for(addr).into_service();
        let error = service.check_auth().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NetworkError);
        assert!(error.server_message().is_none());
    }
}
