//! Structured error handling for weev client operations.
//!
//! Errors fall into two observable classes: connection failures, where no
//! usable response arrived, and application failures, where the server
//! answered with a non-OK status and possibly an `{error}` message.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in weev client operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input was rejected before any request was issued.
    InvalidInput,
    /// The server could not be reached.
    NetworkError,
    /// The transport gave up waiting for a response.
    Timeout,
    /// A response body could not be encoded or decoded.
    Serialization,
    /// The server rejected the credentials (401).
    Authentication,
    /// The server denied access to the resource (403).
    Authorization,
    /// The resource does not exist (404).
    NotFound,
    /// The action conflicts with one already in progress, or the server
    /// reported a conflict (409).
    Conflict,
    /// The server rejected the request (other 4xx).
    Rejected,
    /// The server failed to handle the request (5xx).
    ServerError,
    /// The session user has a role the client cannot render.
    UnsupportedRole,
    /// The request was abandoned because the view it belonged to went away.
    Cancelled,
    /// Configuration error.
    Configuration,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Classifies a non-success HTTP status code.
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 => Self::NotFound,
            409 => Self::Conflict,
            400..=499 => Self::Rejected,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Returns whether this kind means no usable response was received.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::Serialization
        )
    }

    /// Returns whether this kind was produced from a server response.
    #[must_use]
    pub const fn is_application_failure(&self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::Authorization
                | Self::NotFound
                | Self::Rejected
                | Self::ServerError
        )
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// HTTP status code, when the error came from a response.
    pub status: Option<u16>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Creates an application error from a non-success response.
    ///
    /// `server_message` is the `error` field of the response body, if any.
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        Self {
            kind: ErrorKind::from_status(status),
            message: server_message,
            status: Some(status),
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Records the HTTP status the error was derived from.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new conflict error.
    pub fn conflict() -> Self {
        Self::new(ErrorKind::Conflict)
    }

    /// Creates a new unsupported role error.
    pub fn unsupported_role() -> Self {
        Self::new(ErrorKind::UnsupportedRole)
    }

    /// Creates a new cancellation error.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns whether no usable response was received.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        self.kind.is_connection_failure()
    }

    /// Returns the server-provided message for application failures.
    ///
    /// Connection failures never expose a message here, even when one was
    /// attached for logging.
    pub fn server_message(&self) -> Option<&str> {
        if self.status.is_some() && !self.is_connection_failure() {
            self.message.as_deref().filter(|m| !m.trim().is_empty())
        } else {
            None
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Invalid JSON payload")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.status.is_none());
        assert!(error.source.is_none());
    }

    #[test]
    fn test_error_display() {
        let error = Error::network_error().with_message("connection refused");

        let display_str = error.to_string();
        assert!(display_str.contains("network_error"));
        assert!(display_str.contains("connection refused"));
    }

    #[test]
    fn test_from_status_classification() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Authentication);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Authorization);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(400), ErrorKind::Rejected);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(302), ErrorKind::Unknown);
    }

    #[test]
    fn test_server_message_only_for_application_failures() {
        let error = Error::from_status(401, Some("Credenciales inválidas".into()));
        assert_eq!(error.server_message(), Some("Credenciales inválidas"));
        assert_eq!(error.status, Some(401));

        let error = Error::from_status(500, Some("  ".into()));
        assert_eq!(error.server_message(), None);

        let error = Error::network_error().with_message("Connection failed");
        assert_eq!(error.server_message(), None);
    }

    #[test]
    fn test_connection_failures() {
        assert!(Error::network_error().is_connection_failure());
        assert!(Error::timeout().is_connection_failure());
        assert!(Error::serialization().is_connection_failure());
        assert!(!Error::from_status(400, None).is_connection_failure());
        assert!(!Error::conflict().is_connection_failure());
    }

    #[test]
    fn test_from_serde_json() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(source);

        assert_eq!(error.kind, ErrorKind::Serialization);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("not_found").unwrap(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorKind::from_str("unsupported_role").unwrap(),
            ErrorKind::UnsupportedRole
        );
        assert!(ErrorKind::from_str("invalid").is_err());
    }
}
