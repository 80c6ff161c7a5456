//! Error types for the reqwest transport.

use thiserror::Error;

/// Result type alias for reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body was not valid JSON.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Endpoint path could not be resolved against the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<Error> for weev_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    weev_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    weev_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    weev_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    weev_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => weev_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => weev_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use weev_core::ErrorKind;

    use super::*;

    #[test]
    fn serde_errors_are_connection_failures() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error = weev_core::Error::from(Error::from(source));
        assert_eq!(error.kind(), ErrorKind::Serialization);
        assert!(error.is_connection_failure());
    }

    #[test]
    fn url_errors_are_configuration_errors() {
        let source = url::Url::parse("not a url").unwrap_err();
        let error = weev_core::Error::from(Error::from(source));
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
