//! Error types for the Jotter client.
//!
//! Backend failures are described by [`ApiError`] and wrapped by one error type
//! per operation family ([`AuthError`], [`FetchError`], [`SaveError`],
//! [`DeleteError`], [`RegisterError`]). Everything that is not a backend call
//! (files, config, serialization) goes through [`JotterError`].

use thiserror::Error;

/// A failed call to the notes backend.
///
/// Variants carry owned strings so the error stays `Clone` and can be logged
/// after the response has been consumed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No session is active, so the request was never sent.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The request could not be delivered or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend rejected the bearer token (expired, invalid or missing).
    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },

    /// Any other non-2xx response. `body` is the raw response payload.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Builds the error for a non-2xx response.
    ///
    /// A 401 becomes [`ApiError::Unauthorized`] with the backend's `detail`
    /// field when the body has one.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        if status == 401 {
            return Self::Unauthorized {
                detail: extract_detail(&body).unwrap_or(body),
            };
        }
        Self::Status { status, body }
    }

    /// Check if this is a NotAuthenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Check if the backend refused the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The text worth putting in a diagnostic log line.
    ///
    /// This is the response payload when the backend sent one, otherwise the
    /// raw failure message.
    pub fn payload(&self) -> String {
        match self {
            Self::Unauthorized { detail } => detail.clone(),
            Self::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Pulls `detail` out of a FastAPI-style `{"detail": ...}` error body.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Login failure.
///
/// Displays the same message for bad credentials and network problems. The
/// cause is kept for logs.
#[derive(Error, Debug, Clone)]
#[error("Invalid credentials")]
pub struct AuthError {
    #[source]
    pub cause: ApiError,
}

impl From<ApiError> for AuthError {
    fn from(cause: ApiError) -> Self {
        Self { cause }
    }
}

/// Failure of the list call.
#[derive(Error, Debug, Clone)]
#[error("Error fetching notes: {0}")]
pub struct FetchError(#[from] pub ApiError);

/// Failure of a create or update call.
#[derive(Error, Debug, Clone)]
#[error("Error saving note: {0}")]
pub struct SaveError(#[from] pub ApiError);

/// Failure of a delete call.
#[derive(Error, Debug, Clone)]
#[error("Error deleting note: {0}")]
pub struct DeleteError(#[from] pub ApiError);

/// Failure of the user registration call.
#[derive(Error, Debug, Clone)]
#[error("Error registering user: {0}")]
pub struct RegisterError(#[from] pub ApiError);

/// Shared error type for everything that is not a backend call.
#[derive(Error, Debug, Clone)]
pub enum JotterError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token or settings storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl JotterError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for JotterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for JotterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, JotterError>`.
pub type Result<T> = std::result::Result<T, JotterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_extracts_detail() {
        let err = ApiError::from_status(401, r#"{"detail":"Token has expired."}"#);
        assert_eq!(
            err,
            ApiError::Unauthorized {
                detail: "Token has expired.".to_string()
            }
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_unauthorized_without_json_keeps_body() {
        let err = ApiError::from_status(401, "nope");
        assert_eq!(err.payload(), "nope");
    }

    #[test]
    fn test_payload_prefers_response_body() {
        let err = ApiError::from_status(422, r#"{"detail":[{"msg":"field required"}]}"#);
        assert_eq!(err.status(), Some(422));
        assert!(err.payload().contains("field required"));

        let err = ApiError::from_status(500, "");
        assert_eq!(err.payload(), "Backend returned 500: ");

        let err = ApiError::transport("connection refused");
        assert_eq!(err.payload(), "Transport error: connection refused");
    }

    #[test]
    fn test_auth_error_message_hides_cause() {
        let network = AuthError::from(ApiError::transport("connection refused"));
        let rejected = AuthError::from(ApiError::from_status(401, "{}"));
        assert_eq!(network.to_string(), "Invalid credentials");
        assert_eq!(network.to_string(), rejected.to_string());
        assert!(rejected.cause.is_unauthorized());
    }

    #[test]
    fn test_operation_errors_wrap_api_error() {
        let err: SaveError = ApiError::NotAuthenticated.into();
        assert!(err.0.is_not_authenticated());
        assert_eq!(err.to_string(), "Error saving note: Not logged in");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: JotterError = io.into();
        assert!(matches!(err, JotterError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: JotterError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(
            &err,
            JotterError::Serialization { format, .. } if format == "JSON"
        ));
        assert!(!err.is_config());
        assert!(JotterError::config("bad key").is_config());
    }
}
