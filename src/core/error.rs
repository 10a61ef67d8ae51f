//! Typed error handling for the fanout resolvers
//!
//! Every resolver fails with exactly one shape, [`BackendError`]: the backend
//! service and remote method that were called, a machine-readable
//! [`CallStatus`], and a human-readable message. Timeouts and caller
//! cancellation are reported through the same shape with their own status, so
//! the query engine renders them like any other failed backend call.
//!
//! # Error Categories
//!
//! - [`BackendError`]: a remote call failed, timed out or was cancelled
//! - [`ConfigError`]: configuration loading and validation
//! - [`FanoutError`]: umbrella type used at process edges
//!
//! # Example
//!
//! ```rust,ignore
//! match resolvers.order_account(&ctx, &order).await {
//!     Ok(account) => println!("owner: {}", account.name),
//!     Err(err) if err.status == CallStatus::NotFound => println!("no owner"),
//!     Err(err) => eprintln!("{} failed: {}", err.method, err),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Status of a failed remote call
///
/// Mirrors the status vocabulary of the remote-procedure transport so that a
/// backend's own classification survives the trip through the resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    /// The requested record does not exist
    NotFound,

    /// The backend rejected the request arguments
    InvalidArgument,

    /// The per-call deadline (or the caller's own deadline) elapsed
    DeadlineExceeded,

    /// The caller cancelled the request
    Cancelled,

    /// The backend could not be reached
    Unavailable,

    /// The backend failed while serving the request
    Internal,

    /// Any status without a more specific mapping
    Unknown,
}

impl CallStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            CallStatus::NotFound => "NOT_FOUND",
            CallStatus::InvalidArgument => "INVALID_ARGUMENT",
            CallStatus::DeadlineExceeded => "DEADLINE_EXCEEDED",
            CallStatus::Cancelled => "CANCELLED",
            CallStatus::Unavailable => "UNAVAILABLE",
            CallStatus::Internal => "INTERNAL",
            CallStatus::Unknown => "UNKNOWN",
        }
    }

    /// Whether the call was abandoned by this side rather than failed by the backend
    pub fn is_abandoned(&self) -> bool {
        matches!(self, CallStatus::DeadlineExceeded | CallStatus::Cancelled)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_code())
    }
}

// =============================================================================
// Backend Errors
// =============================================================================

/// A failed call to a backend service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    /// Backend service name (e.g. "account")
    pub service: &'static str,

    /// Remote method name (e.g. "GetAccount")
    pub method: &'static str,

    /// Machine-readable status
    pub status: CallStatus,

    /// Human-readable message
    pub message: String,
}

impl BackendError {
    pub fn new(
        service: &'static str,
        method: &'static str,
        status: CallStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            service,
            method,
            status,
            message: message.into(),
        }
    }

    pub fn not_found(service: &'static str, method: &'static str, id: &str) -> Self {
        Self::new(
            service,
            method,
            CallStatus::NotFound,
            format!("no record with id '{}'", id),
        )
    }

    pub fn unavailable(
        service: &'static str,
        method: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(service, method, CallStatus::Unavailable, message)
    }

    pub fn internal(
        service: &'static str,
        method: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(service, method, CallStatus::Internal, message)
    }

    pub fn deadline_exceeded(
        service: &'static str,
        method: &'static str,
        timeout: Duration,
    ) -> Self {
        Self::new(
            service,
            method,
            CallStatus::DeadlineExceeded,
            format!("no reply within {}ms", timeout.as_millis()),
        )
    }

    pub fn cancelled(service: &'static str, method: &'static str) -> Self {
        Self::new(
            service,
            method,
            CallStatus::Cancelled,
            "call cancelled by caller",
        )
    }

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: Some(serde_json::json!({
                "service": self.service,
                "method": self.method,
            })),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} service call {} failed ({}): {}",
            self.service, self.method, self.status, self.message
        )
    }
}

impl std::error::Error for BackendError {}

/// Error response structure, used as the body of error entries
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(feature = "grpc")]
impl BackendError {
    /// Build an error from a gRPC status returned by `method` on `service`
    pub fn from_status(service: &'static str, method: &'static str, status: tonic::Status) -> Self {
        use tonic::Code;

        let call_status = match status.code() {
            Code::NotFound => CallStatus::NotFound,
            Code::InvalidArgument | Code::OutOfRange => CallStatus::InvalidArgument,
            Code::DeadlineExceeded => CallStatus::DeadlineExceeded,
            Code::Cancelled => CallStatus::Cancelled,
            Code::Unavailable => CallStatus::Unavailable,
            Code::Internal | Code::DataLoss => CallStatus::Internal,
            _ => CallStatus::Unknown,
        };
        Self::new(service, method, call_status, status.message())
    }
}

#[cfg(feature = "graphql")]
impl async_graphql::ErrorExtensions for BackendError {
    fn extend(&self) -> async_graphql::Error {
        use async_graphql::ErrorExtensions as _;

        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.error_code().to_string());
            e.set("service", self.service.to_string());
            e.set("method", self.method.to_string());
        })
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound {
        path: String,
    },

    /// IO error while reading configuration
    IoError {
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }
}

// =============================================================================
// Umbrella error
// =============================================================================

/// The main error type for the fanout crate
#[derive(Debug)]
pub enum FanoutError {
    /// A backend call failed
    Backend(BackendError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for FanoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FanoutError::Backend(e) => write!(f, "{}", e),
            FanoutError::Config(e) => write!(f, "{}", e),
            FanoutError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for FanoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FanoutError::Backend(e) => Some(e),
            FanoutError::Config(e) => Some(e),
            FanoutError::Internal(_) => None,
        }
    }
}

impl FanoutError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FanoutError::Backend(e) => e.error_code(),
            FanoutError::Config(e) => e.error_code(),
            FanoutError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<BackendError> for FanoutError {
    fn from(err: BackendError) -> Self {
        FanoutError::Backend(err)
    }
}

impl From<ConfigError> for FanoutError {
    fn from(err: ConfigError) -> Self {
        FanoutError::Config(err)
    }
}

impl From<std::io::Error> for FanoutError {
    fn from(err: std::io::Error) -> Self {
        FanoutError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for FanoutError {
    fn from(err: serde_yaml::Error) -> Self {
        FanoutError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for FanoutError {
    fn from(err: anyhow::Error) -> Self {
        FanoutError::Internal(err.to_string())
    }
}

/// A specialized Result type for fanout operations
pub type FanoutResult<T> = Result<T, FanoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::not_found("account", "GetAccount", "7");
        let display = err.to_string();
        assert!(display.contains("account"));
        assert!(display.contains("GetAccount"));
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("'7'"));
    }

    #[test]
    fn test_deadline_error_carries_timeout() {
        let err = BackendError::deadline_exceeded("catalog", "GetProducts", Duration::from_secs(3));
        assert_eq!(err.status, CallStatus::DeadlineExceeded);
        assert!(err.message.contains("3000ms"));
        assert!(err.status.is_abandoned());
    }

    #[test]
    fn test_backend_failure_is_not_abandoned() {
        assert!(!CallStatus::NotFound.is_abandoned());
        assert!(!CallStatus::Unavailable.is_abandoned());
        assert!(CallStatus::Cancelled.is_abandoned());
    }

    #[test]
    fn test_error_response_details() {
        let err = BackendError::unavailable("catalog", "GetProduct", "connection refused");
        let response = err.to_response();
        assert_eq!(response.code, "UNAVAILABLE");
        let details = response.details.unwrap();
        assert_eq!(details["service"], "catalog");
        assert_eq!(details["method"], "GetProduct");
    }

    #[test]
    fn test_fanout_error_conversion() {
        let err: FanoutError = BackendError::cancelled("account", "GetAccounts").into();
        assert_eq!(err.error_code(), "CANCELLED");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error() {
        let err = ConfigError::FileNotFound {
            path: "/etc/fanout.yaml".to_string(),
        };
        assert!(err.to_string().contains("/etc/fanout.yaml"));
        assert_eq!(err.error_code(), "CONFIG_FILE_NOT_FOUND");
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{not: a list").unwrap_err();
        let err: FanoutError = yaml_err.into();
        assert!(matches!(
            err,
            FanoutError::Config(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_status_serializes_as_code() {
        let json = serde_json::to_value(CallStatus::DeadlineExceeded).unwrap();
        assert_eq!(json, "DEADLINE_EXCEEDED");
    }
}
