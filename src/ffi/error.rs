use std::fmt;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, ServiceError, ValidationError};

/// Error codes for FFI boundary
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Success (no error)
    Success = 0,

    // General errors (1-99)
    Unknown = 1,
    InvalidArgument = 2,
    NullPointer = 3,
    InvalidUtf8 = 4,
    InternalError = 6,

    // Domain errors (200-299)
    ValidationFailed = 204,
    UnknownValue = 209,

    // Service errors (300-399)
    PermissionDenied = 305,
    ConfigurationError = 310,
    NotInitialized = 312,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, *self as i32)
    }
}

/// Error type for FFI boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FFIError {
    /// Error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (JSON string)
    pub details: Option<String>,
}

impl fmt::Display for FFIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{}: {} ({})", self.code, self.message, details)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for FFIError {}

impl FFIError {
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: &str, details: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    pub fn null_pointer(what: &str) -> Self {
        Self::new(ErrorCode::NullPointer, &format!("Null pointer provided for {}", what))
    }

    pub fn internal(message: String) -> Self {
        Self::new(ErrorCode::InternalError, &message)
    }
}

/// Result type for FFI operations
pub type FFIResult<T> = Result<T, FFIError>;

impl From<DomainError> for FFIError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(val_err) => val_err.into(),
            DomainError::Configuration(msg) => Self::new(ErrorCode::ConfigurationError, &msg),
            DomainError::UnknownValue { kind, value } => Self::with_details(
                ErrorCode::UnknownValue,
                &format!("Unknown {}: {}", kind, value),
                &details_json(&[("kind", kind.as_str()), ("value", value.as_str())]),
            ),
        }
    }
}

impl From<ServiceError> for FFIError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(domain_err) => domain_err.into(),
            ServiceError::PermissionDenied(msg) => Self::new(ErrorCode::PermissionDenied, &msg),
            ServiceError::NotInitialized => Self::new(
                ErrorCode::NotInitialized,
                "Access core has not been initialized; call canvass_initialize first",
            ),
            ServiceError::Configuration(msg) => Self::new(ErrorCode::ConfigurationError, &msg),
        }
    }
}

impl From<ValidationError> for FFIError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        let details = match &err {
            ValidationError::Required { field } => {
                details_json(&[("field", field.as_str()), ("type", "required")])
            }
            ValidationError::Range { field, min, max } => {
                details_json(&[("field", field.as_str()), ("type", "range"), ("min", min.as_str()), ("max", max.as_str())])
            }
            ValidationError::InvalidValue { field, reason } => {
                details_json(&[("field", field.as_str()), ("type", "invalid_value"), ("reason", reason.as_str())])
            }
            ValidationError::Custom(msg) => details_json(&[("type", "custom"), ("message", msg.as_str())]),
        };
        Self::with_details(ErrorCode::ValidationFailed, &message, &details)
    }
}

impl From<std::ffi::NulError> for FFIError {
    fn from(_: std::ffi::NulError) -> Self {
        Self::new(ErrorCode::InvalidUtf8, "String contains null bytes, cannot create CString")
    }
}

impl From<serde_json::Error> for FFIError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_argument(&format!("Invalid JSON payload: {}", err))
    }
}

// serde_json takes care of escaping quotes in user-supplied values
fn details_json(pairs: &[(&str, &str)]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::String(value.to_string())))
        .collect();
    serde_json::Value::Object(map).to_string()
}
