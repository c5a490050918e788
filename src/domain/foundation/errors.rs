//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Caller-facing failure categories.
///
/// `NotFound`, `CapacityExceeded` and `InvalidInput` are expected business
/// outcomes. `PersistenceFailure` means a backing file could not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    CapacityExceeded,
    InvalidInput,
    Conflict,
    PersistenceFailure,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidFormat,
    PaymentInvalid,

    // Not found errors
    MovieNotFound,
    RoomNotFound,
    SessionNotFound,
    ClientNotFound,
    TicketNotFound,

    // State errors
    CapacityExceeded,
    DuplicateId,
    IdsExhausted,
    InvalidState,

    // Infrastructure errors
    PersistenceFailure,
}

impl ErrorCode {
    /// Maps the code onto its caller-facing category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat | ErrorCode::PaymentInvalid => {
                ErrorKind::InvalidInput
            }
            ErrorCode::MovieNotFound
            | ErrorCode::RoomNotFound
            | ErrorCode::SessionNotFound
            | ErrorCode::ClientNotFound
            | ErrorCode::TicketNotFound => ErrorKind::NotFound,
            ErrorCode::CapacityExceeded => ErrorKind::CapacityExceeded,
            ErrorCode::DuplicateId | ErrorCode::IdsExhausted | ErrorCode::InvalidState => {
                ErrorKind::Conflict
            }
            ErrorCode::PersistenceFailure => ErrorKind::PersistenceFailure,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::PaymentInvalid => "PAYMENT_INVALID",
            ErrorCode::MovieNotFound => "MOVIE_NOT_FOUND",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::ClientNotFound => "CLIENT_NOT_FOUND",
            ErrorCode::TicketNotFound => "TICKET_NOT_FOUND",
            ErrorCode::CapacityExceeded => "CAPACITY_EXCEEDED",
            ErrorCode::DuplicateId => "DUPLICATE_ID",
            ErrorCode::IdsExhausted => "IDS_EXHAUSTED",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::PersistenceFailure => "PERSISTENCE_FAILURE",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a persistence failure for the given backing file.
    pub fn persistence(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceFailure, message).with_detail("file", file.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the caller-facing category.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        DomainError::validation(field, err.to_string())
    }
}
