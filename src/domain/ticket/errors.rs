//! Purchase-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, ErrorKind, SessionId};

/// Reasons a ticket purchase is rejected.
///
/// Every variant except `Persistence` is raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Session {0} is sold out")]
    RoomCrowded(SessionId),

    #[error("Invalid payment method: '{0}'")]
    PaymentInvalid(String),

    #[error("Purchase could not be persisted: {0}")]
    Persistence(String),
}

impl PurchaseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PurchaseError::ClientNotFound(_) => ErrorCode::ClientNotFound,
            PurchaseError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            PurchaseError::RoomCrowded(_) => ErrorCode::CapacityExceeded,
            PurchaseError::PaymentInvalid(_) => ErrorCode::PaymentInvalid,
            PurchaseError::Persistence(_) => ErrorCode::PersistenceFailure,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}

impl From<DomainError> for PurchaseError {
    fn from(err: DomainError) -> Self {
        PurchaseError::Persistence(err.to_string())
    }
}
