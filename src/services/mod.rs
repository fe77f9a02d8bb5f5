use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod carts;
pub mod checkout;
pub mod coupons;
pub mod orders;
pub mod products;

/// Result type returned by all service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer and mapped to HTTP responses by the
/// route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller is not allowed to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// The submitted payload failed validation.
    #[error("{0}")]
    Form(String),
    /// The requested entity does not exist.
    #[error("not found")]
    NotFound,
    /// The operation conflicts with the current state of the system.
    #[error("{0}")]
    Conflict(String),
    /// The payment gateway declined the charge.
    #[error("payment declined: {0}")]
    Payment(String),
    /// The payment gateway could not be reached.
    #[error("payment gateway unavailable")]
    Gateway,
    /// An unexpected failure in the persistence layer.
    #[error("internal error")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Duplicate => Self::Conflict("record already exists".to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}
