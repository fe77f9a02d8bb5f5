//! Payment gateway seam.
//!
//! Real gateways (Braintree, PayPal, Cash App) live behind the
//! [`PaymentProcessor`] trait; the service only sees a charge request and a
//! receipt. Charges are never retried here: after an ambiguous gateway
//! response a blind retry could double-charge.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::order::PaymentMethod;

/// A single charge to submit to the gateway.
#[derive(Debug, Clone)]
pub struct ChargeRequest<'a> {
    /// Amount to charge, in cents.
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: &'a str,
    /// Instrument selected by the shopper.
    pub method: PaymentMethod,
    /// One-time payment token from the client-side gateway SDK, when the
    /// instrument requires one.
    pub nonce: Option<&'a str>,
}

/// Confirmation returned by the gateway for a successful charge.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// Gateway transaction identifier.
    pub transaction_id: String,
}

/// Failure modes of a charge attempt.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway processed the request and refused the charge.
    #[error("payment declined: {0}")]
    Declined(String),
    /// The gateway could not be reached or gave no usable answer.
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// External payment processor collaborator.
pub trait PaymentProcessor: Send + Sync {
    /// Submit a charge and block until the gateway answers.
    fn charge(&self, request: &ChargeRequest<'_>) -> Result<PaymentReceipt, PaymentError>;
}

/// Gateway stand-in that approves every well-formed charge.
///
/// Mirrors the sandbox environments the storefront is wired to in
/// development; swap in a real [`PaymentProcessor`] for production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxGateway;

impl SandboxGateway {
    pub fn new() -> Self {
        Self
    }
}

impl PaymentProcessor for SandboxGateway {
    fn charge(&self, request: &ChargeRequest<'_>) -> Result<PaymentReceipt, PaymentError> {
        if request.amount_cents <= 0 {
            return Err(PaymentError::Declined(
                "charge amount must be positive".to_string(),
            ));
        }

        let prefix = match request.method {
            PaymentMethod::CreditCard => "BT",
            PaymentMethod::PayPal => "PP",
            PaymentMethod::CashApp => "CA",
        };

        Ok(PaymentReceipt {
            transaction_id: format!("{prefix}-{}", Uuid::new_v4().simple()).to_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_approves_positive_amounts() {
        let gateway = SandboxGateway::new();
        let receipt = gateway
            .charge(&ChargeRequest {
                amount_cents: 22_050,
                currency: "USD",
                method: PaymentMethod::PayPal,
                nonce: None,
            })
            .expect("sandbox should approve");

        assert!(receipt.transaction_id.starts_with("PP-"));
    }

    #[test]
    fn sandbox_declines_non_positive_amounts() {
        let gateway = SandboxGateway::new();
        let result = gateway.charge(&ChargeRequest {
            amount_cents: 0,
            currency: "USD",
            method: PaymentMethod::CreditCard,
            nonce: None,
        });

        assert!(matches!(result, Err(PaymentError::Declined(_))));
    }
}
