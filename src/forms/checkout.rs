use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::PaymentMethod;
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// US ZIP codes: five digits with an optional four-digit extension.
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());

/// Phone numbers: optional leading `+`, ten to fifteen digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?\d{10,15}$").unwrap());

/// Result type returned by the checkout form helpers.
pub type CheckoutFormResult<T> = Result<T, CheckoutFormError>;

/// Errors that can occur while processing the checkout form.
#[derive(Debug, Error)]
pub enum CheckoutFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required field is empty after sanitization.
    #[error("`{field}` cannot be empty")]
    EmptyField { field: &'static str },
}

/// Form payload submitted when placing an order.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutForm {
    /// Recipient name.
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,
    /// Email address for the order confirmation.
    #[validate(email)]
    pub email: String,
    /// Optional contact phone number.
    #[validate(regex(path = *PHONE_RE))]
    pub phone: Option<String>,
    /// Street address.
    #[validate(length(min = 1, max = 256))]
    pub address: String,
    /// City.
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    /// State or region.
    #[validate(length(min = 1, max = 128))]
    pub state: String,
    /// ZIP code, `NNNNN` or `NNNNN-NNNN`.
    #[validate(regex(path = *ZIP_RE))]
    pub zip: String,
    /// Country.
    #[validate(length(min = 1, max = 128))]
    pub country: String,
    /// Payment instrument chosen at checkout. Unknown values fall back to
    /// `credit_card`.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Opaque payment token from the gateway's client SDK.
    pub payment_nonce: Option<String>,
    /// Optional notes supplied by the shopper.
    pub notes: Option<String>,
}

/// Validated and sanitized checkout details handed to the checkout service.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub payment_method: PaymentMethod,
    pub payment_nonce: Option<String>,
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// Validates and sanitizes the payload into a [`CheckoutRequest`].
    pub fn into_checkout_request(self) -> CheckoutFormResult<CheckoutRequest> {
        self.validate()?;

        let full_name = require_inline("full_name", &self.full_name)?;
        let address = require_inline("address", &self.address)?;
        let city = require_inline("city", &self.city)?;
        let state = require_inline("state", &self.state)?;
        let country = require_inline("country", &self.country)?;

        let payment_method = self
            .payment_method
            .as_deref()
            .map(PaymentMethod::from)
            .unwrap_or(PaymentMethod::CreditCard);

        let notes = self
            .notes
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        Ok(CheckoutRequest {
            full_name,
            email: self.email.trim().to_string(),
            phone: self.phone,
            address,
            city,
            state,
            zip: self.zip.trim().to_string(),
            country,
            payment_method,
            payment_nonce: self.payment_nonce,
            notes,
        })
    }
}

fn require_inline(field: &'static str, value: &str) -> CheckoutFormResult<String> {
    let sanitized = sanitize_inline_text(value);
    if sanitized.is_empty() {
        return Err(CheckoutFormError::EmptyField { field });
    }
    Ok(sanitized)
}
