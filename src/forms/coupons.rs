use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::coupon::NewCoupon;
use crate::forms::sanitize_inline_text;

/// Result type returned by the coupon form helpers.
pub type CouponFormResult<T> = Result<T, CouponFormError>;

/// Errors that can occur while processing coupon forms.
#[derive(Debug, Error)]
pub enum CouponFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided code is empty after sanitization.
    #[error("coupon code cannot be empty")]
    EmptyCode,
}

/// Form payload for creating a coupon.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCouponForm {
    /// Code shoppers will enter, stored uppercase.
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    /// Discount percentage granted by the coupon.
    #[validate(range(min = 1, max = 100))]
    pub discount_percent: i32,
    /// Moment after which the coupon no longer applies.
    pub expires_at: NaiveDateTime,
    /// Maximum number of redemptions allowed.
    #[serde(default = "default_max_usage")]
    #[validate(range(min = 1))]
    pub max_usage: i32,
}

fn default_max_usage() -> i32 {
    1
}

impl AddCouponForm {
    /// Validates and sanitizes the payload into a domain `NewCoupon`.
    pub fn into_new_coupon(self) -> CouponFormResult<NewCoupon> {
        self.validate()?;

        let code = sanitize_inline_text(&self.code).to_uppercase();
        if code.is_empty() {
            return Err(CouponFormError::EmptyCode);
        }

        Ok(NewCoupon::new(code, self.discount_percent, self.expires_at)
            .with_max_usage(self.max_usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn form(code: &str, discount_percent: i32, max_usage: i32) -> AddCouponForm {
        AddCouponForm {
            code: code.to_string(),
            discount_percent,
            expires_at: Utc::now().naive_utc() + Duration::days(30),
            max_usage,
        }
    }

    #[test]
    fn code_is_uppercased() {
        let coupon = form(" save10 ", 10, 5).into_new_coupon().unwrap();

        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.discount_percent, 10);
        assert_eq!(coupon.max_usage, 5);
    }

    #[test]
    fn zero_discount_is_rejected() {
        assert!(form("SAVE0", 0, 1).into_new_coupon().is_err());
    }

    #[test]
    fn zero_max_usage_is_rejected() {
        assert!(form("SAVE10", 10, 0).into_new_coupon().is_err());
    }

    #[test]
    fn whitespace_only_code_is_rejected() {
        assert!(matches!(
            form("  ", 10, 1).into_new_coupon(),
            Err(CouponFormError::EmptyCode)
        ));
    }
}
