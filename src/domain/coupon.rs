use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain representation of a time- and usage-bounded discount code.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Coupon {
    /// Unique identifier of the coupon.
    pub id: i32,
    /// Unique code entered by shoppers.
    pub code: String,
    /// Discount percentage in `0..=100` granted by the coupon.
    pub discount_percent: i32,
    /// Moment after which the coupon no longer applies.
    pub expires_at: NaiveDateTime,
    /// Stored activity flag; an expired coupon is treated as inactive
    /// regardless of this value.
    pub is_active: bool,
    /// Number of successful redemptions so far.
    pub usage_count: i32,
    /// Maximum number of redemptions allowed, always `>= 1`.
    pub max_usage: i32,
    /// Timestamp for when the coupon record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the coupon record.
    pub updated_at: NaiveDateTime,
}

/// Why a coupon cannot be applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CouponRejection {
    /// The usage limit has been reached.
    #[error("coupon usage limit reached")]
    Exhausted,
    /// The coupon was deactivated.
    #[error("coupon is inactive")]
    Inactive,
    /// The expiry timestamp has passed.
    #[error("coupon has expired")]
    Expired,
}

impl Coupon {
    /// Returns true when `now` is past the expiry timestamp.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now > self.expires_at
    }

    /// Validate the coupon against `now` and return its discount percentage.
    ///
    /// Exhaustion is checked before activity and expiry so a used-up coupon
    /// is reported as such even when it is also inactive or expired.
    pub fn evaluate(&self, now: NaiveDateTime) -> Result<i32, CouponRejection> {
        if self.usage_count >= self.max_usage {
            return Err(CouponRejection::Exhausted);
        }
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }
        if self.is_expired(now) {
            return Err(CouponRejection::Expired);
        }
        Ok(self.discount_percent)
    }
}

/// Payload required to insert a new coupon.
#[derive(Debug, Clone)]
pub struct NewCoupon {
    /// Unique code entered by shoppers.
    pub code: String,
    /// Discount percentage in `0..=100`.
    pub discount_percent: i32,
    /// Moment after which the coupon no longer applies.
    pub expires_at: NaiveDateTime,
    /// Maximum number of redemptions allowed.
    pub max_usage: i32,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCoupon {
    /// Build a new coupon payload with the supplied details and current timestamp.
    pub fn new(code: impl Into<String>, discount_percent: i32, expires_at: NaiveDateTime) -> Self {
        Self {
            code: code.into(),
            discount_percent,
            expires_at,
            max_usage: 1,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Allow the coupon to be redeemed up to `max_usage` times.
    pub fn with_max_usage(mut self, max_usage: i32) -> Self {
        self.max_usage = max_usage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn coupon(is_active: bool, expires_in: Duration, usage_count: i32, max_usage: i32) -> Coupon {
        let now = Utc::now().naive_utc();
        Coupon {
            id: 1,
            code: "SAVE10".to_string(),
            discount_percent: 10,
            expires_at: now + expires_in,
            is_active,
            usage_count,
            max_usage,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn valid_coupon_yields_discount() {
        let now = Utc::now().naive_utc();

        assert_eq!(coupon(true, Duration::days(1), 0, 1).evaluate(now), Ok(10));
    }

    #[test]
    fn exhausted_coupon_is_rejected_regardless_of_state() {
        let now = Utc::now().naive_utc();

        // Still active and unexpired, but fully used.
        assert_eq!(
            coupon(true, Duration::days(1), 1, 1).evaluate(now),
            Err(CouponRejection::Exhausted)
        );
        // Also inactive and expired; exhaustion still wins.
        assert_eq!(
            coupon(false, Duration::days(-1), 5, 5).evaluate(now),
            Err(CouponRejection::Exhausted)
        );
    }

    #[test]
    fn expired_coupon_is_rejected_even_when_active() {
        let now = Utc::now().naive_utc();

        assert_eq!(
            coupon(true, Duration::days(-1), 0, 1).evaluate(now),
            Err(CouponRejection::Expired)
        );
    }

    #[test]
    fn inactive_coupon_is_rejected() {
        let now = Utc::now().naive_utc();

        assert_eq!(
            coupon(false, Duration::days(1), 0, 1).evaluate(now),
            Err(CouponRejection::Inactive)
        );
    }
}
