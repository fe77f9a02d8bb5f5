use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::coupon::Coupon;
use crate::forms::coupons::AddCouponForm;
use crate::repository::CouponWriter;
use crate::services::{ServiceError, ServiceResult};

/// Creates a new coupon. Duplicate codes are rejected by the unique index.
pub fn create_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCouponForm,
) -> ServiceResult<Coupon>
where
    R: CouponWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_new_coupon()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_coupon(&payload).map_err(ServiceError::from)
}

/// Deactivates a coupon so it can no longer be applied.
pub fn deactivate_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    coupon_id: i32,
) -> ServiceResult<()>
where
    R: CouponWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.deactivate_coupon(coupon_id)
        .map_err(ServiceError::from)
}
