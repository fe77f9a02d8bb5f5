use actix_web::{HttpResponse, Responder, delete, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::coupons::AddCouponForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::coupons;

#[post("/v1/coupons")]
/// Create a coupon.
///
/// Users without the role stored in `crate::SERVICE_ACCESS_ROLE` receive a
/// `401 Unauthorized` response.
pub async fn create_coupon(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCouponForm>,
) -> impl Responder {
    match coupons::create_coupon(repo.get_ref(), &user, form.into_inner()) {
        Ok(coupon) => HttpResponse::Created().json(coupon),
        Err(err) => error_response("Failed to create coupon", err),
    }
}

#[delete("/v1/coupons/{coupon_id}")]
/// Deactivate a coupon so it can no longer be applied.
pub async fn deactivate_coupon(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match coupons::deactivate_coupon(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response("Failed to deactivate coupon", err),
    }
}
