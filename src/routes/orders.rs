use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::orders::UpdateOrderStatusForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::orders;

#[get("/v1/orders")]
/// Return the caller's order history, newest first.
pub async fn list_orders(
    params: web::Query<orders::OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::list_orders(repo.get_ref(), &user, params.0) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response("Failed to list orders", err),
    }
}

#[get("/v1/orders/{order_id}")]
/// Return a single order; callers only see their own.
pub async fn get_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::get_order(repo.get_ref(), &user, path.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("Failed to load order", err),
    }
}

#[post("/v1/orders/{order_id}/status")]
/// Move an order to a new lifecycle status.
///
/// Users without the role stored in `crate::SERVICE_ACCESS_ROLE` receive a
/// `401 Unauthorized` response.
pub async fn update_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateOrderStatusForm>,
) -> impl Responder {
    match orders::update_status(repo.get_ref(), &user, path.into_inner(), form.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("Failed to update order status", err),
    }
}
