use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::cart::{
    AddItemForm, ApplyCouponForm, RemoveItemForm, SetQuantityForm, SyncCartForm,
};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::carts;

#[get("/v1/cart")]
/// Return the caller's cart with computed totals.
pub async fn get_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match carts::get_cart(repo.get_ref(), &user) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to load cart", err),
    }
}

#[get("/v1/cart/totals")]
/// Return the cart totals without the line items.
pub async fn get_totals(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match carts::get_totals(repo.get_ref(), &user) {
        Ok(totals) => HttpResponse::Ok().json(totals),
        Err(err) => error_response("Failed to load cart totals", err),
    }
}

#[post("/v1/cart/items")]
/// Add a product to the cart, incrementing an existing line.
pub async fn add_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddItemForm>,
) -> impl Responder {
    match carts::add_item(repo.get_ref(), &user, form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to add cart item", err),
    }
}

#[post("/v1/cart/items/quantity")]
/// Overwrite a line's quantity; zero or less removes the line.
pub async fn set_item_quantity(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SetQuantityForm>,
) -> impl Responder {
    match carts::set_item_quantity(repo.get_ref(), &user, form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to set cart item quantity", err),
    }
}

#[delete("/v1/cart/items")]
/// Remove a line from the cart.
pub async fn remove_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RemoveItemForm>,
) -> impl Responder {
    match carts::remove_item(repo.get_ref(), &user, form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to remove cart item", err),
    }
}

#[post("/v1/cart/coupon")]
/// Apply a coupon code to the cart.
pub async fn apply_coupon(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ApplyCouponForm>,
) -> impl Responder {
    match carts::apply_coupon(repo.get_ref(), &user, form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(serde_json::json!({
            "message": "coupon applied",
            "discount_percent": view.discount_percent,
            "cart": view,
        })),
        Err(err) => error_response("Failed to apply coupon", err),
    }
}

#[post("/v1/cart/sync")]
/// Merge a client-side cart into the server cart.
pub async fn sync_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SyncCartForm>,
) -> impl Responder {
    match carts::sync_cart(repo.get_ref(), &user, form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to sync cart", err),
    }
}

#[delete("/v1/cart")]
/// Remove every line and reset the discount.
pub async fn empty_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match carts::empty_cart(repo.get_ref(), &user) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to empty cart", err),
    }
}
