use actix_web::{HttpResponse, Responder, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::checkout::CheckoutForm;
use crate::notification::Notifier;
use crate::payment::PaymentProcessor;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::checkout;

#[post("/v1/checkout")]
/// Place an order from the caller's cart.
pub async fn place_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    gateway: web::Data<dyn PaymentProcessor>,
    notifier: web::Data<dyn Notifier>,
    form: web::Json<CheckoutForm>,
) -> impl Responder {
    match checkout::place_order(
        repo.get_ref(),
        gateway.get_ref(),
        notifier.get_ref(),
        &user,
        form.into_inner(),
    ) {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => error_response("Failed to place order", err),
    }
}
