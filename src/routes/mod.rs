use actix_web::HttpResponse;
use serde::Serialize;

use crate::services::ServiceError;

pub mod cart;
pub mod checkout;
pub mod coupons;
pub mod orders;
pub mod products;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

fn error_body(code: &str, message: impl Into<String>) -> ErrorBody<'_> {
    ErrorBody {
        code,
        message: message.into(),
    }
}

/// Maps a service error to an HTTP response.
///
/// Internal failures are logged with `context` and answered with a generic
/// message so database details never leak to clients.
pub(crate) fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(error_body("unauthorized", "unauthorized"))
        }
        ServiceError::Form(message) => {
            HttpResponse::BadRequest().json(error_body("invalid_request", message))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(error_body("not_found", "not found"))
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(error_body("conflict", message))
        }
        ServiceError::Payment(message) => {
            HttpResponse::PaymentRequired().json(error_body("payment_declined", message))
        }
        ServiceError::Gateway => HttpResponse::BadGateway()
            .json(error_body("gateway_unavailable", "payment gateway unavailable")),
        ServiceError::Internal(details) => {
            log::error!("{context}: {details}");
            HttpResponse::InternalServerError().json(error_body("internal", "internal error"))
        }
    }
}
