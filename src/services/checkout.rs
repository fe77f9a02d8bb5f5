use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::domain::money::format_cents;
use crate::domain::order::{NewOrder, Order, OrderItem, OrderStatus, PaymentStatus};
use crate::forms::checkout::CheckoutForm;
use crate::notification::Notifier;
use crate::payment::{ChargeRequest, PaymentError, PaymentProcessor};
use crate::repository::{CartReader, CartWriter, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Places an order from the caller's cart.
///
/// The sequencing is what keeps money safe: availability is rechecked and the
/// totals frozen before the gateway is asked for money, and nothing is
/// persisted until the charge succeeds. Clearing the cart and sending the
/// confirmation email happen after the order exists and are allowed to fail
/// without affecting it.
pub fn place_order<R>(
    repo: &R,
    gateway: &dyn PaymentProcessor,
    notifier: &dyn Notifier,
    user: &AuthenticatedUser,
    form: CheckoutForm,
) -> ServiceResult<Order>
where
    R: CartReader + CartWriter + OrderWriter + ?Sized,
{
    let request = form
        .into_checkout_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let cart = repo
        .get_cart(user.user_id)
        .map_err(ServiceError::from)?
        .filter(|cart| !cart.is_empty())
        .ok_or_else(|| ServiceError::Form("cart is empty".to_string()))?;

    for item in &cart.items {
        if item.is_archived {
            return Err(ServiceError::Conflict(format!(
                "`{}` is no longer available",
                item.name
            )));
        }
        if item.quantity > item.stock {
            return Err(ServiceError::Conflict(format!(
                "only {} of `{}` in stock",
                item.stock, item.name
            )));
        }
    }

    let totals = cart.totals();
    let currency = cart
        .items
        .first()
        .map(|item| item.currency.clone())
        .unwrap_or_else(|| "USD".to_string());

    let receipt = gateway
        .charge(&ChargeRequest {
            amount_cents: totals.total_cents,
            currency: &currency,
            method: request.payment_method,
            nonce: request.payment_nonce.as_deref(),
        })
        .map_err(|err| match err {
            PaymentError::Declined(reason) => ServiceError::Payment(reason),
            PaymentError::Unavailable(reason) => {
                log::error!("Payment gateway unavailable: {reason}");
                ServiceError::Gateway
            }
        })?;

    // Line prices are frozen as the effective unit price at this moment;
    // later catalog edits never change a placed order.
    let items: Vec<OrderItem> = cart
        .items
        .iter()
        .map(|item| OrderItem {
            product_id: Some(item.product_id),
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            price_cents: item.effective_price_cents(),
            currency: item.currency.clone(),
            quantity: item.quantity,
        })
        .collect();

    let new_order = NewOrder {
        user_id: user.user_id,
        full_name: request.full_name,
        email: request.email,
        phone: request.phone,
        address: request.address,
        city: request.city,
        state: request.state,
        zip: request.zip,
        country: request.country,
        payment_method: request.payment_method,
        payment_status: PaymentStatus::Paid,
        status: OrderStatus::Processing,
        payment_ref: Some(receipt.transaction_id),
        notes: request.notes,
        total_cents: totals.total_cents,
        currency,
        items,
        updated_at: Utc::now().naive_utc(),
    };

    let order = repo.create_order(&new_order).map_err(ServiceError::from)?;

    if let Err(err) = repo.clear_cart(user.user_id) {
        log::error!(
            "Failed to clear cart for user {} after order {}: {err}",
            user.user_id,
            order.id
        );
    }

    let subject = format!("Order #{} confirmed", order.id);
    let body = format!(
        "Thank you for your order!\n\nOrder #{} for {} {} is being processed.",
        order.id,
        format_cents(order.total_cents),
        order.currency
    );
    if let Err(err) = notifier.send(&order.email, &subject, &body) {
        log::warn!("Failed to send confirmation for order {}: {err}", order.id);
    }

    Ok(order)
}
