use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::cart::{Cart, CartItem};
use crate::domain::coupon::CouponRejection;
use crate::domain::money::format_cents;
use crate::forms::cart::{
    AddItemForm, ApplyCouponForm, RemoveItemForm, SetQuantityForm, SyncCartForm,
};
use crate::repository::{CartReader, CartWriter, CouponReader, CouponWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// View model returned by all cart endpoints.
#[derive(Debug, Serialize)]
pub struct CartView {
    /// Cart-level discount percentage, 0 when no coupon applies.
    pub discount_percent: i32,
    /// Current line items joined with catalog state.
    pub items: Vec<CartItemView>,
    /// Sum of line-item quantities.
    pub total_items: i64,
    /// Sum of line totals after item-level discounts, in cents.
    pub subtotal_cents: i64,
    /// Subtotal after the cart-level discount, in cents.
    pub total_cents: i64,
    /// Subtotal formatted as a decimal string.
    pub subtotal_formatted: String,
    /// Total formatted as a decimal string.
    pub total_formatted: String,
}

/// View model for a single cart line.
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price_cents: i64,
    pub effective_price_cents: i64,
    pub currency: String,
    pub discount_percent: i32,
    pub quantity: i32,
    pub stock: i32,
    pub is_archived: bool,
    pub line_total_cents: i64,
}

impl From<CartItem> for CartItemView {
    fn from(item: CartItem) -> Self {
        let effective_price_cents = item.effective_price_cents();
        let line_total_cents = item.line_total_cents();

        Self {
            product_id: item.product_id,
            name: item.name,
            image_url: item.image_url,
            price_cents: item.price_cents,
            effective_price_cents,
            currency: item.currency,
            discount_percent: item.discount_percent,
            quantity: item.quantity,
            stock: item.stock,
            is_archived: item.is_archived,
            line_total_cents,
        }
    }
}

impl CartView {
    fn from_cart(cart: Cart) -> Self {
        let totals = cart.totals();

        Self {
            discount_percent: cart.discount_percent,
            items: cart.items.into_iter().map(CartItemView::from).collect(),
            total_items: totals.total_items,
            subtotal_cents: totals.subtotal_cents,
            total_cents: totals.total_cents,
            subtotal_formatted: format_cents(totals.subtotal_cents),
            total_formatted: format_cents(totals.total_cents),
        }
    }

    /// View of a cart that has never been written to.
    fn empty() -> Self {
        Self {
            discount_percent: 0,
            items: Vec::new(),
            total_items: 0,
            subtotal_cents: 0,
            total_cents: 0,
            subtotal_formatted: format_cents(0),
            total_formatted: format_cents(0),
        }
    }
}

/// Totals-only view for clients that poll the cart badge.
#[derive(Debug, Serialize)]
pub struct CartTotalsView {
    pub total_items: i64,
    pub subtotal_cents: i64,
    pub total_cents: i64,
    pub total_formatted: String,
}

/// Loads the caller's cart; a user without a cart row gets an empty view.
pub fn get_cart<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CartView>
where
    R: CartReader + ?Sized,
{
    let cart = repo.get_cart(user.user_id).map_err(ServiceError::from)?;

    Ok(cart.map(CartView::from_cart).unwrap_or_else(CartView::empty))
}

/// Returns the caller's cart totals without the line items.
pub fn get_totals<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CartTotalsView>
where
    R: CartReader + ?Sized,
{
    let view = get_cart(repo, user)?;

    Ok(CartTotalsView {
        total_items: view.total_items,
        subtotal_cents: view.subtotal_cents,
        total_cents: view.total_cents,
        total_formatted: view.total_formatted,
    })
}

/// Adds a product to the caller's cart, incrementing an existing line.
pub fn add_item<R>(repo: &R, user: &AuthenticatedUser, form: AddItemForm) -> ServiceResult<CartView>
where
    R: CartReader + CartWriter + ProductReader + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = repo
        .get_product_by_id(form.product_id)
        .map_err(ServiceError::from)?
        .filter(|product| !product.is_archived)
        .ok_or(ServiceError::NotFound)?;

    let already_in_cart = repo
        .get_cart(user.user_id)
        .map_err(ServiceError::from)?
        .and_then(|cart| {
            cart.items
                .iter()
                .find(|item| item.product_id == form.product_id)
                .map(|item| item.quantity)
        })
        .unwrap_or(0);

    // Widened so an absurd client quantity cannot overflow before the check.
    let requested = i64::from(already_in_cart) + i64::from(form.quantity);
    if requested > i64::from(product.stock) {
        return Err(ServiceError::Conflict(format!(
            "only {} of `{}` in stock",
            product.stock, product.name
        )));
    }

    let cart = repo
        .add_cart_item(user.user_id, form.product_id, form.quantity)
        .map_err(ServiceError::from)?;

    Ok(CartView::from_cart(cart))
}

/// Overwrites a line's quantity; zero or less removes the line.
pub fn set_item_quantity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SetQuantityForm,
) -> ServiceResult<CartView>
where
    R: CartWriter + ProductReader + ?Sized,
{
    if form.quantity > 0 {
        let product = repo
            .get_product_by_id(form.product_id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?;

        if form.quantity > product.stock {
            return Err(ServiceError::Conflict(format!(
                "only {} of `{}` in stock",
                product.stock, product.name
            )));
        }
    }

    let cart = repo
        .set_cart_item_quantity(user.user_id, form.product_id, form.quantity)
        .map_err(ServiceError::from)?;

    Ok(CartView::from_cart(cart))
}

/// Removes a line from the caller's cart.
pub fn remove_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RemoveItemForm,
) -> ServiceResult<CartView>
where
    R: CartWriter + ?Sized,
{
    let cart = repo
        .remove_cart_item(user.user_id, form.product_id)
        .map_err(ServiceError::from)?;

    Ok(CartView::from_cart(cart))
}

/// Applies a coupon code to the caller's cart.
///
/// The cart discount only changes after the redemption is recorded, so a
/// rejected or exhausted coupon leaves the cart untouched.
pub fn apply_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ApplyCouponForm,
) -> ServiceResult<CartView>
where
    R: CartWriter + CouponReader + CouponWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let code = form.code.trim().to_uppercase();

    let coupon = repo
        .get_coupon_by_code(&code)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let now = Utc::now().naive_utc();
    let discount_percent = match coupon.evaluate(now) {
        Ok(discount_percent) => discount_percent,
        Err(rejection) => {
            if rejection == CouponRejection::Expired && coupon.is_active {
                // Lazy cleanup so expired coupons stop matching active
                // listings; the shopper's error does not depend on it.
                if let Err(err) = repo.deactivate_coupon(coupon.id) {
                    log::warn!("Failed to deactivate expired coupon {}: {err}", coupon.id);
                }
            }
            // An exhausted coupon is a usage conflict; an inactive or
            // expired code is a bad request.
            return Err(match rejection {
                CouponRejection::Exhausted => ServiceError::Conflict(rejection.to_string()),
                CouponRejection::Inactive | CouponRejection::Expired => {
                    ServiceError::Form(rejection.to_string())
                }
            });
        }
    };

    let redeemed = repo
        .redeem_coupon(coupon.id, user.user_id)
        .map_err(ServiceError::from)?;

    if !redeemed {
        return Err(ServiceError::Conflict(
            CouponRejection::Exhausted.to_string(),
        ));
    }

    let cart = repo
        .set_cart_discount(user.user_id, discount_percent)
        .map_err(ServiceError::from)?;

    Ok(CartView::from_cart(cart))
}

/// Merges a client-side cart into the caller's server cart.
///
/// Quantities are overwritten rather than added, which makes the operation
/// idempotent; lines only the server knows about are kept.
pub fn sync_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SyncCartForm,
) -> ServiceResult<CartView>
where
    R: CartWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let items: Vec<(i32, i32)> = form
        .items
        .iter()
        .map(|item| (item.product_id, item.quantity))
        .collect();

    let cart = repo
        .sync_cart_items(user.user_id, &items)
        .map_err(ServiceError::from)?;

    Ok(CartView::from_cart(cart))
}

/// Removes every line and resets the discount on the caller's cart.
pub fn empty_cart<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CartView>
where
    R: CartWriter + ?Sized,
{
    match repo.clear_cart(user.user_id) {
        Ok(cart) => Ok(CartView::from_cart(cart)),
        // Clearing a cart that was never created is a no-op.
        Err(crate::repository::errors::RepositoryError::NotFound) => Ok(CartView::empty()),
        Err(err) => Err(err.into()),
    }
}
