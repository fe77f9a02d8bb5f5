use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::money::apply_percent_discount;

/// Domain representation of a shopper's cart.
///
/// Owned by exactly one user; line items reference catalog products and are
/// unique per product. The discount percentage is set by applying a coupon.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Cart {
    /// Unique identifier of the cart.
    pub id: i32,
    /// Owning user identifier.
    pub user_id: i32,
    /// Cart-level discount percentage in `0..=100`, 0 when no coupon applies.
    pub discount_percent: i32,
    /// Line items, ordered by insertion.
    pub items: Vec<CartItem>,
    /// Timestamp for when the cart record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the cart record.
    pub updated_at: NaiveDateTime,
}

/// A cart line item joined with the current catalog state of its product.
///
/// Price and discount reflect the catalog *now*; they are only frozen into a
/// snapshot when an order is placed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CartItem {
    /// Referenced product identifier.
    pub product_id: i32,
    /// Current product name.
    pub name: String,
    /// Current product image.
    pub image_url: Option<String>,
    /// Current undiscounted unit price in cents.
    pub price_cents: i64,
    /// ISO 4217 currency code of the unit price.
    pub currency: String,
    /// Current item-level discount percentage in `0..=100`.
    pub discount_percent: i32,
    /// Units of the product in the cart, always `>= 1`.
    pub quantity: i32,
    /// Units currently available in the catalog.
    pub stock: i32,
    /// Whether the product has been archived since it was added.
    pub is_archived: bool,
}

impl CartItem {
    /// Unit price after the item-level discount, in cents.
    pub fn effective_price_cents(&self) -> i64 {
        apply_percent_discount(self.price_cents, self.discount_percent)
    }

    /// Total for this line in cents: quantity times the discounted unit price,
    /// rounded once per line.
    pub fn line_total_cents(&self) -> i64 {
        apply_percent_discount(
            self.price_cents * i64::from(self.quantity),
            self.discount_percent,
        )
    }
}

/// Aggregate totals computed from a cart, in integer cents.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line-item quantities.
    pub total_items: i64,
    /// Sum of line totals after item-level discounts.
    pub subtotal_cents: i64,
    /// Subtotal after the cart-level discount.
    pub total_cents: i64,
}

impl Cart {
    /// Compute item count, subtotal and total for the cart.
    ///
    /// Item-level and cart-level discounts combine multiplicatively: each
    /// line is discounted by its product's percentage, then the cart
    /// percentage applies to the subtotal.
    pub fn totals(&self) -> CartTotals {
        let total_items = self
            .items
            .iter()
            .map(|item| i64::from(item.quantity))
            .sum();
        let subtotal_cents = self.items.iter().map(CartItem::line_total_cents).sum();
        let total_cents = apply_percent_discount(subtotal_cents, self.discount_percent);

        CartTotals {
            total_items,
            subtotal_cents,
            total_cents,
        }
    }

    /// Returns true when the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i32, price_cents: i64, quantity: i32, discount_percent: i32) -> CartItem {
        CartItem {
            product_id,
            name: format!("product-{product_id}"),
            image_url: None,
            price_cents,
            currency: "USD".to_string(),
            discount_percent,
            quantity,
            stock: 100,
            is_archived: false,
        }
    }

    fn cart(discount_percent: i32, items: Vec<CartItem>) -> Cart {
        let now = chrono::Utc::now().naive_utc();
        Cart {
            id: 1,
            user_id: 1,
            discount_percent,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = cart(10, Vec::new()).totals();

        assert_eq!(totals.total_items, 0);
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.total_cents, 0);
    }

    #[test]
    fn item_count_is_sum_of_quantities() {
        let totals = cart(0, vec![item(1, 100, 2, 0), item(2, 100, 5, 0)]).totals();

        assert_eq!(totals.total_items, 7);
    }

    #[test]
    fn discounts_combine_multiplicatively() {
        // $100 x 2 undiscounted plus $50 x 1 at 10% off, then 10% off the cart:
        // subtotal 245.00, total 220.50.
        let totals = cart(10, vec![item(1, 10_000, 2, 0), item(2, 5_000, 1, 10)]).totals();

        assert_eq!(totals.subtotal_cents, 24_500);
        assert_eq!(totals.total_cents, 22_050);
    }

    #[test]
    fn line_total_discounts_the_whole_line() {
        let line = item(1, 4_999, 3, 10);

        // 4999 * 3 = 14997, minus 10% = 13497.3, rounded half up once.
        assert_eq!(line.line_total_cents(), 13_497);
        assert_eq!(line.effective_price_cents(), 4_499);
    }

    #[test]
    fn cart_discount_applies_to_subtotal() {
        let totals = cart(25, vec![item(1, 1_000, 1, 0)]).totals();

        assert_eq!(totals.subtotal_cents, 1_000);
        assert_eq!(totals.total_cents, 750);
    }
}
