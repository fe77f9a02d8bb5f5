use serde::Deserialize;
use validator::Validate;

fn default_quantity() -> i32 {
    1
}

/// Payload for adding a product to the cart.
#[derive(Debug, Deserialize, Validate)]
pub struct AddItemForm {
    /// Catalog product to add.
    pub product_id: i32,
    /// Units to add, defaults to one.
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub quantity: i32,
}

/// Payload for overwriting a line item's quantity.
///
/// No lower bound on the quantity: zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct SetQuantityForm {
    /// Product whose line is updated.
    pub product_id: i32,
    /// New quantity for the line.
    pub quantity: i32,
}

/// Payload for removing a line item from the cart.
#[derive(Debug, Deserialize)]
pub struct RemoveItemForm {
    /// Product whose line is removed.
    pub product_id: i32,
}

/// Payload for applying a coupon code to the cart.
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyCouponForm {
    /// Coupon code entered by the shopper.
    #[validate(length(min = 1, max = 64))]
    pub code: String,
}

/// One client-side cart line submitted during a sync.
#[derive(Debug, Deserialize, Validate)]
pub struct SyncItemForm {
    /// Catalog product referenced by the client line.
    pub product_id: i32,
    /// Client-side quantity for the line.
    #[validate(range(min = 1, max = 1_000_000))]
    pub quantity: i32,
}

/// Payload for merging a client-side cart into the server cart.
#[derive(Debug, Deserialize, Validate)]
pub struct SyncCartForm {
    /// Client-side cart lines.
    #[validate(nested)]
    pub items: Vec<SyncItemForm>,
}
