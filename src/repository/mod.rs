use crate::db::{DbConnection, DbPool};
use crate::domain::cart::Cart;
use crate::domain::coupon::{Coupon, NewCoupon};
use crate::domain::order::{NewOrder, Order, OrderListQuery, UpdateOrder};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};

pub mod cart;
pub mod coupon;
pub mod errors;
pub mod order;
pub mod product;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over catalog products.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over catalog products.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    /// Soft-deletes the product; archived products are filtered out of
    /// listings unless explicitly requested.
    fn archive_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over shopper carts.
pub trait CartReader {
    /// Fetch the user's cart with line items joined to their products.
    fn get_cart(&self, user_id: i32) -> RepositoryResult<Option<Cart>>;
}

/// Write operations over shopper carts.
///
/// Every method is atomic with respect to concurrent calls for the same
/// user: line-item changes go through single-statement upserts or scoped
/// updates, never a read-modify-write cycle.
pub trait CartWriter {
    /// Add `quantity` of a product, creating the cart lazily and
    /// incrementing the existing line when the product is already present.
    fn add_cart_item(&self, user_id: i32, product_id: i32, quantity: i32)
    -> RepositoryResult<Cart>;
    /// Overwrite a line's quantity; `quantity <= 0` removes the line.
    fn set_cart_item_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> RepositoryResult<Cart>;
    /// Delete a line item.
    fn remove_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<Cart>;
    /// Store the discount granted by an applied coupon, creating the cart
    /// lazily when the shopper has none yet.
    fn set_cart_discount(&self, user_id: i32, discount_percent: i32) -> RepositoryResult<Cart>;
    /// Last-write-wins merge of a client cart snapshot: named products get
    /// the client quantity, everything else is left untouched.
    fn sync_cart_items(&self, user_id: i32, items: &[(i32, i32)]) -> RepositoryResult<Cart>;
    /// Remove all line items and reset the discount, keeping the cart row.
    fn clear_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
}

/// Read-only operations over coupons.
pub trait CouponReader {
    fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<Coupon>>;
}

/// Write operations over coupons.
pub trait CouponWriter {
    fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon>;
    /// Lazily flips `is_active` off, used when an expired coupon is seen.
    fn deactivate_coupon(&self, coupon_id: i32) -> RepositoryResult<()>;
    /// Atomically consume one use of the coupon and append a usage-history
    /// record. Returns `false` when the usage limit was already reached, so
    /// `usage_count` can never exceed `max_usage` under concurrency.
    fn redeem_coupon(&self, coupon_id: i32, user_id: i32) -> RepositoryResult<bool>;
}

/// Read-only operations over orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over orders.
pub trait OrderWriter {
    /// Persist an order with its item snapshot and decrement stock for the
    /// referenced products, all in one transaction.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order(&self, order_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
}
