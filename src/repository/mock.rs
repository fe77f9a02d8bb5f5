use mockall::mock;

use super::{
    CartReader, CartWriter, CouponReader, CouponWriter, OrderReader, OrderWriter, ProductReader,
    ProductWriter, RepositoryResult,
};
use crate::domain::{
    cart::Cart,
    coupon::{Coupon, NewCoupon},
    order::{NewOrder, Order, OrderListQuery, UpdateOrder},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn archive_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CouponWriter {}

    impl CouponWriter for CouponWriter {
        fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon>;
        fn deactivate_coupon(&self, coupon_id: i32) -> RepositoryResult<()>;
        fn redeem_coupon(&self, coupon_id: i32, user_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order(&self, order_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
    }
}

// Cart and checkout services bind several repository traits at once, so a
// single mock implements the whole surface.
mock! {
    pub StorefrontRepository {}

    impl CartReader for StorefrontRepository {
        fn get_cart(&self, user_id: i32) -> RepositoryResult<Option<Cart>>;
    }

    impl CartWriter for StorefrontRepository {
        fn add_cart_item(&self, user_id: i32, product_id: i32, quantity: i32) -> RepositoryResult<Cart>;
        fn set_cart_item_quantity(&self, user_id: i32, product_id: i32, quantity: i32) -> RepositoryResult<Cart>;
        fn remove_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<Cart>;
        fn set_cart_discount(&self, user_id: i32, discount_percent: i32) -> RepositoryResult<Cart>;
        fn sync_cart_items(&self, user_id: i32, items: &[(i32, i32)]) -> RepositoryResult<Cart>;
        fn clear_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
    }

    impl CouponReader for StorefrontRepository {
        fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<Coupon>>;
    }

    impl CouponWriter for StorefrontRepository {
        fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon>;
        fn deactivate_coupon(&self, coupon_id: i32) -> RepositoryResult<()>;
        fn redeem_coupon(&self, coupon_id: i32, user_id: i32) -> RepositoryResult<bool>;
    }

    impl ProductReader for StorefrontRepository {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl OrderReader for StorefrontRepository {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderWriter for StorefrontRepository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order(&self, order_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
    }
}
