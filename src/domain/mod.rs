pub mod cart;
pub mod coupon;
pub mod money;
pub mod order;
pub mod product;
