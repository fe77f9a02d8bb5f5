use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::{Cart as DomainCart, CartItem as DomainCartItem};
use crate::models::product::Product;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::carts)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub discount_percent: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(belongs_to(Cart, foreign_key = cart_id))]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::carts)]
pub struct NewCart {
    pub user_id: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem {
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub updated_at: NaiveDateTime,
}

impl Cart {
    /// Combine the cart row with its line items joined to their products.
    pub fn into_domain(self, items: Vec<(CartItem, Product)>) -> DomainCart {
        DomainCart {
            id: self.id,
            user_id: self.user_id,
            discount_percent: self.discount_percent,
            items: items
                .into_iter()
                .map(|(item, product)| DomainCartItem {
                    product_id: item.product_id,
                    name: product.name,
                    image_url: product.image_url,
                    price_cents: product.price_cents,
                    currency: product.currency,
                    discount_percent: product.discount_percent,
                    quantity: item.quantity,
                    stock: product.stock,
                    is_archived: product.is_archived,
                })
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
