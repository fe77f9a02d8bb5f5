use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderItem as DomainOrderItem,
    UpdateOrder as DomainUpdateOrder,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub payment_ref: Option<String>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub total_cents: i64,
    pub currency: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub name: String,
    pub image_url: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
    pub country: &'a str,
    pub payment_method: &'static str,
    pub payment_status: &'static str,
    pub status: &'static str,
    pub payment_ref: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub total_cents: i64,
    pub currency: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub name: &'a str,
    pub image_url: Option<&'a str>,
    pub price_cents: i64,
    pub currency: &'a str,
    pub quantity: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrder<'a> {
    pub status: Option<&'static str>,
    pub payment_status: Option<&'static str>,
    pub tracking_number: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            user_id: self.user_id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country: self.country,
            payment_method: self.payment_method.as_str().into(),
            payment_status: self.payment_status.as_str().into(),
            status: self.status.as_str().into(),
            payment_ref: self.payment_ref,
            tracking_number: self.tracking_number,
            notes: self.notes,
            total_cents: self.total_cents,
            currency: self.currency,
            items: items.into_iter().map(OrderItem::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl OrderItem {
    pub fn into_domain(self) -> DomainOrderItem {
        DomainOrderItem {
            product_id: self.product_id,
            name: self.name,
            image_url: self.image_url,
            price_cents: self.price_cents,
            currency: self.currency,
            quantity: self.quantity,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            user_id: value.user_id,
            full_name: value.full_name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_deref(),
            address: value.address.as_str(),
            city: value.city.as_str(),
            state: value.state.as_str(),
            zip: value.zip.as_str(),
            country: value.country.as_str(),
            payment_method: value.payment_method.into(),
            payment_status: value.payment_status.into(),
            status: value.status.into(),
            payment_ref: value.payment_ref.as_deref(),
            notes: value.notes.as_deref(),
            total_cents: value.total_cents,
            currency: value.currency.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewOrderItem<'a> {
    pub fn from_domain(order_id: i32, value: &'a DomainOrderItem) -> Self {
        Self {
            order_id,
            product_id: value.product_id,
            name: value.name.as_str(),
            image_url: value.image_url.as_deref(),
            price_cents: value.price_cents,
            currency: value.currency.as_str(),
            quantity: value.quantity,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl<'a> From<&'a DomainUpdateOrder> for UpdateOrder<'a> {
    fn from(value: &'a DomainUpdateOrder) -> Self {
        Self {
            status: value.status.map(|status| status.into()),
            payment_status: value.payment_status.map(|status| status.into()),
            tracking_number: value.tracking_number.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
