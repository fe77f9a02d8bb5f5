use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub stock: i32,
    pub discount_percent: i32,
    pub is_featured: bool,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub price_cents: i64,
    pub currency: &'a str,
    pub stock: i32,
    pub discount_percent: i32,
    pub is_featured: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub category: Option<Option<&'a str>>,
    pub image_url: Option<Option<&'a str>>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub discount_percent: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            category: value.category,
            image_url: value.image_url,
            price_cents: value.price_cents,
            currency: value.currency,
            stock: value.stock,
            discount_percent: value.discount_percent,
            is_featured: value.is_featured,
            is_archived: value.is_archived,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            category: value.category.as_deref(),
            image_url: value.image_url.as_deref(),
            price_cents: value.price_cents,
            currency: value.currency.as_str(),
            stock: value.stock,
            discount_percent: value.discount_percent,
            is_featured: value.is_featured,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value
                .description
                .as_ref()
                .map(|inner| inner.as_ref().map(String::as_str)),
            category: value
                .category
                .as_ref()
                .map(|inner| inner.as_ref().map(String::as_str)),
            image_url: value
                .image_url
                .as_ref()
                .map(|inner| inner.as_ref().map(String::as_str)),
            price_cents: value.price_cents,
            stock: value.stock,
            discount_percent: value.discount_percent,
            is_featured: value.is_featured,
            is_archived: value.is_archived,
            updated_at: value.updated_at,
        }
    }
}
