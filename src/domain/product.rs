use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to shoppers.
    pub description: Option<String>,
    /// Optional category used for browsing and search.
    pub category: Option<String>,
    /// Optional image shown in listings and the cart.
    pub image_url: Option<String>,
    /// Unit price in the smallest currency unit (cents).
    pub price_cents: i64,
    /// ISO 4217 currency code associated with the price.
    pub currency: String,
    /// Units currently available for sale.
    pub stock: i32,
    /// Item-level discount percentage in `0..=100`.
    pub discount_percent: i32,
    /// Whether the product is highlighted on the storefront.
    pub is_featured: bool,
    /// Soft-delete flag; archived products are excluded from listings
    /// unless a query explicitly asks for them.
    pub is_archived: bool,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Unit price after the item-level discount, in cents.
    pub fn effective_price_cents(&self) -> i64 {
        crate::domain::money::apply_percent_discount(self.price_cents, self.discount_percent)
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to shoppers.
    pub description: Option<String>,
    /// Optional category used for browsing and search.
    pub category: Option<String>,
    /// Optional image shown in listings and the cart.
    pub image_url: Option<String>,
    /// Unit price in cents.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Units available for sale.
    pub stock: i32,
    /// Item-level discount percentage in `0..=100`.
    pub discount_percent: i32,
    /// Whether the product is highlighted on the storefront.
    pub is_featured: bool,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(name: impl Into<String>, price_cents: i64, currency: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: None,
            image_url: None,
            price_cents,
            currency: currency.into(),
            stock: 0,
            discount_percent: 0,
            is_featured: false,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Attach a descriptive text to the payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a category to the payload.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach an image URL to the payload.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Set the initial stock level.
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the item-level discount percentage.
    pub fn with_discount_percent(mut self, discount_percent: i32) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    /// Mark the product as featured.
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional description update, `None` inside clears the value.
    pub description: Option<Option<String>>,
    /// Optional category update, `None` inside clears the value.
    pub category: Option<Option<String>>,
    /// Optional image update, `None` inside clears the value.
    pub image_url: Option<Option<String>>,
    /// Optional price update in cents.
    pub price_cents: Option<i64>,
    /// Optional stock update.
    pub stock: Option<i32>,
    /// Optional discount percentage update.
    pub discount_percent: Option<i32>,
    /// Optional featured flag update.
    pub is_featured: Option<bool>,
    /// Whether the product should be archived or restored.
    pub is_archived: Option<bool>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            category: None,
            image_url: None,
            price_cents: None,
            stock: None,
            discount_percent: None,
            is_featured: None,
            is_archived: None,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    /// Update the category, using `None` to clear an existing value.
    pub fn category(mut self, category: Option<impl Into<String>>) -> Self {
        self.category = Some(category.map(|value| value.into()));
        self
    }

    /// Update the image URL, using `None` to clear an existing value.
    pub fn image_url(mut self, image_url: Option<impl Into<String>>) -> Self {
        self.image_url = Some(image_url.map(|value| value.into()));
        self
    }

    /// Update the unit price.
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Update the stock level.
    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Update the item-level discount percentage.
    pub fn discount_percent(mut self, discount_percent: i32) -> Self {
        self.discount_percent = Some(discount_percent);
        self
    }

    /// Update the featured flag.
    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    /// Archive or restore the product.
    pub fn archived(mut self, is_archived: bool) -> Self {
        self.is_archived = Some(is_archived);
        self
    }
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Optional name/description/category search term.
    pub search: Option<String>,
    /// Optional exact category filter.
    pub category: Option<String>,
    /// Restrict the results to featured products.
    pub featured_only: bool,
    /// Whether archived products should be included in the results.
    pub include_archived: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListQuery {
    /// Construct a query that targets all live products.
    pub fn new() -> Self {
        Self {
            search: None,
            category: None,
            featured_only: false,
            include_archived: false,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to name, description or category.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter the results by an exact category match.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict the results to featured products.
    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Include archived products in the results.
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
