use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 128;

/// ISO 4217 currency codes are three ASCII alphabetic characters.
const CURRENCY_CODE_LEN: u64 = 3;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided currency code is invalid.
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
}

/// Form payload for creating a catalog product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the operator.
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional category used for browsing and search.
    pub category: Option<String>,
    /// Optional image shown in listings.
    pub image_url: Option<String>,
    /// Unit price in cents.
    #[validate(range(min = 0))]
    pub price_cents: i64,
    /// ISO 4217 currency code (e.g. `USD`).
    #[validate(length(equal = CURRENCY_CODE_LEN))]
    pub currency: String,
    /// Initial stock level.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    /// Item-level discount percentage.
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: i32,
    /// Whether the product is highlighted on the storefront.
    #[serde(default)]
    pub is_featured: bool,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let currency = sanitize_currency(&self.currency)?;

        let mut new_product = NewProduct::new(name, self.price_cents, currency)
            .with_stock(self.stock)
            .with_discount_percent(self.discount_percent);

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_description(description);
        }

        if let Some(category) = self
            .category
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_category(category);
        }

        if let Some(image_url) = self
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_image_url(image_url);
        }

        if self.is_featured {
            new_product = new_product.featured();
        }

        Ok(new_product)
    }
}

/// Form payload for patching an existing catalog product.
///
/// Absent fields keep their current values; a present-but-empty string clears
/// an optional text field.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductForm {
    /// Optional name update.
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional category update.
    pub category: Option<String>,
    /// Optional image update.
    pub image_url: Option<String>,
    /// Optional price update in cents.
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    /// Optional stock update.
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    /// Optional discount percentage update.
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: Option<i32>,
    /// Optional featured flag update.
    pub is_featured: Option<bool>,
    /// Optional archive flag update; restoring an archived product goes
    /// through here.
    pub is_archived: Option<bool>,
}

impl UpdateProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(ref name) = self.name {
            let sanitized = sanitize_inline_text(name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(ref description) = self.description {
            let sanitized = sanitize_multiline_text(description);
            updates = updates.description((!sanitized.is_empty()).then_some(sanitized));
        }

        if let Some(ref category) = self.category {
            let sanitized = sanitize_inline_text(category);
            updates = updates.category((!sanitized.is_empty()).then_some(sanitized));
        }

        if let Some(ref image_url) = self.image_url {
            let trimmed = image_url.trim().to_string();
            updates = updates.image_url((!trimmed.is_empty()).then_some(trimmed));
        }

        if let Some(price_cents) = self.price_cents {
            updates = updates.price_cents(price_cents);
        }

        if let Some(stock) = self.stock {
            updates = updates.stock(stock);
        }

        if let Some(discount_percent) = self.discount_percent {
            updates = updates.discount_percent(discount_percent);
        }

        if let Some(is_featured) = self.is_featured {
            updates = updates.featured(is_featured);
        }

        if let Some(is_archived) = self.is_archived {
            updates = updates.archived(is_archived);
        }

        Ok(updates)
    }
}

fn sanitize_currency(value: &str) -> ProductFormResult<String> {
    let trimmed = value.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ProductFormError::InvalidCurrency {
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_sanitizes_fields() {
        let form = AddProductForm {
            name: "  Espresso   Beans ".to_string(),
            description: Some("  Dark roast.  ".to_string()),
            category: Some(" coffee ".to_string()),
            image_url: Some(" /img/beans.png ".to_string()),
            price_cents: 1_299,
            currency: "usd".to_string(),
            stock: 10,
            discount_percent: 5,
            is_featured: true,
        };

        let product = form.into_new_product().unwrap();

        assert_eq!(product.name, "Espresso Beans");
        assert_eq!(product.description.as_deref(), Some("Dark roast."));
        assert_eq!(product.category.as_deref(), Some("coffee"));
        assert_eq!(product.currency, "USD");
        assert_eq!(product.stock, 10);
        assert_eq!(product.discount_percent, 5);
        assert!(product.is_featured);
    }

    #[test]
    fn add_form_rejects_invalid_currency() {
        let form = AddProductForm {
            name: "Widget".to_string(),
            description: None,
            category: None,
            image_url: None,
            price_cents: 100,
            currency: "US1".to_string(),
            stock: 0,
            discount_percent: 0,
            is_featured: false,
        };

        assert!(matches!(
            form.into_new_product(),
            Err(ProductFormError::InvalidCurrency { .. })
        ));
    }

    #[test]
    fn add_form_rejects_out_of_range_discount() {
        let form = AddProductForm {
            name: "Widget".to_string(),
            description: None,
            category: None,
            image_url: None,
            price_cents: 100,
            currency: "USD".to_string(),
            stock: 0,
            discount_percent: 101,
            is_featured: false,
        };

        assert!(matches!(
            form.into_new_product(),
            Err(ProductFormError::Validation(_))
        ));
    }

    #[test]
    fn update_form_clears_description_with_empty_string() {
        let form = UpdateProductForm {
            name: None,
            description: Some("   ".to_string()),
            category: None,
            image_url: None,
            price_cents: None,
            stock: None,
            discount_percent: None,
            is_featured: None,
            is_archived: None,
        };

        let updates = form.into_update_product().unwrap();

        assert_eq!(updates.description, Some(None));
        assert!(updates.name.is_none());
        assert!(updates.price_cents.is_none());
    }

    #[test]
    fn update_form_passes_through_scalar_fields() {
        let form = UpdateProductForm {
            name: Some("New Name".to_string()),
            description: None,
            category: None,
            image_url: None,
            price_cents: Some(2_500),
            stock: Some(3),
            discount_percent: Some(15),
            is_featured: Some(false),
            is_archived: Some(true),
        };

        let updates = form.into_update_product().unwrap();

        assert_eq!(updates.name.as_deref(), Some("New Name"));
        assert_eq!(updates.price_cents, Some(2_500));
        assert_eq!(updates.stock, Some(3));
        assert_eq!(updates.discount_percent, Some(15));
        assert_eq!(updates.is_featured, Some(false));
        assert_eq!(updates.is_archived, Some(true));
    }
}
