use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{AddProductForm, UpdateProductForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the catalog listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string matched against name, description and category.
    pub search: Option<String>,
    /// Optional exact category filter.
    pub category: Option<String>,
    /// Restrict the listing to featured products.
    #[serde(default)]
    pub featured: bool,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// Loads a page of the public catalog. Archived products never appear here.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery {
        search,
        category,
        featured,
        page,
    } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref() {
        list_query = list_query.search(search_term);
    }

    if let Some(category_value) = category.as_ref() {
        list_query = list_query.category(category_value);
    }

    if featured {
        list_query = list_query.featured_only();
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(items, page, total_pages))
}

/// Loads a single live product; archived products are reported as missing.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .filter(|product| !product.is_archived)
        .ok_or(ServiceError::NotFound)
}

/// Creates a new catalog product.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_product(&payload).map_err(ServiceError::from)
}

/// Patches an existing catalog product.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: UpdateProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

/// Archives a catalog product, removing it from listings and carts at
/// checkout time while keeping its order history intact.
pub fn archive_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.archive_product(product_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Utc};

    use crate::repository::mock::{MockProductReader, MockProductWriter};

    fn datetime() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn product(id: i32, name: &str, is_archived: bool) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            category: None,
            image_url: None,
            price_cents: 1_000,
            currency: "USD".to_string(),
            stock: 10,
            discount_percent: 0,
            is_featured: false,
            is_archived,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            user_id: 1,
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn shopper() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "7".to_string(),
            user_id: 7,
            email: "shopper@example.com".to_string(),
            name: "Shopper".to_string(),
            roles: Vec::new(),
            exp: 0,
        }
    }

    #[test]
    fn list_products_builds_query_from_params() {
        let mut repo = MockProductReader::new();
        repo.expect_list_products()
            .times(1)
            .withf(|query| {
                assert_eq!(query.search.as_deref(), Some("coffee"));
                assert_eq!(query.category.as_deref(), Some("beans"));
                assert!(query.featured_only);
                assert!(!query.include_archived);
                match &query.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 2);
                        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((26, vec![product(1, "Coffee", false)])));

        let page = list_products(
            &repo,
            ProductsQuery {
                search: Some("coffee".to_string()),
                category: Some("beans".to_string()),
                featured: true,
                page: Some(2),
            },
        )
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn get_product_hides_archived_products() {
        let mut repo = MockProductReader::new();
        repo.expect_get_product_by_id()
            .returning(|id| Ok(Some(product(id, "Old", true))));

        let result = get_product(&repo, 3);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_product_requires_role() {
        let repo = MockProductWriter::new();

        let form = AddProductForm {
            name: "Widget".to_string(),
            description: None,
            category: None,
            image_url: None,
            price_cents: 100,
            currency: "USD".to_string(),
            stock: 0,
            discount_percent: 0,
            is_featured: false,
        };

        let result = create_product(&repo, &shopper(), form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_product_persists_sanitized_payload() {
        let mut repo = MockProductWriter::new();
        repo.expect_create_product()
            .times(1)
            .withf(|new_product| {
                assert_eq!(new_product.name, "Widget");
                assert_eq!(new_product.currency, "USD");
                true
            })
            .returning(|new_product| {
                let mut created = product(101, &new_product.name, false);
                created.currency = new_product.currency.clone();
                Ok(created)
            });

        let form = AddProductForm {
            name: " Widget ".to_string(),
            description: None,
            category: None,
            image_url: None,
            price_cents: 100,
            currency: "usd".to_string(),
            stock: 5,
            discount_percent: 0,
            is_featured: false,
        };

        let created = create_product(&repo, &admin(), form).unwrap();

        assert_eq!(created.id, 101);
    }

    #[test]
    fn archive_product_maps_missing_rows() {
        let mut repo = MockProductWriter::new();
        repo.expect_archive_product()
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        let result = archive_product(&repo, &admin(), 404);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
