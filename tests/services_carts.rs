use chrono::{Duration, Utc};

use storefront::auth::AuthenticatedUser;
use storefront::domain::coupon::NewCoupon;
use storefront::domain::product::NewProduct;
use storefront::forms::cart::{AddItemForm, ApplyCouponForm, SetQuantityForm, SyncCartForm, SyncItemForm};
use storefront::repository::{CouponReader, CouponWriter, DieselRepository, ProductWriter};
use storefront::services::carts;
use storefront::services::ServiceError;

mod common;

fn shopper(user_id: i32) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: user_id.to_string(),
        user_id,
        email: "shopper@example.com".to_string(),
        name: "Shopper".to_string(),
        roles: Vec::new(),
        exp: 0,
    }
}

#[test]
fn service_cart_totals_combine_discounts() {
    let test_db = common::TestDb::new("service_cart_totals_combine_discounts.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = shopper(7);

    let full_price = repo
        .create_product(&NewProduct::new("Full Price", 10_000, "USD").with_stock(5))
        .unwrap();
    let discounted = repo
        .create_product(
            &NewProduct::new("Discounted", 5_000, "USD")
                .with_stock(5)
                .with_discount_percent(10),
        )
        .unwrap();
    let expires_at = Utc::now().naive_utc() + Duration::days(30);
    repo.create_coupon(&NewCoupon::new("SAVE10", 10, expires_at).with_max_usage(10))
        .unwrap();

    carts::add_item(
        &repo,
        &user,
        AddItemForm {
            product_id: full_price.id,
            quantity: 2,
        },
    )
    .unwrap();
    carts::add_item(
        &repo,
        &user,
        AddItemForm {
            product_id: discounted.id,
            quantity: 1,
        },
    )
    .unwrap();

    let view = carts::apply_coupon(
        &repo,
        &user,
        ApplyCouponForm {
            code: "save10".to_string(),
        },
    )
    .unwrap();

    assert_eq!(view.discount_percent, 10);
    assert_eq!(view.total_items, 3);
    assert_eq!(view.subtotal_cents, 24_500);
    assert_eq!(view.total_cents, 22_050);
    assert_eq!(view.total_formatted, "220.50");

    let reloaded = repo.get_coupon_by_code("SAVE10").unwrap().unwrap();
    assert_eq!(reloaded.usage_count, 1);
}

#[test]
fn service_add_item_unknown_product_is_not_found() {
    let test_db = common::TestDb::new("service_add_item_unknown_product.db");
    let repo = DieselRepository::new(test_db.pool());

    let result = carts::add_item(
        &repo,
        &shopper(7),
        AddItemForm {
            product_id: 9_999,
            quantity: 1,
        },
    );

    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[test]
fn service_add_item_beyond_stock_is_a_conflict() {
    let test_db = common::TestDb::new("service_add_item_beyond_stock.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = shopper(7);

    let product = repo
        .create_product(&NewProduct::new("Scarce", 1_000, "USD").with_stock(3))
        .unwrap();

    carts::add_item(
        &repo,
        &user,
        AddItemForm {
            product_id: product.id,
            quantity: 2,
        },
    )
    .unwrap();

    // 2 already in the cart; 2 more would exceed the 3 in stock.
    let result = carts::add_item(
        &repo,
        &user,
        AddItemForm {
            product_id: product.id,
            quantity: 2,
        },
    );

    assert!(matches!(result, Err(ServiceError::Conflict(_))));

    let view = carts::get_cart(&repo, &user).unwrap();
    assert_eq!(view.total_items, 2);
}

#[test]
fn service_expired_coupon_is_rejected_and_deactivated() {
    let test_db = common::TestDb::new("service_expired_coupon_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = shopper(7);

    let product = repo
        .create_product(&NewProduct::new("Mug", 800, "USD").with_stock(5))
        .unwrap();
    let expired_at = Utc::now().naive_utc() - Duration::days(1);
    repo.create_coupon(&NewCoupon::new("OLD", 10, expired_at))
        .unwrap();

    carts::add_item(
        &repo,
        &user,
        AddItemForm {
            product_id: product.id,
            quantity: 1,
        },
    )
    .unwrap();

    let result = carts::apply_coupon(
        &repo,
        &user,
        ApplyCouponForm {
            code: "OLD".to_string(),
        },
    );

    assert!(matches!(result, Err(ServiceError::Form(_))));

    // The rejection deactivated the coupon and left the cart untouched.
    let reloaded = repo.get_coupon_by_code("OLD").unwrap().unwrap();
    assert!(!reloaded.is_active);
    assert_eq!(reloaded.usage_count, 0);

    let view = carts::get_cart(&repo, &user).unwrap();
    assert_eq!(view.discount_percent, 0);
}

#[test]
fn service_apply_coupon_without_cart_row_creates_the_cart() {
    let test_db = common::TestDb::new("service_apply_coupon_without_cart_row.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = shopper(7);

    let expires_at = Utc::now().naive_utc() + Duration::days(30);
    repo.create_coupon(&NewCoupon::new("FIRST", 15, expires_at))
        .unwrap();

    // The shopper has never touched their cart; the single use must not be
    // consumed unless the discount actually lands.
    let view = carts::apply_coupon(
        &repo,
        &user,
        ApplyCouponForm {
            code: "FIRST".to_string(),
        },
    )
    .unwrap();

    assert_eq!(view.discount_percent, 15);
    assert!(view.items.is_empty());

    let reloaded = repo.get_coupon_by_code("FIRST").unwrap().unwrap();
    assert_eq!(reloaded.usage_count, 1);

    let cart = carts::get_cart(&repo, &user).unwrap();
    assert_eq!(cart.discount_percent, 15);
}

#[test]
fn service_sync_and_empty_cart_roundtrip() {
    let test_db = common::TestDb::new("service_sync_and_empty_cart.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = shopper(7);

    let a = repo
        .create_product(&NewProduct::new("A", 500, "USD").with_stock(10))
        .unwrap();
    let b = repo
        .create_product(&NewProduct::new("B", 700, "USD").with_stock(10))
        .unwrap();

    let view = carts::sync_cart(
        &repo,
        &user,
        SyncCartForm {
            items: vec![
                SyncItemForm {
                    product_id: a.id,
                    quantity: 2,
                },
                SyncItemForm {
                    product_id: b.id,
                    quantity: 1,
                },
            ],
        },
    )
    .unwrap();
    assert_eq!(view.total_items, 3);
    assert_eq!(view.subtotal_cents, 1_700);

    let view = carts::set_item_quantity(
        &repo,
        &user,
        SetQuantityForm {
            product_id: a.id,
            quantity: 0,
        },
    )
    .unwrap();
    assert_eq!(view.items.len(), 1);

    let view = carts::empty_cart(&repo, &user).unwrap();
    assert!(view.items.is_empty());
    assert_eq!(view.total_cents, 0);
}

#[test]
fn service_empty_cart_without_cart_row_succeeds() {
    let test_db = common::TestDb::new("service_empty_cart_without_row.db");
    let repo = DieselRepository::new(test_db.pool());

    let view = carts::empty_cart(&repo, &shopper(42)).unwrap();

    assert!(view.items.is_empty());
}
