use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;

use crate::{
    domain::cart::Cart as DomainCart,
    models::{
        cart::{Cart as DbCart, CartItem as DbCartItem, NewCart, NewCartItem},
        product::Product as DbProduct,
    },
    repository::{CartReader, CartWriter, DieselRepository, RepositoryError, RepositoryResult},
};

fn find_cart(conn: &mut SqliteConnection, user_id: i32) -> RepositoryResult<Option<DbCart>> {
    use crate::schema::carts;

    let cart = carts::table
        .filter(carts::user_id.eq(user_id))
        .first::<DbCart>(conn)
        .optional()?;

    Ok(cart)
}

/// Fetch the user's cart row, creating it lazily on first use.
///
/// Two concurrent first adds can race on the unique `user_id` index; the
/// loser re-reads the row the winner created.
fn get_or_create_cart(conn: &mut SqliteConnection, user_id: i32) -> RepositoryResult<DbCart> {
    use crate::schema::carts;

    if let Some(cart) = find_cart(conn, user_id)? {
        return Ok(cart);
    }

    let new_cart = NewCart {
        user_id,
        updated_at: Utc::now().naive_utc(),
    };

    match diesel::insert_into(carts::table)
        .values(&new_cart)
        .get_result::<DbCart>(conn)
    {
        Ok(cart) => Ok(cart),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => find_cart(conn, user_id)?.ok_or(RepositoryError::NotFound),
        Err(err) => Err(err.into()),
    }
}

fn touch_cart(conn: &mut SqliteConnection, cart_id: i32) -> RepositoryResult<()> {
    use crate::schema::carts;

    diesel::update(carts::table.filter(carts::id.eq(cart_id)))
        .set(carts::updated_at.eq(Utc::now().naive_utc()))
        .execute(conn)?;

    Ok(())
}

fn load_domain_cart(conn: &mut SqliteConnection, cart_id: i32) -> RepositoryResult<DomainCart> {
    use crate::schema::{cart_items, carts, products};

    let cart = carts::table
        .filter(carts::id.eq(cart_id))
        .first::<DbCart>(conn)?;

    let items = cart_items::table
        .inner_join(products::table)
        .filter(cart_items::cart_id.eq(cart.id))
        .order(cart_items::id.asc())
        .select((DbCartItem::as_select(), DbProduct::as_select()))
        .load::<(DbCartItem, DbProduct)>(conn)?;

    Ok(cart.into_domain(items))
}

impl CartReader for DieselRepository {
    fn get_cart(&self, user_id: i32) -> RepositoryResult<Option<DomainCart>> {
        let mut conn = self.conn()?;

        let Some(cart) = find_cart(&mut conn, user_id)? else {
            return Ok(None);
        };

        Ok(Some(load_domain_cart(&mut conn, cart.id)?))
    }
}

impl CartWriter for DieselRepository {
    fn add_cart_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCart, RepositoryError, _>(|conn| {
            let cart = get_or_create_cart(conn, user_id)?;

            let new_item = NewCartItem {
                cart_id: cart.id,
                product_id,
                quantity,
                updated_at: Utc::now().naive_utc(),
            };

            // Single-statement increment so concurrent adds never lose an
            // update to a read-modify-write race.
            diesel::insert_into(cart_items::table)
                .values(&new_item)
                .on_conflict((cart_items::cart_id, cart_items::product_id))
                .do_update()
                .set((
                    cart_items::quantity.eq(cart_items::quantity + excluded(cart_items::quantity)),
                    cart_items::updated_at.eq(excluded(cart_items::updated_at)),
                ))
                .execute(conn)?;

            touch_cart(conn, cart.id)?;
            load_domain_cart(conn, cart.id)
        })
    }

    fn set_cart_item_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCart, RepositoryError, _>(|conn| {
            let cart = find_cart(conn, user_id)?.ok_or(RepositoryError::NotFound)?;

            let target = cart_items::table
                .filter(cart_items::cart_id.eq(cart.id))
                .filter(cart_items::product_id.eq(product_id));

            // A non-positive quantity means the line goes away entirely; a
            // line item is deleted, never stored with quantity zero.
            let affected = if quantity <= 0 {
                diesel::delete(target).execute(conn)?
            } else {
                diesel::update(target)
                    .set((
                        cart_items::quantity.eq(quantity),
                        cart_items::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)?
            };

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            touch_cart(conn, cart.id)?;
            load_domain_cart(conn, cart.id)
        })
    }

    fn remove_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCart, RepositoryError, _>(|conn| {
            let cart = find_cart(conn, user_id)?.ok_or(RepositoryError::NotFound)?;

            let deleted = diesel::delete(
                cart_items::table
                    .filter(cart_items::cart_id.eq(cart.id))
                    .filter(cart_items::product_id.eq(product_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            touch_cart(conn, cart.id)?;
            load_domain_cart(conn, cart.id)
        })
    }

    fn set_cart_discount(&self, user_id: i32, discount_percent: i32) -> RepositoryResult<DomainCart> {
        use crate::schema::carts;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCart, RepositoryError, _>(|conn| {
            // Created lazily: a coupon redemption must never be consumed and
            // then fail because the shopper has not touched their cart yet.
            let cart = get_or_create_cart(conn, user_id)?;

            diesel::update(carts::table.filter(carts::id.eq(cart.id)))
                .set((
                    carts::discount_percent.eq(discount_percent),
                    carts::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            load_domain_cart(conn, cart.id)
        })
    }

    fn sync_cart_items(&self, user_id: i32, items: &[(i32, i32)]) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCart, RepositoryError, _>(|conn| {
            let cart = get_or_create_cart(conn, user_id)?;

            // Client-authoritative merge: the client quantity overwrites the
            // server quantity for every product the client names, new
            // products are appended, server-only lines stay untouched.
            // Setting instead of adding keeps the operation idempotent.
            for &(product_id, quantity) in items {
                let new_item = NewCartItem {
                    cart_id: cart.id,
                    product_id,
                    quantity,
                    updated_at: Utc::now().naive_utc(),
                };

                diesel::insert_into(cart_items::table)
                    .values(&new_item)
                    .on_conflict((cart_items::cart_id, cart_items::product_id))
                    .do_update()
                    .set((
                        cart_items::quantity.eq(excluded(cart_items::quantity)),
                        cart_items::updated_at.eq(excluded(cart_items::updated_at)),
                    ))
                    .execute(conn)?;
            }

            touch_cart(conn, cart.id)?;
            load_domain_cart(conn, cart.id)
        })
    }

    fn clear_cart(&self, user_id: i32) -> RepositoryResult<DomainCart> {
        use crate::schema::{cart_items, carts};

        let mut conn = self.conn()?;

        conn.transaction::<DomainCart, RepositoryError, _>(|conn| {
            let cart = find_cart(conn, user_id)?.ok_or(RepositoryError::NotFound)?;

            diesel::delete(cart_items::table.filter(cart_items::cart_id.eq(cart.id)))
                .execute(conn)?;

            diesel::update(carts::table.filter(carts::id.eq(cart.id)))
                .set((
                    carts::discount_percent.eq(0),
                    carts::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            load_domain_cart(conn, cart.id)
        })
    }
}
