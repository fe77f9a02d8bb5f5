use std::collections::HashMap;

use diesel::prelude::*;

use crate::{
    domain::order::{
        NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery,
        UpdateOrder as DomainUpdateOrder,
    },
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem, UpdateOrder as DbUpdateOrder,
    },
    repository::{DieselRepository, OrderReader, OrderWriter, RepositoryError, RepositoryResult},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let order_id = order.id;

        let items = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let OrderListQuery {
            user_id,
            status,
            pagination,
        } = query;

        let status_filter = status.map(<&str>::from);

        let mut count_query = orders::table
            .filter(orders::user_id.eq(user_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status_value) = status_filter {
            count_query = count_query.filter(orders::status.eq(status_value));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = orders::table
            .filter(orders::user_id.eq(user_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status_value) = status_filter {
            items = items.filter(orders::status.eq(status_value));
        }

        items = items.order(orders::created_at.desc());

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_orders = items.load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();

        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let order_id = order.id;
                let items = items_by_order.remove(&order_id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(orders::table)
                .values(&DbNewOrder::from(new_order))
                .get_result::<DbOrder>(conn)?;

            let order_id = created.id;

            if !new_order.items.is_empty() {
                let payload: Vec<DbNewOrderItem<'_>> = new_order
                    .items
                    .iter()
                    .map(|item| DbNewOrderItem::from_domain(order_id, item))
                    .collect();

                diesel::insert_into(order_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            // Stock bookkeeping for the snapshot; a line that outruns the
            // remaining stock clamps it to zero rather than failing a
            // checkout that was already charged.
            for item in &new_order.items {
                let Some(product_id) = item.product_id else {
                    continue;
                };

                let deducted = diesel::update(
                    products::table
                        .filter(products::id.eq(product_id))
                        .filter(products::stock.ge(item.quantity)),
                )
                .set(products::stock.eq(products::stock - item.quantity))
                .execute(conn)?;

                if deducted == 0 {
                    diesel::update(products::table.filter(products::id.eq(product_id)))
                        .set(products::stock.eq(0))
                        .execute(conn)?;
                }
            }

            let items = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .order(order_items::id.asc())
                .load::<DbOrderItem>(conn)?;

            Ok(DomainOrder::from((created, items)))
        })
    }

    fn update_order(
        &self,
        order_id: i32,
        updates: &DomainUpdateOrder,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let updated = diesel::update(orders::table.filter(orders::id.eq(order_id)))
                .set(&DbUpdateOrder::from(updates))
                .get_result::<DbOrder>(conn)?;

            let items = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .order(order_items::id.asc())
                .load::<DbOrderItem>(conn)?;

            Ok(DomainOrder::from((updated, items)))
        })
    }
}
