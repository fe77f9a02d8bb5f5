use serde::Deserialize;
use uuid::Uuid;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::order::{Order, OrderListQuery, OrderStatus, UpdateOrder};
use crate::forms::orders::UpdateOrderStatusForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the order history endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Optional lifecycle status filter.
    pub status: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// Loads the caller's order history, newest first.
pub fn list_orders<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<Paginated<Order>>
where
    R: OrderReader + ?Sized,
{
    let OrdersQuery { status, page } = query;

    let page = page.unwrap_or(1);
    let mut list_query = OrderListQuery::new(user.user_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(ref status_value) = status {
        let status = UpdateOrderStatusForm {
            status: status_value.clone(),
        }
        .into_status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
        list_query = list_query.status(status);
    }

    let (total, items) = repo.list_orders(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(items, page, total_pages))
}

/// Loads a single order.
///
/// Shoppers only see their own orders; an order belonging to someone else is
/// reported as missing rather than forbidden.
pub fn get_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if order.user_id != user.user_id && !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::NotFound);
    }

    Ok(order)
}

/// Moves an order to a new lifecycle status.
///
/// Only legal transitions are applied; shipping an order assigns a tracking
/// number when it does not have one yet.
pub fn update_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: UpdateOrderStatusForm,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let next = form
        .into_status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if !order.status.can_transition_to(next) {
        return Err(ServiceError::Conflict(format!(
            "cannot move order from `{}` to `{next}`",
            order.status
        )));
    }

    let mut updates = UpdateOrder::new().status(next);

    if next == OrderStatus::Shipped && order.tracking_number.is_none() {
        updates = updates.tracking_number(generate_tracking_number());
    }

    repo.update_order(order_id, &updates)
        .map_err(ServiceError::from)
}

fn generate_tracking_number() -> String {
    format!("TRK-{}", Uuid::new_v4().simple()).to_uppercase()
}
