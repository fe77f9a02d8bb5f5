use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle states for a placed order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been created but payment has not been confirmed.
    Pending,
    /// Payment confirmed, order is being prepared.
    Processing,
    /// Order has left the warehouse.
    Shipped,
    /// Order reached the customer. Terminal.
    Delivered,
    /// Order was cancelled before shipping. Terminal.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    /// Returns true when moving from `self` to `next` is a legal transition.
    ///
    /// Allowed edges: `Pending -> Processing | Cancelled`,
    /// `Processing -> Shipped | Cancelled`, `Shipped -> Delivered`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        )
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(<&str>::from(*self))
    }
}

/// Payment outcome tracked independently of the order status.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment has not been attempted or confirmed yet.
    Pending,
    /// The gateway confirmed the charge.
    Paid,
    /// The gateway declined the charge.
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "paid" => Self::Paid,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl From<PaymentStatus> for &'static str {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// Payment instruments accepted at checkout.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment through the gateway (Braintree in the sandbox).
    CreditCard,
    /// PayPal order capture.
    PayPal,
    /// Cash App (placeholder integration, no public API).
    CashApp,
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        match value {
            "paypal" => Self::PayPal,
            "cash_app" => Self::CashApp,
            _ => Self::CreditCard,
        }
    }
}

impl From<PaymentMethod> for &'static str {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::CashApp => "cash_app",
        }
    }
}

/// Domain representation of a placed order.
///
/// An order is an immutable snapshot of the cart at checkout time; only its
/// status fields change afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// User who placed the order.
    pub user_id: i32,
    /// Recipient name.
    pub full_name: String,
    /// Email address for the confirmation.
    pub email: String,
    /// Optional contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// ZIP code, `NNNNN` or `NNNNN-NNNN`.
    pub zip: String,
    /// Country.
    pub country: String,
    /// Instrument used to pay.
    pub payment_method: PaymentMethod,
    /// Outcome of the payment attempt.
    pub payment_status: PaymentStatus,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Gateway transaction identifier, when a charge succeeded.
    pub payment_ref: Option<String>,
    /// Carrier tracking number, set when the order ships.
    pub tracking_number: Option<String>,
    /// Optional notes supplied by the shopper.
    pub notes: Option<String>,
    /// Total charged, in cents, computed from the item snapshot.
    pub total_cents: i64,
    /// ISO 4217 currency code of the total.
    pub currency: String,
    /// Line-item snapshot captured at checkout.
    pub items: Vec<OrderItem>,
    /// Timestamp for when the order record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the order record.
    pub updated_at: NaiveDateTime,
}

/// A snapshotted order line.
///
/// `price_cents` is the effective unit price at checkout time; later catalog
/// changes never alter it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderItem {
    /// Referenced product, if it still exists in the catalog.
    pub product_id: Option<i32>,
    /// Product name at checkout time.
    pub name: String,
    /// Product image at checkout time.
    pub image_url: Option<String>,
    /// Effective unit price in cents at checkout time.
    pub price_cents: i64,
    /// ISO 4217 currency code of the unit price.
    pub currency: String,
    /// Units purchased.
    pub quantity: i32,
}

impl OrderItem {
    /// Total for this line in cents.
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents * i64::from(self.quantity)
    }
}

/// Payload required to insert a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// User who placed the order.
    pub user_id: i32,
    /// Recipient name.
    pub full_name: String,
    /// Email address for the confirmation.
    pub email: String,
    /// Optional contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// ZIP code.
    pub zip: String,
    /// Country.
    pub country: String,
    /// Instrument used to pay.
    pub payment_method: PaymentMethod,
    /// Outcome of the payment attempt.
    pub payment_status: PaymentStatus,
    /// Initial lifecycle status.
    pub status: OrderStatus,
    /// Gateway transaction identifier.
    pub payment_ref: Option<String>,
    /// Optional notes supplied by the shopper.
    pub notes: Option<String>,
    /// Total charged, in cents.
    pub total_cents: i64,
    /// ISO 4217 currency code of the total.
    pub currency: String,
    /// Line-item snapshot to persist with the order.
    pub items: Vec<OrderItem>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

/// Patch data applied when updating an existing order.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    /// Optional lifecycle status update.
    pub status: Option<OrderStatus>,
    /// Optional payment status update.
    pub payment_status: Option<PaymentStatus>,
    /// Optional tracking number update.
    pub tracking_number: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateOrder {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            status: None,
            payment_status: None,
            tracking_number: None,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Update the lifecycle status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Update the payment status.
    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    /// Set the carrier tracking number.
    pub fn tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }
}

/// Query definition used to list a user's orders.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    /// Owning user identifier.
    pub user_id: i32,
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<crate::pagination::Pagination>,
}

impl OrderListQuery {
    /// Construct a query that targets all orders belonging to `user_id`.
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            status: None,
            pagination: None,
        }
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(crate::pagination::Pagination { page, per_page });
        self
    }
}
