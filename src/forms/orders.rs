use serde::Deserialize;
use thiserror::Error;

use crate::domain::order::OrderStatus;

/// Errors that can occur while processing order forms.
#[derive(Debug, Error)]
pub enum OrderFormError {
    /// The submitted status string is not a known lifecycle state.
    #[error("unknown order status `{value}`")]
    UnknownStatus { value: String },
}

/// Form payload for moving an order to a new lifecycle status.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusForm {
    /// Target status, one of `pending`, `processing`, `shipped`,
    /// `delivered` or `cancelled`.
    pub status: String,
}

impl UpdateOrderStatusForm {
    /// Parses the submitted status into a domain `OrderStatus`.
    ///
    /// `From<&str>` treats unknown strings as `Pending`; forms reject them
    /// instead so a typo cannot silently reset an order.
    pub fn into_status(self) -> Result<OrderStatus, OrderFormError> {
        let normalized = self.status.trim().to_lowercase();
        match normalized.as_str() {
            "pending" | "processing" | "shipped" | "delivered" | "cancelled" => {
                Ok(OrderStatus::from(normalized.as_str()))
            }
            _ => Err(OrderFormError::UnknownStatus {
                value: self.status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse() {
        let form = UpdateOrderStatusForm {
            status: " Shipped ".to_string(),
        };

        assert_eq!(form.into_status().unwrap(), OrderStatus::Shipped);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let form = UpdateOrderStatusForm {
            status: "returned".to_string(),
        };

        assert!(matches!(
            form.into_status(),
            Err(OrderFormError::UnknownStatus { .. })
        ));
    }
}
