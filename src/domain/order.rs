//! Orders, their status, and the aggregate counts shown on dashboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Delivery status. Admins may move an order between any two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Pending,
    #[serde(rename = "Out for delivery")]
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Parse a submitted or stored label. Anything else is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub status: OrderStatus,
    #[schema(example = "Leave at the back door")]
    pub note: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Validated values for creating or updating one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub status: OrderStatus,
    pub note: Option<String>,
}

/// Order counts displayed next to order lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub total_delivered: usize,
    pub total_pending: usize,
}

impl OrderSummary {
    pub fn of<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders
            .into_iter()
            .fold(OrderSummary::default(), |mut summary, order| {
                summary.total_orders += 1;
                match order.status {
                    OrderStatus::Delivered => summary.total_delivered += 1,
                    OrderStatus::Pending => summary.total_pending += 1,
                    OrderStatus::OutForDelivery => {}
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            status,
            note: None,
            created_date: Utc::now(),
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(
            OrderStatus::parse("Out for delivery"),
            Some(OrderStatus::OutForDelivery)
        );
        assert_eq!(OrderStatus::parse("pending"), None);
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"Out for delivery\""
        );
    }

    #[test]
    fn test_summary_counts() {
        let orders = vec![
            order(OrderStatus::Pending),
            order(OrderStatus::Delivered),
            order(OrderStatus::OutForDelivery),
            order(OrderStatus::Pending),
        ];
        let summary = OrderSummary::of(&orders);
        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.total_delivered, 1);
        assert_eq!(summary.total_pending, 2);
        assert_eq!(OrderSummary::of(&[]), OrderSummary::default());
    }
}
