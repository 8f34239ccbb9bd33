//! Read models for the two landing pages.

use serde::Serialize;
use utoipa::ToSchema;

use super::ServiceContainer;
use crate::domain::{Customer, Order, OrderSummary};
use crate::errors::AppResult;

/// Admin landing page: every customer and order with status counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Dashboard {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub total_customers: usize,
    #[serde(flatten)]
    pub summary: OrderSummary,
}

impl Dashboard {
    /// Customers and orders are loaded concurrently.
    pub async fn load(services: &dyn ServiceContainer) -> AppResult<Self> {
        let (customer_service, order_service) = (services.customers(), services.orders());
        let (customers, orders) = tokio::try_join!(
            customer_service.list_customers(),
            order_service.list_orders(),
        )?;

        Ok(Self {
            total_customers: customers.len(),
            summary: OrderSummary::of(&orders),
            customers,
            orders,
        })
    }
}

/// Customer landing page: the customer's own orders with status counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerHome {
    pub orders: Vec<Order>,
    #[serde(flatten)]
    pub summary: OrderSummary,
}

impl CustomerHome {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            summary: OrderSummary::of(&orders),
            orders,
        }
    }
}
