//! Customer service - customer records and their order history.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Customer, CustomerDraft, Order, OrderFilter};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A customer with the orders matching a filter.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerOrders {
    pub customer: Customer,
    pub orders: Vec<Order>,
    /// Count of all the customer's orders, ignoring the filter
    pub total_orders: usize,
}

/// Customer service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn list_customers(&self) -> AppResult<Vec<Customer>>;

    async fn get_customer(&self, id: Uuid) -> AppResult<Customer>;

    /// The customer record linked to a login identity
    async fn customer_for_user(&self, user_id: Uuid) -> AppResult<Customer>;

    /// Customer plus filtered orders
    async fn customer_orders(&self, id: Uuid, filter: OrderFilter) -> AppResult<CustomerOrders>;

    async fn create_customer(&self, draft: CustomerDraft) -> AppResult<Customer>;

    /// Update the customer record linked to a login identity
    async fn update_profile(&self, user_id: Uuid, draft: CustomerDraft) -> AppResult<Customer>;

    /// Delete a customer together with all of its orders
    async fn delete_customer(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CustomerService using Unit of Work.
pub struct CustomerManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CustomerManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CustomerService for CustomerManager<U> {
    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        self.uow.customers().list().await
    }

    async fn get_customer(&self, id: Uuid) -> AppResult<Customer> {
        self.uow.customers().find_by_id(id).await?.ok_or_not_found()
    }

    async fn customer_for_user(&self, user_id: Uuid) -> AppResult<Customer> {
        self.uow
            .customers()
            .find_by_user(user_id)
            .await?
            .ok_or_not_found()
    }

    async fn customer_orders(&self, id: Uuid, filter: OrderFilter) -> AppResult<CustomerOrders> {
        let customer = self.get_customer(id).await?;
        let orders = self.uow.orders().list_for_customer(customer.id).await?;
        let total_orders = orders.len();

        Ok(CustomerOrders {
            customer,
            orders: filter.apply(orders),
            total_orders,
        })
    }

    async fn create_customer(&self, draft: CustomerDraft) -> AppResult<Customer> {
        let customer = self.uow.customers().create(draft, None).await?;
        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    async fn update_profile(&self, user_id: Uuid, draft: CustomerDraft) -> AppResult<Customer> {
        let customer = self.customer_for_user(user_id).await?;
        self.uow.customers().update(customer.id, draft).await
    }

    async fn delete_customer(&self, id: Uuid) -> AppResult<()> {
        let removed = with_transaction!(self.uow, |tx| {
            tx.customers().delete_with_orders(id).await
        })?;

        tracing::info!(customer_id = %id, orders_removed = removed, "Customer deleted");
        Ok(())
    }
}

