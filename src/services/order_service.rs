//! Order service - single orders and the per-customer formset batch.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Order, OrderDraft};
use crate::errors::{AppError, AppResult, FieldErrors, OptionExt};
use crate::forms::{OrderFormset, PlacedOrder, INVALID_CHOICE};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn list_orders(&self) -> AppResult<Vec<Order>>;

    async fn orders_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Order>>;

    async fn get_order(&self, id: Uuid) -> AppResult<Order>;

    /// Create an order. Unknown customer or product ids are field errors.
    async fn create_order(&self, draft: OrderDraft) -> AppResult<Order>;

    /// Replace an order's fields. Any status may follow any other.
    async fn update_order(&self, id: Uuid, draft: OrderDraft) -> AppResult<Order>;

    async fn delete_order(&self, id: Uuid) -> AppResult<()>;

    /// Create every placed row for one customer in a single transaction.
    async fn place_orders(
        &self,
        customer_id: Uuid,
        rows: Vec<PlacedOrder>,
    ) -> AppResult<Vec<Order>>;
}

/// Concrete implementation of OrderService using Unit of Work.
pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Both references of a draft must resolve.
    async fn check_references(&self, draft: &OrderDraft) -> AppResult<()> {
        let (customers, products) = (self.uow.customers(), self.uow.products());
        let (customer, product) = tokio::try_join!(
            customers.find_by_id(draft.customer_id),
            products.find_by_id(draft.product_id),
        )?;

        let mut errors = FieldErrors::new();
        if customer.is_none() {
            errors.add("customer", INVALID_CHOICE);
        }
        if product.is_none() {
            errors.add("product", INVALID_CHOICE);
        }
        errors.into_result()
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        self.uow.orders().list().await
    }

    async fn orders_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Order>> {
        self.uow.orders().list_for_customer(customer_id).await
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Order> {
        self.uow.orders().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_order(&self, draft: OrderDraft) -> AppResult<Order> {
        self.check_references(&draft).await?;
        let order = self.uow.orders().create(draft).await?;
        tracing::info!(order_id = %order.id, customer_id = %order.customer_id, "Order created");
        Ok(order)
    }

    async fn update_order(&self, id: Uuid, draft: OrderDraft) -> AppResult<Order> {
        self.get_order(id).await?;
        self.check_references(&draft).await?;
        self.uow.orders().update(id, draft).await
    }

    async fn delete_order(&self, id: Uuid) -> AppResult<()> {
        self.uow.orders().delete(id).await?;
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }

    async fn place_orders(
        &self,
        customer_id: Uuid,
        rows: Vec<PlacedOrder>,
    ) -> AppResult<Vec<Order>> {
        self.uow
            .customers()
            .find_by_id(customer_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let known: HashSet<Uuid> = self
            .uow
            .products()
            .list()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        let mut errors = FieldErrors::new();
        for row in rows.iter().filter(|r| !known.contains(&r.product_id)) {
            errors.add(OrderFormset::field_name(row.row, "product"), INVALID_CHOICE);
        }
        errors.into_result()?;

        let orders = with_transaction!(self.uow, |tx| {
            let mut created = Vec::with_capacity(rows.len());
            for row in rows {
                let draft = OrderDraft {
                    customer_id,
                    product_id: row.product_id,
                    status: row.status,
                    note: None,
                };
                created.push(tx.orders().create(draft).await?);
            }
            Ok(created)
        })?;

        tracing::info!(customer_id = %customer_id, count = orders.len(), "Orders placed");
        Ok(orders)
    }
}
