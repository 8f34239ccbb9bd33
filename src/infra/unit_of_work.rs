//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-record writes atomically:
//! registration (identity plus customer), the order formset batch, and the
//! customer cascade delete.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    customer_queries, order_queries, user_queries, CustomerRepository, CustomerStore,
    OrderRepository, OrderStore, ProductRepository, ProductStore, UserRepository, UserStore,
};
use crate::domain::{Customer, CustomerDraft, Order, OrderDraft, Role, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, wrap the repository mocks in a hand-written implementation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn customers(&self) -> Arc<dyn CustomerRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    fn orders(&self) -> Arc<dyn OrderRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise. Only
    /// the repositories handed out by the context take part in it.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn customers(&self) -> TxCustomerRepository<'_> {
        TxCustomerRepository { txn: self.txn }
    }

    pub fn orders(&self) -> TxOrderRepository<'_> {
        TxOrderRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    customer_repo: Arc<CustomerStore>,
    product_repo: Arc<ProductStore>,
    order_repo: Arc<OrderStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            customer_repo: Arc::new(CustomerStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            order_repo: Arc::new(OrderStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn customers(&self) -> Arc<dyn CustomerRepository> {
        self.customer_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Identity writes inside a transaction.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        user_queries::find_by_username(self.txn, username).await
    }

    pub async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> AppResult<User> {
        user_queries::create(self.txn, username, email, password_hash, role).await
    }
}

/// Customer writes inside a transaction.
pub struct TxCustomerRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxCustomerRepository<'_> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        customer_queries::find_by_id(self.txn, id).await
    }

    pub async fn create(&self, draft: CustomerDraft, user_id: Option<Uuid>) -> AppResult<Customer> {
        customer_queries::create(self.txn, draft, user_id).await
    }

    /// Remove the customer and every order referencing it.
    /// Returns the number of orders removed.
    pub async fn delete_with_orders(&self, id: Uuid) -> AppResult<u64> {
        let removed = order_queries::delete_for_customer(self.txn, id).await?;
        customer_queries::delete(self.txn, id).await?;
        Ok(removed)
    }
}

/// Order writes inside a transaction.
pub struct TxOrderRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxOrderRepository<'_> {
    pub async fn create(&self, draft: OrderDraft) -> AppResult<Order> {
        order_queries::create(self.txn, draft).await
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
