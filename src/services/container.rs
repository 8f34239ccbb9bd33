//! Service Container - Centralized service access.

use std::sync::Arc;

use super::{AuthService, CustomerService, OrderService, ProductService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn customers(&self) -> Arc<dyn CustomerService>;

    fn orders(&self) -> Arc<dyn OrderService>;

    fn products(&self) -> Arc<dyn ProductService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    customer_service: Arc<dyn CustomerService>,
    order_service: Arc<dyn OrderService>,
    product_service: Arc<dyn ProductService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        customer_service: Arc<dyn CustomerService>,
        order_service: Arc<dyn OrderService>,
        product_service: Arc<dyn ProductService>,
    ) -> Self {
        Self {
            auth_service,
            customer_service,
            order_service,
            product_service,
        }
    }

    /// Wire every service to one Unit of Work over `db`
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, CustomerManager, OrderManager, ProductManager};

        let uow = Arc::new(Persistence::new(db));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), config)),
            Arc::new(CustomerManager::new(uow.clone())),
            Arc::new(OrderManager::new(uow.clone())),
            Arc::new(ProductManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn customers(&self) -> Arc<dyn CustomerService> {
        self.customer_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }
}
