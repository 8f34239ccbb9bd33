//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CustomerService, OrderService, ProductService, ServiceContainer, Services,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub database: Arc<Database>,
    /// Mark the session cookie `Secure` (public URL is https)
    pub secure_cookies: bool,
}

impl AppState {
    /// Wire all services over the database connection.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let secure_cookies = config.public_base_url.starts_with("https://");
        let container = Services::from_connection(database.get_connection(), config);

        Self::new(Arc::new(container), database, secure_cookies)
    }

    /// Create application state with manually injected services.
    pub fn new(
        services: Arc<dyn ServiceContainer>,
        database: Arc<Database>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            services,
            database,
            secure_cookies,
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.services.auth()
    }

    pub fn customers(&self) -> Arc<dyn CustomerService> {
        self.services.customers()
    }

    pub fn orders(&self) -> Arc<dyn OrderService> {
        self.services.orders()
    }

    pub fn products(&self) -> Arc<dyn ProductService> {
        self.services.products()
    }
}
