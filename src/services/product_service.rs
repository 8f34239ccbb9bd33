//! Product service - the catalog.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewProduct, Product};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    async fn create_product(&self, product: NewProduct) -> AppResult<Product>;
}

/// Concrete implementation of ProductService using Unit of Work.
pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.uow.products().list().await
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        if product.name.trim().is_empty() {
            return Err(AppError::field("name", "This field is required."));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(AppError::field("price", "Enter a non-negative number."));
        }

        let product = self.uow.products().create(product).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }
}
