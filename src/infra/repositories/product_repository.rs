//! Product catalog repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::{NewProduct, Product};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, oldest first
    async fn list(&self) -> AppResult<Vec<Product>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    async fn create(&self, product: NewProduct) -> AppResult<Product>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list(&self) -> AppResult<Vec<Product>> {
        ProductEntity::find()
            .order_by_asc(product::Column::CreatedDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Product::try_from)
            .transpose()
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name),
            price: Set(product.price),
            category: Set(product.category.to_string()),
            description: Set(product.description),
            image: Set(product.image),
            created_date: Set(chrono::Utc::now()),
        };

        Product::try_from(active_model.insert(&self.db).await?)
    }
}
