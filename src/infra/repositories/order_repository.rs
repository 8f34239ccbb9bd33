//! Order repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{Order, OrderDraft};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
///
/// Lists are ordered by `created_date`, oldest first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Order>>;

    async fn list_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Order>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    async fn create(&self, draft: OrderDraft) -> AppResult<Order>;

    /// Replace every field of an existing order. `NotFound` if unknown.
    async fn update(&self, id: Uuid, draft: OrderDraft) -> AppResult<Order>;

    /// `NotFound` if unknown.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn list(&self) -> AppResult<Vec<Order>> {
        use super::entities::order::{self, Entity as OrderEntity};
        use sea_orm::{EntityTrait, QueryOrder};

        OrderEntity::find()
            .order_by_asc(order::Column::CreatedDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Order>> {
        use super::entities::order::{self, Entity as OrderEntity};
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

        OrderEntity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_asc(order::Column::CreatedDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        use super::entities::order::Entity as OrderEntity;
        use sea_orm::EntityTrait;

        OrderEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn create(&self, draft: OrderDraft) -> AppResult<Order> {
        queries::create(&self.db, draft).await
    }

    async fn update(&self, id: Uuid, draft: OrderDraft) -> AppResult<Order> {
        use super::entities::order::{ActiveModel, Entity as OrderEntity};
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let existing = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(crate::errors::AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.customer_id = Set(draft.customer_id);
        active.product_id = Set(draft.product_id);
        active.status = Set(draft.status.to_string());
        active.note = Set(draft.note);

        Order::try_from(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        use super::entities::order::Entity as OrderEntity;
        use sea_orm::EntityTrait;

        let result = OrderEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(crate::errors::AppError::NotFound);
        }
        Ok(())
    }
}

pub(crate) mod queries {
    use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
    use uuid::Uuid;

    use crate::domain::{Order, OrderDraft};
    use crate::errors::AppResult;
    use crate::infra::repositories::entities::order::{self, ActiveModel, Entity as OrderEntity};

    pub async fn create<C: ConnectionTrait>(db: &C, draft: OrderDraft) -> AppResult<Order> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(draft.customer_id),
            product_id: Set(draft.product_id),
            status: Set(draft.status.to_string()),
            note: Set(draft.note),
            created_date: Set(chrono::Utc::now()),
        };

        Order::try_from(active_model.insert(db).await?)
    }

    /// Returns how many orders were removed.
    pub async fn delete_for_customer<C: ConnectionTrait>(
        db: &C,
        customer_id: Uuid,
    ) -> AppResult<u64> {
        let result = OrderEntity::delete_many()
            .filter(order::Column::CustomerId.eq(customer_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
