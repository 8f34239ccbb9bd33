//! Customer repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{Customer, CustomerDraft};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Customer repository trait for dependency injection.
///
/// Deleting a customer takes its orders with it, so it only happens inside
/// a transaction (see `TxCustomerRepository::delete_with_orders`).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, oldest first
    async fn list(&self) -> AppResult<Vec<Customer>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>>;

    /// The customer record linked to an identity, if any
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Customer>>;

    async fn create(&self, draft: CustomerDraft, user_id: Option<Uuid>) -> AppResult<Customer>;

    /// Overwrite the editable fields. `NotFound` if the id is unknown.
    /// A draft without a picture leaves the stored one untouched.
    async fn update(&self, id: Uuid, draft: CustomerDraft) -> AppResult<Customer>;
}

/// Concrete implementation of CustomerRepository
pub struct CustomerStore {
    db: DatabaseConnection,
}

impl CustomerStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for CustomerStore {
    async fn list(&self) -> AppResult<Vec<Customer>> {
        use super::entities::customer::{self, Entity as CustomerEntity};
        use sea_orm::{EntityTrait, QueryOrder};

        let models = CustomerEntity::find()
            .order_by_asc(customer::Column::CreatedDate)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        queries::find_by_id(&self.db, id).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Customer>> {
        use super::entities::customer::{self, Entity as CustomerEntity};
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let result = CustomerEntity::find()
            .filter(customer::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Customer::from))
    }

    async fn create(&self, draft: CustomerDraft, user_id: Option<Uuid>) -> AppResult<Customer> {
        queries::create(&self.db, draft, user_id).await
    }

    async fn update(&self, id: Uuid, draft: CustomerDraft) -> AppResult<Customer> {
        use super::entities::customer::{ActiveModel, Entity as CustomerEntity};
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let existing = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(crate::errors::AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.email = Set(draft.email);
        active.phone = Set(draft.phone);
        // No new picture keeps the current one
        if let Some(pic) = draft.profile_pic {
            active.profile_pic = Set(Some(pic));
        }

        Ok(Customer::from(active.update(&self.db).await?))
    }
}

pub(crate) mod queries {
    use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
    use uuid::Uuid;

    use crate::config::DEFAULT_PROFILE_PIC;
    use crate::domain::{Customer, CustomerDraft};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::customer::{ActiveModel, Entity as CustomerEntity};

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<Customer>> {
        Ok(CustomerEntity::find_by_id(id)
            .one(db)
            .await?
            .map(Customer::from))
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        draft: CustomerDraft,
        user_id: Option<Uuid>,
    ) -> AppResult<Customer> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(draft.name),
            email: Set(draft.email),
            phone: Set(draft.phone),
            profile_pic: Set(draft
                .profile_pic
                .or_else(|| Some(DEFAULT_PROFILE_PIC.to_string()))),
            created_date: Set(chrono::Utc::now()),
        };

        Ok(Customer::from(active_model.insert(db).await?))
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<()> {
        let result = CustomerEntity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
