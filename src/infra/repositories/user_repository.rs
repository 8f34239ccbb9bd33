//! Identity repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{Role, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Exact, case-sensitive match
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Every identity registered with this address (case-insensitive)
    async fn find_by_email(&self, email: &str) -> AppResult<Vec<User>>;

    /// Insert a new identity. A taken username is a field error on `username`.
    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> AppResult<User>;

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        queries::find_by_id(&self.db, id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        queries::find_by_username(&self.db, username).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<User>> {
        queries::find_by_email(&self.db, email).await
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> AppResult<User> {
        queries::create(&self.db, username, email, password_hash, role).await
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<User> {
        queries::update_password(&self.db, id, password_hash).await
    }
}

pub(crate) mod queries {
    use sea_orm::sea_query::{Expr, Func};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr,
    };
    use uuid::Uuid;

    use super::DUPLICATE_USERNAME;
    use crate::domain::{Role, User};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::user::{self, ActiveModel, Entity as UserEntity};

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Vec<User>> {
        UserEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(user::Column::Email)))
                    .eq(email.to_lowercase()),
            )
            .all(db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match active_model.insert(db).await {
            Ok(model) => User::try_from(model),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::field("username", DUPLICATE_USERNAME))
                }
                _ => Err(err.into()),
            },
        }
    }

    pub async fn update_password<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        password_hash: String,
    ) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());

        User::try_from(active.update(db).await?)
    }
}
