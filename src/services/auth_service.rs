//! Authentication service - registration, login sessions, password reset.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, PASSWORD_RESET_PURPOSE, SECONDS_PER_HOUR};
use crate::domain::{CustomerDraft, Password, Role, User};
use crate::errors::{AppError, AppResult};
use crate::forms::Registration;
use crate::infra::repositories::DUPLICATE_USERNAME;
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Password reset JWT claims. Signed with a key bound to the current
/// password hash, so a token dies once the password changes.
#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: Uuid,
    purpose: String,
    exp: i64,
    iat: i64,
}

/// Session token issued on login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// One issued reset link
#[derive(Debug, Clone)]
pub struct PasswordResetLink {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
    pub url: String,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer identity and its linked customer record.
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Check credentials and issue a session token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a session token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Create an administrator identity (no customer record)
    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User>;

    /// Issue a reset link for every identity registered with `email`.
    /// An unknown address yields no links and no error.
    async fn request_password_reset(&self, email: String) -> AppResult<Vec<PasswordResetLink>>;

    /// The identity a reset link belongs to, or `InvalidResetLink`.
    async fn check_reset_link(&self, uid: Uuid, token: String) -> AppResult<User>;

    /// Set a new password through a reset link. The link is spent afterwards.
    async fn confirm_password_reset(
        &self,
        uid: Uuid,
        token: String,
        new_password: String,
    ) -> AppResult<()>;
}

/// Generate a session token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

fn reset_key(user: &User, config: &Config) -> Vec<u8> {
    let mut key = config.jwt_secret_bytes().to_vec();
    key.extend_from_slice(user.password_hash.as_bytes());
    key
}

fn generate_reset_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = ResetClaims {
        sub: user.id,
        purpose: PASSWORD_RESET_PURPOSE.to_string(),
        exp: (now + Duration::seconds(config.password_reset_timeout_seconds)).timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&reset_key(user, config)),
    )?)
}

fn reset_token_matches(user: &User, token: &str, config: &Config) -> bool {
    let mut validation = Validation::default();
    validation.leeway = 0;

    match decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(&reset_key(user, config)),
        &validation,
    ) {
        Ok(data) => data.claims.sub == user.id && data.claims.purpose == PASSWORD_RESET_PURPOSE,
        Err(e) => {
            tracing::debug!(user_id = %user.id, error = %e, "Rejected password reset token");
            false
        }
    }
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let Registration {
            username,
            email,
            password,
        } = registration;
        let password_hash = Password::new(&password)
            .map_err(|_| AppError::field("password1", "This password is too short."))?
            .into_string();

        let user = with_transaction!(self.uow, |tx| {
            if tx.users().find_by_username(&username).await?.is_some() {
                return Err(AppError::field("username", DUPLICATE_USERNAME));
            }
            let user = tx
                .users()
                .create(username, email.clone(), password_hash, Role::Customer)
                .await?;
            let profile = CustomerDraft {
                name: user.username.clone(),
                email: Some(email).filter(|e| !e.is_empty()),
                phone: None,
                profile_pic: None,
            };
            tx.customers().create(profile, Some(user.id)).await?;
            Ok(user)
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "Account was created");
        Ok(user)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_username(&username).await?;

        // Unknown usernames still pay for one hash verification
        let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
        if !Password::verify_stored(stored_hash, &password) {
            return Err(AppError::InvalidCredentials);
        }

        let user = user.ok_or(AppError::InvalidCredentials)?;
        tracing::debug!(user_id = %user.id, "Login succeeded");
        generate_token(&user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        let password_hash = Password::new(&password)?.into_string();
        self.uow
            .users()
            .create(username, email, password_hash, Role::Admin)
            .await
    }

    async fn request_password_reset(&self, email: String) -> AppResult<Vec<PasswordResetLink>> {
        let users = self.uow.users().find_by_email(&email).await?;
        if users.is_empty() {
            tracing::info!("Password reset requested for an unregistered address");
        }

        let base_url = self.config.public_base_url.trim_end_matches('/');
        users
            .into_iter()
            .map(|user| {
                let token = generate_reset_token(&user, &self.config)?;
                let url = format!("{}/password_reset_confirm/{}/{}/", base_url, user.id, token);
                tracing::info!(user_id = %user.id, email = %user.email, url = %url, "Password reset link issued");
                Ok(PasswordResetLink {
                    user_id: user.id,
                    email: user.email,
                    token,
                    url,
                })
            })
            .collect()
    }

    async fn check_reset_link(&self, uid: Uuid, token: String) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by_id(uid)
            .await?
            .ok_or(AppError::InvalidResetLink)?;

        if !reset_token_matches(&user, &token, &self.config) {
            return Err(AppError::InvalidResetLink);
        }
        Ok(user)
    }

    async fn confirm_password_reset(
        &self,
        uid: Uuid,
        token: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self.check_reset_link(uid, token).await?;
        let password_hash = Password::new(&new_password)
            .map_err(|_| AppError::field("new_password1", "This password is too short."))?
            .into_string();

        self.uow.users().update_password(user.id, password_hash).await?;
        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}
