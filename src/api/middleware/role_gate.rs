//! Role gate: who may reach a handler.
//!
//! [`RoleGate`] holds the decision logic; the extractors below apply it to
//! the [`CurrentUser`] left in request extensions by the session middleware.
//! A rejected request becomes a redirect through [`AppError`].

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::CurrentUser;
use crate::domain::Role;
use crate::errors::{AppError, AppResult};

pub struct RoleGate;

impl RoleGate {
    pub const ADMIN: &'static [Role] = &[Role::Admin];
    pub const CUSTOMER: &'static [Role] = &[Role::Customer];
    pub const ANY: &'static [Role] = &[Role::Admin, Role::Customer];

    /// Permit `user` if it holds one of `allowed`.
    ///
    /// Anonymous requests are sent to login; identities with the wrong role
    /// are sent to their own landing page.
    pub fn check(user: Option<&CurrentUser>, allowed: &[Role]) -> AppResult<CurrentUser> {
        let user = user.ok_or(AppError::AuthenticationRequired)?;
        if allowed.contains(&user.role) {
            Ok(user.clone())
        } else {
            Err(AppError::AuthorizationDenied { role: user.role })
        }
    }

    /// Permit only requests without a session.
    pub fn check_anonymous(user: Option<&CurrentUser>) -> AppResult<()> {
        match user {
            Some(_) => Err(AppError::AlreadyAuthenticated),
            None => Ok(()),
        }
    }
}

fn current_user(parts: &Parts) -> Option<&CurrentUser> {
    parts.extensions.get::<CurrentUser>()
}

/// Any signed-in identity
pub struct AuthUser(pub CurrentUser);

/// Signed-in administrator
pub struct AdminUser(pub CurrentUser);

/// Signed-in customer
pub struct CustomerUser(pub CurrentUser);

/// No session present
pub struct Anonymous;

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RoleGate::check(current_user(parts), RoleGate::ANY).map(AuthUser)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RoleGate::check(current_user(parts), RoleGate::ADMIN).map(AdminUser)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CustomerUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RoleGate::check(current_user(parts), RoleGate::CUSTOMER).map(CustomerUser)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Anonymous {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RoleGate::check_anonymous(current_user(parts)).map(|_| Anonymous)
    }
}
