//! API middleware.

mod auth;
mod role_gate;

pub use auth::{expired_session_cookie, session_cookie, session_middleware, CurrentUser};
pub use role_gate::{AdminUser, Anonymous, AuthUser, CustomerUser, RoleGate};
