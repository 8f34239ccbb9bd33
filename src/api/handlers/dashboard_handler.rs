//! Landing pages and the customer's own profile.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::extractors::ValidatedForm;
use crate::api::middleware::{AdminUser, CustomerUser};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::forms::CustomerForm;
use crate::services::{CustomerHome, Dashboard};
use crate::types::CustomerFormContext;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/user/", get(user_page))
        .route("/profile_setting", get(profile).post(update_profile))
}

/// Admin dashboard
#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboard",
    responses(
        (status = 200, description = "All customers and orders with counts", body = Dashboard),
        (status = 303, description = "Not an admin")
    )
)]
pub async fn home(State(state): State<AppState>, _admin: AdminUser) -> AppResult<Json<Dashboard>> {
    Ok(Json(Dashboard::load(state.services.as_ref()).await?))
}

/// A customer's own orders
#[utoipa::path(
    get,
    path = "/user/",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Own orders with counts", body = CustomerHome),
        (status = 303, description = "Not a customer")
    )
)]
pub async fn user_page(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
) -> AppResult<Json<CustomerHome>> {
    let customer = state.customers().customer_for_user(user.id).await?;
    let orders = state.orders().orders_for_customer(customer.id).await?;
    Ok(Json(CustomerHome::new(orders)))
}

/// View own customer record
#[utoipa::path(
    get,
    path = "/profile_setting",
    tag = "Dashboard",
    responses((status = 200, body = CustomerFormContext))
)]
pub async fn profile(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
) -> AppResult<Json<CustomerFormContext>> {
    let customer = state.customers().customer_for_user(user.id).await?;
    Ok(Json(CustomerFormContext {
        customer: Some(customer),
    }))
}

/// Update own customer record. Re-renders rather than redirecting.
#[utoipa::path(
    post,
    path = "/profile_setting",
    tag = "Dashboard",
    request_body(content = CustomerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = CustomerFormContext),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    ValidatedForm(draft): ValidatedForm<CustomerForm>,
) -> AppResult<Json<CustomerFormContext>> {
    let customer = state.customers().update_profile(user.id, draft).await?;
    Ok(Json(CustomerFormContext {
        customer: Some(customer),
    }))
}
