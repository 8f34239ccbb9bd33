//! Customer pages for administrators.

use axum::{
    extract::{Path, Query, State},
    response::{Json, Redirect},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::ValidatedForm;
use crate::api::middleware::AdminUser;
use crate::api::AppState;
use crate::config::PATH_HOME;
use crate::domain::{OrderFilter, OrderFilterQuery};
use crate::errors::AppResult;
use crate::forms::CustomerForm;
use crate::services::CustomerOrders;
use crate::types::{CustomerDeleteContext, CustomerFormContext};

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customer/:id/", get(customer_detail))
        .route("/add_customer/", get(add_customer_form).post(add_customer))
        .route(
            "/delete_customer/:id/",
            get(confirm_delete_customer).post(delete_customer),
        )
}

/// Customer page: filtered orders plus the filter that was applied
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub page: CustomerOrders,
    pub filter: OrderFilter,
}

/// One customer with their orders, narrowed by the order filter
#[utoipa::path(
    get,
    path = "/customer/{id}/",
    tag = "Customers",
    params(("id" = Uuid, Path, description = "Customer id"), OrderFilterQuery),
    responses(
        (status = 200, body = CustomerDetail),
        (status = 400, description = "Invalid filter value"),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn customer_detail(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Query(query): Query<OrderFilterQuery>,
) -> AppResult<Json<CustomerDetail>> {
    let filter = OrderFilter::from_query(&query)?;
    let page = state.customers().customer_orders(id, filter.clone()).await?;

    Ok(Json(CustomerDetail { page, filter }))
}

/// Empty customer form
#[utoipa::path(
    get,
    path = "/add_customer/",
    tag = "Customers",
    responses((status = 200, body = CustomerFormContext))
)]
pub async fn add_customer_form(_admin: AdminUser) -> Json<CustomerFormContext> {
    Json(CustomerFormContext { customer: None })
}

/// Create a customer without a login identity
#[utoipa::path(
    post,
    path = "/add_customer/",
    tag = "Customers",
    request_body(content = CustomerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to /"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_customer(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedForm(draft): ValidatedForm<CustomerForm>,
) -> AppResult<Redirect> {
    state.customers().create_customer(draft).await?;
    Ok(Redirect::to(PATH_HOME))
}

/// Deletion confirmation
#[utoipa::path(
    get,
    path = "/delete_customer/{id}/",
    tag = "Customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, body = CustomerDeleteContext),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn confirm_delete_customer(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CustomerDeleteContext>> {
    let customer = state.customers().get_customer(id).await?;
    Ok(Json(CustomerDeleteContext { customer }))
}

/// Delete a customer and all of its orders
#[utoipa::path(
    post,
    path = "/delete_customer/{id}/",
    tag = "Customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 303, description = "Deleted, redirect to /"),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    state.customers().delete_customer(id).await?;
    Ok(Redirect::to(PATH_HOME))
}
