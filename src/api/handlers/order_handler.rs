//! Order pages for administrators.

use axum::{
    extract::{FromRequest, Path, Request, State},
    response::{Json, Redirect},
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedForm;
use crate::api::middleware::AdminUser;
use crate::api::AppState;
use crate::config::PATH_HOME;
use crate::domain::{Order, OrderStatus};
use crate::errors::AppResult;
use crate::forms::{OrderForm, OrderFormset};
use crate::types::{OrderDeleteContext, OrderFormContext, OrderFormsetContext};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/create_order/", get(create_order_form).post(create_order))
        .route("/update_order/:id/", get(update_order_form).post(update_order))
        .route("/delete_order/:id/", get(confirm_delete_order).post(delete_order))
        .route("/place_order_cus/:id/", get(order_formset).post(place_orders))
}

async fn form_context(state: &AppState, order: Option<Order>) -> AppResult<OrderFormContext> {
    let (customer_service, product_service) = (state.customers(), state.products());
    let (customers, products) = tokio::try_join!(
        customer_service.list_customers(),
        product_service.list_products(),
    )?;

    Ok(OrderFormContext {
        order,
        customers,
        products,
        statuses: OrderStatus::ALL.to_vec(),
    })
}

/// Choices for a new order
#[utoipa::path(
    get,
    path = "/create_order/",
    tag = "Orders",
    responses((status = 200, body = OrderFormContext))
)]
pub async fn create_order_form(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<OrderFormContext>> {
    Ok(Json(form_context(&state, None).await?))
}

/// Create an order
#[utoipa::path(
    post,
    path = "/create_order/",
    tag = "Orders",
    request_body(content = OrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to /"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedForm(draft): ValidatedForm<OrderForm>,
) -> AppResult<Redirect> {
    state.orders().create_order(draft).await?;
    Ok(Redirect::to(PATH_HOME))
}

/// Order prefilled for editing
#[utoipa::path(
    get,
    path = "/update_order/{id}/",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, body = OrderFormContext),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn update_order_form(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderFormContext>> {
    let order = state.orders().get_order(id).await?;
    Ok(Json(form_context(&state, Some(order)).await?))
}

/// Replace an order's fields
#[utoipa::path(
    post,
    path = "/update_order/{id}/",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body(content = OrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirect to /"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    request: Request,
) -> AppResult<Redirect> {
    // An unknown order is a 404 whatever the body holds
    state.orders().get_order(id).await?;
    let ValidatedForm(draft) = ValidatedForm::<OrderForm>::from_request(request, &state).await?;

    state.orders().update_order(id, draft).await?;
    Ok(Redirect::to(PATH_HOME))
}

/// Deletion confirmation
#[utoipa::path(
    get,
    path = "/delete_order/{id}/",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, body = OrderDeleteContext),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn confirm_delete_order(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderDeleteContext>> {
    let item = state.orders().get_order(id).await?;
    Ok(Json(OrderDeleteContext { item }))
}

/// Delete an order
#[utoipa::path(
    post,
    path = "/delete_order/{id}/",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 303, description = "Deleted, redirect to /"),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    state.orders().delete_order(id).await?;
    Ok(Redirect::to(PATH_HOME))
}

/// Blank order formset for one customer
#[utoipa::path(
    get,
    path = "/place_order_cus/{id}/",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, body = OrderFormsetContext),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn order_formset(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderFormsetContext>> {
    let customer = state.customers().get_customer(id).await?;
    let products = state.products().list_products().await?;

    Ok(Json(OrderFormsetContext {
        customer,
        products,
        statuses: OrderStatus::ALL.to_vec(),
        extra: OrderFormset::EXTRA,
    }))
}

/// Place several orders for one customer. Blank rows are skipped.
#[utoipa::path(
    post,
    path = "/place_order_cus/{id}/",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = OrderFormset,
    responses(
        (status = 303, description = "Orders placed, redirect to /"),
        (status = 400, description = "Validation error keyed form-{index}-{field}"),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn place_orders(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    request: Request,
) -> AppResult<Redirect> {
    // The customer is resolved before the rows, so an unknown id is a 404
    state.customers().get_customer(id).await?;
    let ValidatedForm(rows) =
        ValidatedForm::<OrderFormset>::from_request(request, &state).await?;

    state.orders().place_orders(id, rows).await?;
    Ok(Redirect::to(PATH_HOME))
}
