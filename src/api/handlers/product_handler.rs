//! Product catalog.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::middleware::AuthUser;
use crate::api::AppState;
use crate::domain::Product;
use crate::errors::AppResult;

pub fn product_routes() -> Router<AppState> {
    Router::new().route("/products/", get(list_products))
}

/// List products
#[utoipa::path(
    get,
    path = "/products/",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 303, description = "Not signed in")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(state.products().list_products().await?))
}
