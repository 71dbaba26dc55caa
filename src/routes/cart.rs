use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartItemQuantity, CartView, UpdateCartItemRequest},
    error::AppResult,
    middleware::{auth::Principal, json::AppJson},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_to_cart))
        .route("/{customer_id}", get(get_cart))
        .route("/items/{id}", patch(update_cart_item).delete(remove_cart_item))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "One unit added; returns the line's new quantity", body = ApiResponse<CartItemQuantity>),
        (status = 403, description = "Caller is not a customer"),
        (status = 404, description = "Food not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(payload): AppJson<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartItemQuantity>>> {
    let res = cart_service::add_to_cart(&state, &principal, payload).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/cart/{customer_id}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Cart lines with food and hotel details", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let res = cart_service::get_cart(&state, customer_id).await?;
    Ok(Json(res))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartItemQuantity>),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Item not found"),
    ),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartItemQuantity>>> {
    let res = cart_service::update_cart_item(&state, id, payload).await?;
    Ok(Json(res))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Item not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let res = cart_service::remove_cart_item(&state, id).await?;
    Ok(Json(res))
}
