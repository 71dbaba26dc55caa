use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::foods::{AddFoodRequest, FoodCreated, FoodSearchList, FoodSearchQuery},
    error::AppResult,
    middleware::{auth::Principal, json::AppJson},
    response::ApiResponse,
    services::food_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_food))
        .route("/search", get(search_food))
        .route("/{id}", delete(delete_food))
}

#[utoipa::path(
    post,
    path = "/api/foods",
    request_body = AddFoodRequest,
    responses(
        (status = 201, description = "Food added", body = ApiResponse<FoodCreated>),
        (status = 400, description = "Missing fields or invalid price"),
        (status = 403, description = "Hotel not approved"),
        (status = 404, description = "Hotel not found for this owner"),
    ),
    security(("bearer_auth" = [])),
    tag = "Foods"
)]
pub async fn add_food(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(payload): AppJson<AddFoodRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FoodCreated>>)> {
    let res = food_service::add_food(&state, &principal, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    delete,
    path = "/api/foods/{id}",
    params(
        ("id" = Uuid, Path, description = "Food ID")
    ),
    responses(
        (status = 200, description = "Food deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Food belongs to another owner's hotel"),
        (status = 404, description = "Food not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Foods"
)]
pub async fn delete_food(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let res = food_service::delete_food(&state, &principal, id).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/foods/search",
    params(
        ("type" = String, Query, description = "Food category, exact match ignoring case"),
        ("food" = String, Query, description = "Substring of the food name"),
        ("location" = String, Query, description = "Substring of the hotel location")
    ),
    responses(
        (status = 200, description = "Foods of approved hotels", body = ApiResponse<FoodSearchList>),
        (status = 400, description = "type, food and location are required"),
    ),
    tag = "Foods"
)]
pub async fn search_food(
    State(state): State<AppState>,
    Query(query): Query<FoodSearchQuery>,
) -> AppResult<Json<ApiResponse<FoodSearchList>>> {
    let res = food_service::search_food(&state, query).await?;
    Ok(Json(res))
}
