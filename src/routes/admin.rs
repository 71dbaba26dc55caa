use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        admin::{AdminHotelQuery, DashboardCounts},
        auth::{LoginRequest, LoginResponse},
        hotels::HotelList,
    },
    error::AppResult,
    middleware::{auth::Principal, json::AppJson},
    models::Hotel,
    response::ApiResponse,
    services::{admin_service, auth_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_login))
        .route("/dashboard-counts", get(dashboard_counts))
        .route("/hotels", get(list_hotels))
        .route("/hotels/{id}", delete(delete_hotel))
        .route("/hotels/{id}/approve", post(approve_hotel))
        .route("/hotels/{id}/reject", post(reject_hotel))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Administrator token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Admin"
)]
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let res = auth_service::admin_login(&state, payload).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard-counts",
    responses(
        (status = 200, description = "Hotel counts per approval state", body = ApiResponse<DashboardCounts>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard_counts(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ApiResponse<DashboardCounts>>> {
    let res = admin_service::dashboard_counts(&state, &principal).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/admin/hotels",
    params(
        ("status" = Option<String>, Query, description = "pending, approved or rejected")
    ),
    responses(
        (status = 200, description = "Hotels, optionally in one state", body = ApiResponse<HotelList>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_hotels(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<AdminHotelQuery>,
) -> AppResult<Json<ApiResponse<HotelList>>> {
    let res = admin_service::list_hotels(&state, &principal, query).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/api/admin/hotels/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel approved", body = ApiResponse<Hotel>),
        (status = 404, description = "Hotel not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn approve_hotel(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    let res = admin_service::approve_hotel(&state, &principal, id).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/api/admin/hotels/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel rejected", body = ApiResponse<Hotel>),
        (status = 404, description = "Hotel not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reject_hotel(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    let res = admin_service::reject_hotel(&state, &principal, id).await?;
    Ok(Json(res))
}

#[utoipa::path(
    delete,
    path = "/api/admin/hotels/{id}",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel and its menu deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Hotel not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_hotel(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let res = admin_service::delete_hotel(&state, &principal, id).await?;
    Ok(Json(res))
}
