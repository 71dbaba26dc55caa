use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        analytics::HotelAnalytics,
        hotels::{
            HotelCount, HotelFoods, HotelList, HotelSearchQuery, HotelStatus, HotelStatusQuery,
            HotelSuggestionList, RegisterHotelRequest,
        },
    },
    error::AppResult,
    middleware::{auth::Principal, json::AppJson},
    models::Hotel,
    response::ApiResponse,
    services::{analytics_service, hotel_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_hotel))
        .route("/status", get(check_hotel_status))
        .route("/mine", get(my_hotels))
        .route("/count", get(hotel_count))
        .route("/search", get(search_hotels))
        .route("/{id}/foods", get(hotel_foods))
        .route("/{id}/analytics", get(hotel_analytics))
}

#[utoipa::path(
    post,
    path = "/api/hotels",
    request_body = RegisterHotelRequest,
    responses(
        (status = 201, description = "Hotel registered, pending approval", body = ApiResponse<Hotel>),
        (status = 400, description = "Missing fields, bad hours or duplicate name"),
        (status = 403, description = "Caller is not a hotel owner"),
    ),
    security(("bearer_auth" = [])),
    tag = "Hotels"
)]
pub async fn register_hotel(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(payload): AppJson<RegisterHotelRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Hotel>>)> {
    let res = hotel_service::register_hotel(&state, &principal, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    get,
    path = "/api/hotels/status",
    params(
        ("hotel_name" = String, Query, description = "Hotel name, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Approval state of the caller's hotel", body = ApiResponse<HotelStatus>),
        (status = 404, description = "No such hotel for this owner"),
    ),
    security(("bearer_auth" = [])),
    tag = "Hotels"
)]
pub async fn check_hotel_status(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<HotelStatusQuery>,
) -> AppResult<Json<ApiResponse<HotelStatus>>> {
    let res = hotel_service::check_hotel_status(&state, &principal, query).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/hotels/mine",
    responses(
        (status = 200, description = "Hotels owned by the caller", body = ApiResponse<HotelList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Hotels"
)]
pub async fn my_hotels(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ApiResponse<HotelList>>> {
    let res = hotel_service::my_hotels(&state, &principal).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/hotels/count",
    responses(
        (status = 200, description = "Number of hotels owned by the caller", body = ApiResponse<HotelCount>)
    ),
    security(("bearer_auth" = [])),
    tag = "Hotels"
)]
pub async fn hotel_count(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ApiResponse<HotelCount>>> {
    let res = hotel_service::hotel_count(&state, &principal).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/hotels/search",
    params(
        ("q" = Option<String>, Query, description = "Substring of the hotel name")
    ),
    responses(
        (status = 200, description = "Up to ten matching hotels", body = ApiResponse<HotelSuggestionList>)
    ),
    tag = "Hotels"
)]
pub async fn search_hotels(
    State(state): State<AppState>,
    Query(query): Query<HotelSearchQuery>,
) -> AppResult<Json<ApiResponse<HotelSuggestionList>>> {
    let res = hotel_service::search_hotels(&state, query).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/foods",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Menu of the caller's hotel", body = ApiResponse<HotelFoods>),
        (status = 403, description = "Hotel is pending or rejected"),
        (status = 404, description = "Hotel not found or not owned"),
    ),
    security(("bearer_auth" = [])),
    tag = "Hotels"
)]
pub async fn hotel_foods(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<HotelFoods>>> {
    let res = hotel_service::hotel_foods(&state, &principal, id).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/analytics",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Sales totals, monthly series and best sellers", body = ApiResponse<HotelAnalytics>),
        (status = 404, description = "Hotel not found or not owned"),
    ),
    security(("bearer_auth" = [])),
    tag = "Hotels"
)]
pub async fn hotel_analytics(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<HotelAnalytics>>> {
    let res = analytics_service::hotel_analytics(&state, &principal, id).await?;
    Ok(Json(res))
}
