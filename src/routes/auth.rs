use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, OwnerSignupRequest, RegisterCustomerRequest},
    error::AppResult,
    middleware::json::AppJson,
    models::{Customer, HotelOwner},
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_customer))
        .route("/login", post(customer_login))
}

pub fn owners_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(owner_signup))
        .route("/login", post(owner_login))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(common_login))
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = ApiResponse<Customer>),
        (status = 400, description = "Missing fields or contact already registered"),
    ),
    tag = "Auth"
)]
pub async fn register_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterCustomerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Customer>>)> {
    let res = auth_service::register_customer(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Customer token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn customer_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let res = auth_service::customer_login(&state, payload).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/api/owners/signup",
    request_body = OwnerSignupRequest,
    responses(
        (status = 201, description = "Hotel owner registered", body = ApiResponse<HotelOwner>),
        (status = 400, description = "Missing fields or contact already registered"),
    ),
    tag = "Auth"
)]
pub async fn owner_signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<OwnerSignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<HotelOwner>>)> {
    let res = auth_service::owner_signup(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    post,
    path = "/api/owners/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Hotel owner token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn owner_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let res = auth_service::owner_login(&state, payload).await?;
    Ok(Json(res))
}

/// Tries the administrator, then customers, then hotel owners.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token for whichever principal matched", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn common_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let res = auth_service::common_login(&state, payload).await?;
    Ok(Json(res))
}
