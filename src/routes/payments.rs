use axum::{Json, Router, routing::post};

use crate::{
    dto::payments::{CreatePaymentRequest, PaymentOrder},
    error::AppResult,
    middleware::json::AppJson,
    response::ApiResponse,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/orders", post(create_payment_order))
}

#[utoipa::path(
    post,
    path = "/api/payments/orders",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Test-mode payment order", body = ApiResponse<PaymentOrder>),
        (status = 400, description = "Amount missing or not positive"),
    ),
    tag = "Payments"
)]
pub async fn create_payment_order(
    AppJson(payload): AppJson<CreatePaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentOrder>>> {
    let res = payment_service::create_payment_order(payload)?;
    Ok(Json(res))
}
