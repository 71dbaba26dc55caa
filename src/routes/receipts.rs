use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::receipts::{ReceiptSent, SendReceiptRequest},
    error::AppResult,
    middleware::{auth::Principal, json::AppJson},
    response::ApiResponse,
    services::receipt_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(send_receipt))
}

#[utoipa::path(
    post,
    path = "/api/receipts",
    request_body = SendReceiptRequest,
    responses(
        (status = 200, description = "Receipt sent to the registered contact", body = ApiResponse<ReceiptSent>),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Mail delivery failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn send_receipt(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(payload): AppJson<SendReceiptRequest>,
) -> AppResult<Json<ApiResponse<ReceiptSent>>> {
    let res = receipt_service::send_receipt(&state, &principal, payload).await?;
    Ok(Json(res))
}
