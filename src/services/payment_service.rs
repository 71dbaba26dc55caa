use serde_json::Value;
use uuid::Uuid;

use crate::{
    dto::payments::{CreatePaymentRequest, PaymentOrder},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
};

const ORDER_PREFIX: &str = "BR_TEST_";

fn parse_amount(value: Option<&Value>) -> AppResult<f64> {
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::validation("Amount required"))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation("Amount must be greater than zero"));
    }
    Ok(amount)
}

/// Test-mode gateway order. Nothing is charged and every order succeeds.
pub fn create_payment_order(payload: CreatePaymentRequest) -> AppResult<ApiResponse<PaymentOrder>> {
    let amount = parse_amount(payload.amount.as_ref())?;

    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    let order = PaymentOrder {
        order_id: format!("{ORDER_PREFIX}{suffix}"),
        amount,
        payment_status: "SUCCESS".to_string(),
        mode: "TEST".to_string(),
    };

    tracing::debug!(order_id = %order.order_id, amount, "test payment order created");
    Ok(ApiResponse::success("Payment order created", order, Some(Meta::empty())))
}
