use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    /// Amount as a JSON number or numeric string, e.g. `"105.00"`.
    #[schema(value_type = Object)]
    pub amount: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentOrder {
    pub order_id: String,
    pub amount: f64,
    pub payment_status: String,
    pub mode: String,
}
