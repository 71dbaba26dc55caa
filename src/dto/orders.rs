use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Order, OrderItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub payment_method: String,
    /// Total the client expects to pay. Checked against the catalog, never stored as sent.
    pub total: Option<i64>,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub food_id: Uuid,
    pub qty: i32,
    /// Unit price the client saw.
    pub price: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderWithItems>,
}
