use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub food_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// A cart line row as read from the database.
#[derive(Debug, FromQueryResult)]
pub struct CartLineRow {
    pub id: Uuid,
    pub food_id: Uuid,
    pub food_name: String,
    pub price: i64,
    pub hotel_name: String,
    pub location: String,
    pub quantity: i32,
}

/// One cart line joined with its food and hotel.
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartLine {
    pub id: Uuid,
    pub food_id: Uuid,
    pub food_name: String,
    pub price: i64,
    pub hotel_name: String,
    pub location: String,
    pub quantity: i32,
    pub line_total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub cart_id: Option<Uuid>,
    pub customer_id: Uuid,
    pub items: Vec<CartLine>,
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemQuantity {
    pub id: Uuid,
    pub food_id: Uuid,
    pub quantity: i32,
}
