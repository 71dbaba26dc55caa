use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFoodRequest {
    pub hotel_name: String,
    pub category: String,
    pub food_name: String,
    /// Integer minor units, as a JSON number or a numeric string.
    #[schema(value_type = Object)]
    pub price: Value,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FoodCreated {
    pub food_id: Uuid,
    pub hotel_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FoodSearchQuery {
    #[serde(rename = "type")]
    pub food_type: Option<String>,
    pub food: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, ToSchema, FromQueryResult)]
pub struct FoodSearchResult {
    pub food_id: Uuid,
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub location: String,
    pub food_name: String,
    pub food_type: String,
    pub price: i64,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FoodSearchList {
    pub items: Vec<FoodSearchResult>,
}
