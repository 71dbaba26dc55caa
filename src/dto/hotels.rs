use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ApprovalStatus, Food, Hotel};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterHotelRequest {
    pub hotel_name: String,
    pub location: String,
    #[serde(alias = "food_type")]
    pub cuisine: String,
    /// `HH:MM` or `HH:MM:SS`
    pub open_time: String,
    pub close_time: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HotelStatusQuery {
    pub hotel_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelStatus {
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub status: ApprovalStatus,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelList {
    pub items: Vec<Hotel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelCount {
    pub count: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HotelSearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelSuggestion {
    pub id: Uuid,
    pub hotel_name: String,
    pub status: ApprovalStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelSuggestionList {
    pub items: Vec<HotelSuggestion>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelFoods {
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub cuisine: String,
    pub foods: Vec<Food>,
}
