use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelAnalytics {
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub total_revenue: i64,
    pub total_orders: i64,
    pub total_items_sold: i64,
    pub chart_data: Vec<MonthlyPoint>,
    pub best_sellers: Vec<BestSeller>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct MonthlyPoint {
    /// e.g. `"Mar 2026"`
    pub month: String,
    pub revenue: i64,
    pub orders: i64,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct BestSeller {
    pub name: String,
    pub sold: i64,
}
