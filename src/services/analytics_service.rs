use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    dto::analytics::{BestSeller, HotelAnalytics, MonthlyPoint},
    error::{AppError, AppResult},
    middleware::auth::{Principal, require_owner},
    response::{ApiResponse, Meta},
    services::hotel_service::find_owned_by_id,
    state::AppState,
};

const BEST_SELLER_LIMIT: usize = 5;

/// One sold line of a hotel, as frozen at order time.
#[derive(Debug, Clone, FromRow)]
pub struct SalesRow {
    pub order_id: Uuid,
    pub food_name: String,
    pub quantity: i32,
    pub price_at_time: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SalesSummary {
    pub total_revenue: i64,
    pub total_orders: i64,
    pub total_items_sold: i64,
    pub chart_data: Vec<MonthlyPoint>,
    pub best_sellers: Vec<BestSeller>,
}

#[derive(Default)]
struct MonthBucket {
    revenue: i64,
    orders: HashSet<Uuid>,
}

/// Folds sold lines into totals, a month-by-month series in calendar order,
/// and the best sellers by units sold.
pub fn summarize(rows: &[SalesRow]) -> AppResult<SalesSummary> {
    let too_large = || AppError::validation("Revenue is too large to report");
    let mut summary = SalesSummary::default();
    let mut orders = HashSet::new();
    let mut months: BTreeMap<(i32, u32), (String, MonthBucket)> = BTreeMap::new();
    let mut sold: HashMap<&str, i64> = HashMap::new();

    for row in rows {
        summary.total_revenue = summary
            .total_revenue
            .checked_add(row.price_at_time)
            .ok_or_else(too_large)?;
        summary.total_items_sold += i64::from(row.quantity);
        orders.insert(row.order_id);

        let (_, bucket) = months
            .entry((row.created_at.year(), row.created_at.month()))
            .or_insert_with(|| (row.created_at.format("%b %Y").to_string(), MonthBucket::default()));
        bucket.revenue = bucket.revenue.checked_add(row.price_at_time).ok_or_else(too_large)?;
        bucket.orders.insert(row.order_id);

        *sold.entry(row.food_name.as_str()).or_default() += i64::from(row.quantity);
    }

    summary.total_orders = orders.len() as i64;
    summary.chart_data = months
        .into_values()
        .map(|(month, bucket)| MonthlyPoint {
            month,
            revenue: bucket.revenue,
            orders: bucket.orders.len() as i64,
        })
        .collect();

    let mut best: Vec<BestSeller> = sold
        .into_iter()
        .map(|(name, sold)| BestSeller {
            name: name.to_string(),
            sold,
        })
        .collect();
    best.sort_by(|a, b| b.sold.cmp(&a.sold).then_with(|| a.name.cmp(&b.name)));
    best.truncate(BEST_SELLER_LIMIT);
    summary.best_sellers = best;

    Ok(summary)
}

/// Sales dashboard for one of the caller's hotels. Reads only the snapshot
/// columns on order lines, so deleted foods still count.
pub async fn hotel_analytics(
    state: &AppState,
    principal: &Principal,
    hotel_id: Uuid,
) -> AppResult<ApiResponse<HotelAnalytics>> {
    let owner_id = require_owner(principal)?;
    let hotel = find_owned_by_id(&state.orm, owner_id, hotel_id).await?;

    let rows = sqlx::query_as::<_, SalesRow>(
        r#"
        SELECT oi.order_id, oi.food_name, oi.quantity, oi.price_at_time, o.created_at
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        WHERE oi.hotel_id = $1
        ORDER BY o.created_at
        "#,
    )
    .bind(hotel.id)
    .fetch_all(&state.pool)
    .await?;

    let summary = summarize(&rows)?;
    tracing::debug!(hotel_id = %hotel.id, lines = rows.len(), "analytics computed");

    Ok(ApiResponse::success(
        "Analytics",
        HotelAnalytics {
            hotel_id: hotel.id,
            hotel_name: hotel.name,
            total_revenue: summary.total_revenue,
            total_orders: summary.total_orders,
            total_items_sold: summary.total_items_sold,
            chart_data: summary.chart_data,
            best_sellers: summary.best_sellers,
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(order_id: Uuid, name: &str, qty: i32, amount: i64, y: i32, m: u32) -> SalesRow {
        SalesRow {
            order_id,
            food_name: name.to_string(),
            quantity: qty,
            price_at_time: amount,
            created_at: Utc.with_ymd_and_hms(y, m, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_history_is_all_zero() {
        assert_eq!(summarize(&[]).unwrap(), SalesSummary::default());
    }

    #[test]
    fn totals_use_frozen_line_amounts() {
        let order = Uuid::new_v4();
        let rows = vec![
            row(order, "Dosa", 1, 10, 2026, 3),
            row(order, "Idli", 2, 20, 2026, 3),
            row(Uuid::new_v4(), "Vada", 1, 30, 2026, 3),
        ];
        let summary = summarize(&rows).unwrap();
        assert_eq!(summary.total_revenue, 60);
        assert_eq!(summary.total_items_sold, 4);
        assert_eq!(summary.total_orders, 2);
    }

    #[test]
    fn months_are_chronological_across_years() {
        let rows = vec![
            row(Uuid::new_v4(), "Dosa", 1, 100, 2025, 12),
            row(Uuid::new_v4(), "Dosa", 1, 200, 2026, 1),
            row(Uuid::new_v4(), "Dosa", 1, 50, 2025, 2),
        ];
        let chart = summarize(&rows).unwrap().chart_data;
        let labels: Vec<&str> = chart.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(labels, ["Feb 2025", "Dec 2025", "Jan 2026"]);
        assert_eq!(chart[2].revenue, 200);
        assert_eq!(chart[2].orders, 1);
    }

    #[test]
    fn best_sellers_rank_by_units_then_name() {
        let order = Uuid::new_v4();
        let rows = vec![
            row(order, "Vada", 3, 30, 2026, 3),
            row(order, "Dosa", 3, 30, 2026, 3),
            row(order, "Idli", 5, 50, 2026, 3),
            row(order, "Upma", 1, 10, 2026, 3),
            row(order, "Poha", 1, 10, 2026, 3),
            row(order, "Puri", 1, 10, 2026, 3),
        ];
        let best = summarize(&rows).unwrap().best_sellers;
        let names: Vec<&str> = best.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Idli", "Dosa", "Vada", "Poha", "Puri"]);
        assert_eq!(best[0].sold, 5);
    }

    #[test]
    fn revenue_overflow_is_an_error_not_a_panic() {
        let big = i64::MAX / 2 + 1;
        let rows = vec![
            row(Uuid::new_v4(), "Thali", 1, big, 2026, 3),
            row(Uuid::new_v4(), "Thali", 1, big, 2026, 4),
        ];
        assert!(matches!(summarize(&rows), Err(AppError::Validation(_))));
    }
}
