use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    audit,
    dto::foods::{AddFoodRequest, FoodCreated, FoodSearchList, FoodSearchQuery, FoodSearchResult},
    entity::{
        foods::{self, Column as FoodCol, Entity as Foods},
        hotels::{self, Column as HotelCol, Entity as Hotels},
    },
    error::{AppError, AppResult},
    middleware::auth::{Principal, require_owner},
    models::{ApprovalStatus, MAX_PRICE},
    response::{ApiResponse, Meta},
    services::{
        filters::{contains_pattern, lower_eq, non_blank},
        hotel_service::find_owned_by_name,
    },
    state::AppState,
};

/// Prices are integer minor units; accepts a JSON number or a numeric string.
pub fn parse_price(value: &Value) -> AppResult<i64> {
    let price = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::validation("Price must be a whole number"))?;

    if price < 0 {
        return Err(AppError::validation("Price cannot be negative"));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation(format!("Price cannot exceed {MAX_PRICE}")));
    }
    Ok(price)
}

pub async fn add_food(
    state: &AppState,
    principal: &Principal,
    payload: AddFoodRequest,
) -> AppResult<ApiResponse<FoodCreated>> {
    let owner_id = require_owner(principal)?;

    let (Some(hotel_name), Some(category), Some(food_name)) = (
        non_blank(&payload.hotel_name),
        non_blank(&payload.category),
        non_blank(&payload.food_name),
    ) else {
        return Err(AppError::validation("All fields are required"));
    };
    let price = parse_price(&payload.price)?;

    let hotel = find_owned_by_name(&state.orm, owner_id, hotel_name)
        .await?
        .ok_or_else(|| AppError::not_found("Hotel not found or you don't have permission"))?;

    if !hotel.status.accepts_food() {
        return Err(AppError::forbidden("Hotel is not approved yet"));
    }

    let food = foods::ActiveModel {
        id: Set(Uuid::new_v4()),
        hotel_id: Set(hotel.id),
        category: Set(category.to_string()),
        name: Set(food_name.to_string()),
        price: Set(price),
        description: Set(payload.description.trim().to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(food_id = %food.id, hotel_id = %hotel.id, "food added");
    audit::record(
        state,
        principal,
        "food_create",
        "foods",
        serde_json::json!({ "food_id": food.id, "hotel_id": hotel.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Food added successfully",
        FoodCreated {
            food_id: food.id,
            hotel_id: hotel.id,
        },
        Some(Meta::empty()),
    ))
}

/// Deletes a food after checking the caller owns its hotel. Cart lines for
/// the food go with it; order lines keep their snapshot.
pub async fn delete_food(
    state: &AppState,
    principal: &Principal,
    food_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let owner_id = require_owner(principal)?;

    let (food, hotel) = Foods::find_by_id(food_id)
        .find_also_related(Hotels)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Food item not found"))?;
    let hotel = hotel.ok_or_else(|| AppError::not_found("Food item not found"))?;

    if hotel.owner_id != owner_id {
        return Err(AppError::forbidden(
            "Permission denied. You do not own this hotel.",
        ));
    }

    food.delete(&state.orm).await?;

    tracing::info!(food_id = %food_id, hotel_id = %hotel.id, "food deleted");
    audit::record(
        state,
        principal,
        "food_delete",
        "foods",
        serde_json::json!({ "food_id": food_id, "hotel_id": hotel.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Food item deleted successfully",
        serde_json::json!({ "food_id": food_id }),
        Some(Meta::empty()),
    ))
}

/// Customer search. Type, name and location are all required; only food of
/// approved hotels is returned.
pub async fn search_food(
    state: &AppState,
    query: FoodSearchQuery,
) -> AppResult<ApiResponse<FoodSearchList>> {
    let (Some(food_type), Some(food_name), Some(location)) = (
        query.food_type.as_deref().and_then(non_blank),
        query.food.as_deref().and_then(non_blank),
        query.location.as_deref().and_then(non_blank),
    ) else {
        return Err(AppError::validation("type, food, location required"));
    };

    let items = Foods::find()
        .select_only()
        .column_as(FoodCol::Id, "food_id")
        .column_as(FoodCol::HotelId, "hotel_id")
        .column_as(HotelCol::Name, "hotel_name")
        .column_as(HotelCol::Location, "location")
        .column_as(FoodCol::Name, "food_name")
        .column_as(FoodCol::Category, "food_type")
        .column_as(FoodCol::Price, "price")
        .column_as(FoodCol::Description, "description")
        .join(JoinType::InnerJoin, foods::Relation::Hotels.def())
        .filter(HotelCol::Status.eq(ApprovalStatus::Approved))
        .filter(Expr::col((hotels::Entity, HotelCol::Location)).ilike(contains_pattern(location)))
        .filter(lower_eq((foods::Entity, FoodCol::Category), food_type))
        .filter(Expr::col((foods::Entity, FoodCol::Name)).ilike(contains_pattern(food_name)))
        .order_by_asc(HotelCol::Name)
        .order_by_asc(FoodCol::Name)
        .into_model::<FoodSearchResult>()
        .all(&state.orm)
        .await?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Foods", FoodSearchList { items }, Some(meta)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_price(&json!(250)).unwrap(), 250);
        assert_eq!(parse_price(&json!(" 120 ")).unwrap(), 120);
        assert_eq!(parse_price(&json!(0)).unwrap(), 0);
    }

    #[test]
    fn rejects_negative_fractional_and_garbage() {
        for value in [json!(-5), json!(12.5), json!("ten"), json!(null), json!("-1")] {
            assert!(
                matches!(parse_price(&value), Err(AppError::Validation(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn price_is_capped() {
        assert_eq!(parse_price(&json!(MAX_PRICE)).unwrap(), MAX_PRICE);
        for value in [json!(MAX_PRICE + 1), json!(i64::MAX), json!("5000000000000000000")] {
            assert!(matches!(parse_price(&value), Err(AppError::Validation(_))));
        }
    }
}
