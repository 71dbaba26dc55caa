use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;

use crate::{
    audit,
    dto::hotels::{
        HotelCount, HotelFoods, HotelList, HotelSearchQuery, HotelStatus, HotelStatusQuery,
        HotelSuggestion, HotelSuggestionList, RegisterHotelRequest,
    },
    entity::{
        foods::{Column as FoodCol, Entity as Foods},
        hotels::{self, Column as HotelCol, Entity as Hotels},
    },
    error::{AppError, AppResult},
    middleware::auth::{Principal, require_owner},
    models::{ApprovalStatus, Hotel},
    response::{ApiResponse, Meta},
    services::filters::{contains_pattern, lower_eq, non_blank},
    state::AppState,
};

const SEARCH_LIMIT: u64 = 10;

/// Resolves an owner's hotel by name, case-insensitively.
pub async fn find_owned_by_name<C: ConnectionTrait>(
    conn: &C,
    owner_id: Uuid,
    hotel_name: &str,
) -> AppResult<Option<hotels::Model>> {
    let hotel = Hotels::find()
        .filter(HotelCol::OwnerId.eq(owner_id))
        .filter(lower_eq(HotelCol::Name, hotel_name))
        .one(conn)
        .await?;
    Ok(hotel)
}

/// Resolves a hotel by id and checks it belongs to `owner_id`.
pub async fn find_owned_by_id<C: ConnectionTrait>(
    conn: &C,
    owner_id: Uuid,
    hotel_id: Uuid,
) -> AppResult<hotels::Model> {
    Hotels::find_by_id(hotel_id)
        .filter(HotelCol::OwnerId.eq(owner_id))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Hotel not found or permission denied"))
}

pub fn parse_time(field: &str, value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| AppError::validation(format!("{field} must be HH:MM or HH:MM:SS")))
}

pub async fn register_hotel(
    state: &AppState,
    principal: &Principal,
    payload: RegisterHotelRequest,
) -> AppResult<ApiResponse<Hotel>> {
    let owner_id = require_owner(principal)?;

    let (Some(name), Some(location), Some(cuisine)) = (
        non_blank(&payload.hotel_name),
        non_blank(&payload.location),
        non_blank(&payload.cuisine),
    ) else {
        return Err(AppError::validation(
            "hotel_name, location and cuisine are required",
        ));
    };
    let open_time = parse_time("open_time", &payload.open_time)?;
    let close_time = parse_time("close_time", &payload.close_time)?;

    if find_owned_by_name(&state.orm, owner_id, name).await?.is_some() {
        return Err(AppError::validation(format!(
            "You already registered a hotel named {name}"
        )));
    }

    let hotel = hotels::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        name: Set(name.to_string()),
        location: Set(location.to_string()),
        cuisine: Set(cuisine.to_string()),
        open_time: Set(open_time),
        close_time: Set(close_time),
        description: Set(payload.description.trim().to_string()),
        status: Set(ApprovalStatus::Pending),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::validation(format!("You already registered a hotel named {name}"))
        }
        _ => AppError::OrmError(err),
    })?;

    tracing::info!(hotel_id = %hotel.id, owner_id = %owner_id, "hotel registered for approval");
    audit::record(
        state,
        principal,
        "hotel_register",
        "hotels",
        serde_json::json!({ "hotel_id": hotel.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Hotel registered successfully",
        hotel.into(),
        Some(Meta::empty()),
    ))
}

pub async fn check_hotel_status(
    state: &AppState,
    principal: &Principal,
    query: HotelStatusQuery,
) -> AppResult<ApiResponse<HotelStatus>> {
    let owner_id = require_owner(principal)?;
    let hotel_name = query
        .hotel_name
        .as_deref()
        .and_then(non_blank)
        .ok_or_else(|| AppError::validation("Hotel name is required"))?;

    let hotel = find_owned_by_name(&state.orm, owner_id, hotel_name)
        .await?
        .ok_or_else(|| AppError::not_found("Hotel not found. Please register your hotel first"))?;

    let data = HotelStatus {
        hotel_id: hotel.id,
        hotel_name: hotel.name,
        status: hotel.status,
        message: hotel.status.owner_message().to_string(),
    };
    Ok(ApiResponse::success(hotel.status.as_str(), data, None))
}

pub async fn my_hotels(
    state: &AppState,
    principal: &Principal,
) -> AppResult<ApiResponse<HotelList>> {
    let owner_id = require_owner(principal)?;
    let items: Vec<Hotel> = Hotels::find()
        .filter(HotelCol::OwnerId.eq(owner_id))
        .order_by_desc(HotelCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Hotel::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Hotels", HotelList { items }, Some(meta)))
}

pub async fn hotel_count(
    state: &AppState,
    principal: &Principal,
) -> AppResult<ApiResponse<HotelCount>> {
    let owner_id = require_owner(principal)?;
    let count = Hotels::find()
        .filter(HotelCol::OwnerId.eq(owner_id))
        .count(&state.orm)
        .await?;
    Ok(ApiResponse::success("Hotel count", HotelCount { count }, None))
}

/// Owner's view of one hotel's menu. Only available once approved.
pub async fn hotel_foods(
    state: &AppState,
    principal: &Principal,
    hotel_id: Uuid,
) -> AppResult<ApiResponse<HotelFoods>> {
    let owner_id = require_owner(principal)?;
    let hotel = find_owned_by_id(&state.orm, owner_id, hotel_id).await?;
    if !hotel.status.accepts_food() {
        return Err(AppError::forbidden(hotel.status.owner_message()));
    }

    let foods = Foods::find()
        .filter(FoodCol::HotelId.eq(hotel.id))
        .order_by_asc(FoodCol::Category)
        .order_by_asc(FoodCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ApiResponse::success(
        "Foods",
        HotelFoods {
            hotel_id: hotel.id,
            hotel_name: hotel.name,
            cuisine: hotel.cuisine,
            foods,
        },
        None,
    ))
}

/// Typeahead over hotel names. Bounded to the first ten matches by name.
pub async fn search_hotels(
    state: &AppState,
    query: HotelSearchQuery,
) -> AppResult<ApiResponse<HotelSuggestionList>> {
    let Some(q) = query.q.as_deref().and_then(non_blank) else {
        return Ok(ApiResponse::success(
            "Hotels",
            HotelSuggestionList { items: Vec::new() },
            Some(Meta::total(0)),
        ));
    };

    let items: Vec<HotelSuggestion> = Hotels::find()
        .filter(Expr::col(HotelCol::Name).ilike(contains_pattern(q)))
        .order_by_asc(HotelCol::Name)
        .limit(SEARCH_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|h| HotelSuggestion {
            id: h.id,
            hotel_name: h.name,
            status: h.status,
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Hotels",
        HotelSuggestionList { items },
        Some(meta),
    ))
}
