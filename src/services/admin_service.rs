use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        admin::{AdminHotelQuery, DashboardCounts},
        hotels::HotelList,
    },
    entity::hotels::{self, Column as HotelCol, Entity as Hotels},
    error::{AppError, AppResult},
    middleware::auth::{Principal, require_admin},
    models::{ApprovalStatus, Hotel},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn dashboard_counts(
    state: &AppState,
    principal: &Principal,
) -> AppResult<ApiResponse<DashboardCounts>> {
    require_admin(principal)?;

    let count_in = |status: ApprovalStatus| {
        Hotels::find()
            .filter(HotelCol::Status.eq(status))
            .count(&state.orm)
    };

    let data = DashboardCounts {
        total: Hotels::find().count(&state.orm).await?,
        approved: count_in(ApprovalStatus::Approved).await?,
        pending: count_in(ApprovalStatus::Pending).await?,
        rejected: count_in(ApprovalStatus::Rejected).await?,
    };
    Ok(ApiResponse::success("Dashboard counts", data, None))
}

pub async fn list_hotels(
    state: &AppState,
    principal: &Principal,
    query: AdminHotelQuery,
) -> AppResult<ApiResponse<HotelList>> {
    require_admin(principal)?;

    let mut finder = Hotels::find();
    if let Some(status) = query.status {
        finder = finder.filter(HotelCol::Status.eq(status));
    }

    let items: Vec<Hotel> = finder
        .order_by_desc(HotelCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Hotel::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Hotels", HotelList { items }, Some(meta)))
}

async fn transition(
    state: &AppState,
    principal: &Principal,
    hotel_id: Uuid,
    action: &'static str,
    next: fn(ApprovalStatus) -> ApprovalStatus,
) -> AppResult<hotels::Model> {
    require_admin(principal)?;

    let hotel = Hotels::find_by_id(hotel_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Hotel not found"))?;

    let from = hotel.status;
    let mut active: hotels::ActiveModel = hotel.into();
    active.status = Set(next(from));
    let hotel = active.update(&state.orm).await?;

    tracing::info!(
        hotel_id = %hotel.id,
        from = from.as_str(),
        to = hotel.status.as_str(),
        "hotel status changed"
    );
    audit::record(
        state,
        principal,
        action,
        "hotels",
        serde_json::json!({ "hotel_id": hotel.id, "from": from, "to": hotel.status }),
    )
    .await;

    Ok(hotel)
}

pub async fn approve_hotel(
    state: &AppState,
    principal: &Principal,
    hotel_id: Uuid,
) -> AppResult<ApiResponse<Hotel>> {
    let hotel = transition(state, principal, hotel_id, "hotel_approve", ApprovalStatus::approve).await?;
    Ok(ApiResponse::success("Hotel approved", hotel.into(), None))
}

pub async fn reject_hotel(
    state: &AppState,
    principal: &Principal,
    hotel_id: Uuid,
) -> AppResult<ApiResponse<Hotel>> {
    let hotel = transition(state, principal, hotel_id, "hotel_reject", ApprovalStatus::reject).await?;
    Ok(ApiResponse::success("Hotel rejected", hotel.into(), None))
}

/// Removes a hotel with its foods and their cart lines. Past order lines
/// keep their hotel snapshot.
pub async fn delete_hotel(
    state: &AppState,
    principal: &Principal,
    hotel_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    require_admin(principal)?;

    let hotel = Hotels::find_by_id(hotel_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Hotel not found"))?;
    let name = hotel.name.clone();
    hotel.delete(&state.orm).await?;

    tracing::info!(hotel_id = %hotel_id, "hotel deleted");
    audit::record(
        state,
        principal,
        "hotel_delete",
        "hotels",
        serde_json::json!({ "hotel_id": hotel_id, "hotel_name": name }),
    )
    .await;

    Ok(ApiResponse::success(
        "Hotel deleted",
        serde_json::json!({ "hotel_id": hotel_id }),
        Some(Meta::empty()),
    ))
}
