mod common;

use biteroute_api::{
    dto::{
        admin::AdminHotelQuery,
        foods::{AddFoodRequest, FoodSearchQuery},
        hotels::{HotelSearchQuery, HotelStatusQuery},
    },
    error::AppError,
    middleware::auth::Principal,
    models::ApprovalStatus,
    services::{admin_service, food_service, hotel_service},
};

fn search(food_type: &str, food: &str, location: &str) -> FoodSearchQuery {
    FoodSearchQuery {
        food_type: Some(food_type.into()),
        food: Some(food.into()),
        location: Some(location.into()),
    }
}

#[tokio::test]
async fn approval_gates_the_menu() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (hotel_id, hotel_name) = common::pending_hotel(&state, &owner, "Mysuru").await?;

    let status = hotel_service::check_hotel_status(
        &state,
        &owner,
        HotelStatusQuery {
            hotel_name: Some(hotel_name.to_uppercase()),
        },
    )
    .await?;
    assert_eq!(status.data.expect("status").status, ApprovalStatus::Pending);

    let err = common::food(&state, &owner, &hotel_name, "Meals", "Thali", 200)
        .await
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Forbidden(_))));
    let err = hotel_service::hotel_foods(&state, &owner, hotel_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(msg) if msg.contains("pending")));

    admin_service::approve_hotel(&state, &Principal::Admin, hotel_id).await?;
    common::food(&state, &owner, &hotel_name, "Meals", "Thali", 200).await?;
    let menu = hotel_service::hotel_foods(&state, &owner, hotel_id).await?;
    assert_eq!(menu.data.expect("menu").foods.len(), 1);

    let rejected = admin_service::reject_hotel(&state, &Principal::Admin, hotel_id).await?;
    assert_eq!(rejected.data.expect("hotel").status, ApprovalStatus::Rejected);
    let err = hotel_service::hotel_foods(&state, &owner, hotel_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(msg) if msg.contains("rejected")));

    let approved = admin_service::approve_hotel(&state, &Principal::Admin, hotel_id).await?;
    assert_eq!(approved.data.expect("hotel").status, ApprovalStatus::Approved);
    Ok(())
}

#[tokio::test]
async fn owners_only_touch_their_own_hotels() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (intruder, _) = common::owner(&state).await?;
    let (hotel_id, hotel_name) = common::approved_hotel(&state, &owner, "Hubli").await?;
    let food_id = common::food(&state, &owner, &hotel_name, "Snacks", "Mirchi Bajji", 30).await?;

    let err = food_service::add_food(
        &state,
        &intruder,
        AddFoodRequest {
            hotel_name: hotel_name.clone(),
            category: "Snacks".into(),
            food_name: "Goli Bajji".into(),
            price: serde_json::json!(25),
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = food_service::delete_food(&state, &intruder, food_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = hotel_service::hotel_foods(&state, &intruder, hotel_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = hotel_service::register_hotel(
        &state,
        &owner,
        common::hotel_request(&hotel_name.to_lowercase(), "Hubli"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let count = hotel_service::hotel_count(&state, &owner).await?;
    assert_eq!(count.data.expect("count").count, 1);

    food_service::delete_food(&state, &owner, food_id).await?;
    let err = food_service::delete_food(&state, &owner, food_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn food_search_applies_every_filter() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let location = common::unique("Town");
    let (owner, _) = common::owner(&state).await?;
    let (open_id, open_hotel) = common::approved_hotel(&state, &owner, &location).await?;
    let (pending_id, _) = common::pending_hotel(&state, &owner, &location).await?;

    common::food(&state, &owner, &open_hotel, "Breakfast", "Masala Dosa", 120).await?;
    common::food(&state, &owner, &open_hotel, "Breakfast", "Rava Idli", 80).await?;
    common::food(&state, &owner, &open_hotel, "Meals", "Dosa Meal", 150).await?;

    let res = food_service::search_food(&state, search("breakfast", "DOSA", &location.to_lowercase())).await?;
    let items = res.data.expect("results").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].food_name, "Masala Dosa");
    assert_eq!(items[0].hotel_name, open_hotel);
    assert!(items.iter().all(|f| f.hotel_id != pending_id));

    admin_service::reject_hotel(&state, &Principal::Admin, open_id).await?;
    let res = food_service::search_food(&state, search("Breakfast", "Dosa", &location)).await?;
    assert!(res.data.expect("results").items.is_empty());

    admin_service::approve_hotel(&state, &Principal::Admin, open_id).await?;
    let res = food_service::search_food(&state, search("Breakfast", "Dosa", &location)).await?;
    let items = res.data.expect("results").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].hotel_id, open_id);

    let res = food_service::search_food(&state, search("Breakfast", "dosa", "nowhere-at-all")).await?;
    assert!(res.data.expect("results").items.is_empty());

    let res = food_service::search_food(&state, search("Breakfast", "%", &location)).await?;
    assert!(res.data.expect("results").items.is_empty());

    let err = food_service::search_food(
        &state,
        FoodSearchQuery {
            food_type: Some("Breakfast".into()),
            food: None,
            location: Some(location),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn admin_lists_counts_and_deletes_hotels() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (pending_id, pending_name) = common::pending_hotel(&state, &owner, "Udupi").await?;
    let (approved_id, _) = common::approved_hotel(&state, &owner, "Udupi").await?;

    let counts = admin_service::dashboard_counts(&state, &Principal::Admin)
        .await?
        .data
        .expect("counts");
    assert!(counts.pending >= 1 && counts.approved >= 1);
    assert_eq!(counts.total, counts.pending + counts.approved + counts.rejected);

    let pending = admin_service::list_hotels(
        &state,
        &Principal::Admin,
        AdminHotelQuery {
            status: Some(ApprovalStatus::Pending),
        },
    )
    .await?
    .data
    .expect("hotels")
    .items;
    assert!(pending.iter().any(|h| h.id == pending_id));
    assert!(pending.iter().all(|h| h.status == ApprovalStatus::Pending));

    let found = hotel_service::search_hotels(
        &state,
        HotelSearchQuery {
            q: Some(pending_name[6..].to_string()),
        },
    )
    .await?
    .data
    .expect("suggestions")
    .items;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, pending_id);

    admin_service::delete_hotel(&state, &Principal::Admin, approved_id).await?;
    let err = admin_service::delete_hotel(&state, &Principal::Admin, approved_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = admin_service::approve_hotel(&state, &owner, pending_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    Ok(())
}
