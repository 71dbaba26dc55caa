mod common;

use biteroute_api::{
    dto::{
        cart::AddToCartRequest,
        orders::{OrderLineRequest, PlaceOrderRequest},
        receipts::SendReceiptRequest,
    },
    entity::{AuditLogs, audit_logs},
    error::AppError,
    middleware::auth::Principal,
    services::{admin_service, analytics_service, cart_service, order_service, receipt_service},
    state::AppState,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

fn order(items: Vec<OrderLineRequest>) -> PlaceOrderRequest {
    PlaceOrderRequest {
        name: "Asha".into(),
        mobile: "9999999999".into(),
        address: "12 Lake Road, Bengaluru".into(),
        payment_method: "cod".into(),
        total: None,
        items,
    }
}

fn line(food_id: Uuid, qty: i32) -> OrderLineRequest {
    OrderLineRequest {
        food_id,
        qty,
        price: None,
    }
}

async fn order_count(state: &AppState, customer: &Principal) -> anyhow::Result<usize> {
    let list = order_service::list_orders(state, customer).await?;
    Ok(list.data.expect("orders").items.len())
}

#[tokio::test]
async fn order_freezes_catalog_prices_and_clears_the_cart() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (customer, _) = common::customer(&state).await?;
    let (_, hotel) = common::approved_hotel(&state, &owner, "Chennai").await?;
    let pongal = common::food(&state, &owner, &hotel, "Breakfast", "Pongal", 90).await?;
    let coffee = common::food(&state, &owner, &hotel, "Beverages", "Filter Coffee", 40).await?;

    cart_service::add_to_cart(&state, &customer, AddToCartRequest { food_id: pongal }).await?;
    cart_service::add_to_cart(&state, &customer, AddToCartRequest { food_id: coffee }).await?;

    let mut request = order(vec![
        OrderLineRequest {
            food_id: pongal,
            qty: 2,
            price: Some(90),
        },
        line(coffee, 3),
    ]);
    request.total = Some(300);
    let placed = order_service::place_order(&state, &customer, request)
        .await?
        .data
        .expect("order");

    assert_eq!(placed.order.total_amount, 300);
    let pongal_line = placed.items.iter().find(|i| i.food_id == Some(pongal)).expect("line");
    assert_eq!(pongal_line.unit_price, 90);
    assert_eq!(pongal_line.price_at_time, 180);
    assert_eq!(pongal_line.food_name, "Pongal");

    let cart = cart_service::get_cart(&state, customer.id().expect("id"))
        .await?
        .data
        .expect("cart");
    assert!(cart.items.is_empty());

    let fetched = order_service::get_order(&state, &customer, placed.order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(fetched.items.len(), 2);

    let audit = AuditLogs::find()
        .filter(audit_logs::Column::ActorId.eq(customer.id()))
        .filter(audit_logs::Column::Action.eq("order_place"))
        .one(&state.orm)
        .await?
        .expect("audit row");
    assert_eq!(audit.actor_role, "customer");
    assert_eq!(
        audit.metadata.expect("metadata")["order_id"],
        serde_json::json!(placed.order.id)
    );

    let (stranger, _) = common::customer(&state).await?;
    let err = order_service::get_order(&state, &stranger, placed.order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn order_lines_keep_the_requested_sequence() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (customer, _) = common::customer(&state).await?;
    let (_, hotel) = common::approved_hotel(&state, &owner, "Thanjavur").await?;
    let mut foods = Vec::new();
    for name in ["Vada", "Adai", "Kesari", "Idiyappam", "Bonda"] {
        foods.push(common::food(&state, &owner, &hotel, "Tiffin", name, 50).await?);
    }

    let requested: Vec<Uuid> = foods.iter().rev().copied().collect();
    let placed = order_service::place_order(
        &state,
        &customer,
        order(requested.iter().map(|id| line(*id, 1)).collect()),
    )
    .await?
    .data
    .expect("order");
    let placed_ids: Vec<Option<Uuid>> = placed.items.iter().map(|i| i.food_id).collect();
    let expected: Vec<Option<Uuid>> = requested.iter().copied().map(Some).collect();
    assert_eq!(placed_ids, expected);

    for _ in 0..2 {
        let fetched = order_service::get_order(&state, &customer, placed.order.id)
            .await?
            .data
            .expect("order");
        let ids: Vec<Option<Uuid>> = fetched.items.iter().map(|i| i.food_id).collect();
        assert_eq!(ids, expected);
    }

    let listed = order_service::list_orders(&state, &customer)
        .await?
        .data
        .expect("orders");
    let ids: Vec<Option<Uuid>> = listed.items[0].items.iter().map(|i| i.food_id).collect();
    assert_eq!(ids, expected);
    Ok(())
}

#[tokio::test]
async fn failed_orders_leave_nothing_behind() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (customer, _) = common::customer(&state).await?;
    let (_, hotel) = common::approved_hotel(&state, &owner, "Kolkata").await?;
    let rasgulla = common::food(&state, &owner, &hotel, "Sweets", "Rasgulla", 25).await?;

    let err = order_service::place_order(
        &state,
        &customer,
        order(vec![line(rasgulla, 1), line(Uuid::new_v4(), 1)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let tampered = order(vec![OrderLineRequest {
        food_id: rasgulla,
        qty: 4,
        price: Some(1),
    }]);
    let err = order_service::place_order(&state, &customer, tampered).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg.contains("Price mismatch")));

    let mut wrong_total = order(vec![line(rasgulla, 4)]);
    wrong_total.total = Some(4);
    let err = order_service::place_order(&state, &customer, wrong_total).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(order_count(&state, &customer).await?, 0);
    Ok(())
}

#[tokio::test]
async fn history_survives_hotel_deletion() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (customer, _) = common::customer(&state).await?;
    let (hotel_id, hotel) = common::approved_hotel(&state, &owner, "Lucknow").await?;
    let kebab = common::food(&state, &owner, &hotel, "Starters", "Galouti Kebab", 260).await?;

    let placed = order_service::place_order(&state, &customer, order(vec![line(kebab, 2)]))
        .await?
        .data
        .expect("order");

    admin_service::delete_hotel(&state, &Principal::Admin, hotel_id).await?;

    let after = order_service::get_order(&state, &customer, placed.order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(after.order.total_amount, 520);
    assert_eq!(after.items.len(), 1);
    let item = &after.items[0];
    assert_eq!(item.food_id, None);
    assert_eq!(item.hotel_id, hotel_id);
    assert_eq!(item.food_name, "Galouti Kebab");
    assert_eq!(item.unit_price, 260);
    assert_eq!(item.price_at_time, 520);

    let err = order_service::place_order(&state, &customer, order(vec![line(kebab, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn analytics_and_receipts_read_frozen_lines() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (owner, _) = common::owner(&state).await?;
    let (customer, contact) = common::customer(&state).await?;
    let (hotel_id, hotel) = common::approved_hotel(&state, &owner, "Hyderabad").await?;
    let biryani = common::food(&state, &owner, &hotel, "Meals", "Biryani", 10).await?;
    let haleem = common::food(&state, &owner, &hotel, "Meals", "Haleem", 10).await?;
    let kheer = common::food(&state, &owner, &hotel, "Sweets", "Kheer", 30).await?;

    let first = order_service::place_order(
        &state,
        &customer,
        order(vec![line(biryani, 1), line(haleem, 2)]),
    )
    .await?
    .data
    .expect("order");
    order_service::place_order(&state, &customer, order(vec![line(kheer, 1)])).await?;

    let stats = analytics_service::hotel_analytics(&state, &owner, hotel_id)
        .await?
        .data
        .expect("analytics");
    assert_eq!(stats.total_revenue, 60);
    assert_eq!(stats.total_items_sold, 4);
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.chart_data.len(), 1);
    assert_eq!(stats.chart_data[0].orders, 2);
    assert_eq!(stats.best_sellers[0].name, "Haleem");

    let (other_owner, _) = common::owner(&state).await?;
    let err = analytics_service::hotel_analytics(&state, &other_owner, hotel_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let sent = receipt_service::send_receipt(
        &state,
        &customer,
        SendReceiptRequest {
            order_id: first.order.id,
        },
    )
    .await?
    .data
    .expect("receipt");
    assert_eq!(sent.sent_to, contact);
    Ok(())
}
