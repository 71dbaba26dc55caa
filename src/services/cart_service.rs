use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, SqlErr, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, OnConflict};
use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{
        AddToCartRequest, CartItemQuantity, CartLine, CartLineRow, CartView, UpdateCartItemRequest,
    },
    entity::{
        cart_items::{self, Column as CartItemCol, Entity as CartItems},
        carts::{self, Column as CartCol, Entity as Carts},
        foods::{self, Column as FoodCol, Entity as Foods},
        hotels::Column as HotelCol,
    },
    error::{AppError, AppResult},
    middleware::auth::{Principal, require_customer},
    models::MAX_LINE_QUANTITY,
    response::{ApiResponse, Meta},
    state::AppState,
};

fn food_vanished(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::not_found("Food not found"),
        _ => AppError::OrmError(err),
    }
}

/// Prices cart rows at the current catalog price and sums them.
pub fn price_cart(rows: Vec<CartLineRow>) -> AppResult<(Vec<CartLine>, i64)> {
    let too_large = || AppError::validation("Cart total is too large");
    let mut total = 0_i64;
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let line_total = row
            .price
            .checked_mul(i64::from(row.quantity))
            .ok_or_else(too_large)?;
        total = total.checked_add(line_total).ok_or_else(too_large)?;
        lines.push(CartLine {
            id: row.id,
            food_id: row.food_id,
            food_name: row.food_name,
            price: row.price,
            hotel_name: row.hotel_name,
            location: row.location,
            quantity: row.quantity,
            line_total,
        });
    }
    Ok((lines, total))
}

/// Adds one unit of a food to the caller's cart. The cart row and the line
/// are both written with `ON CONFLICT` upserts, so concurrent adds for the
/// same customer and food accumulate instead of racing.
pub async fn add_to_cart(
    state: &AppState,
    principal: &Principal,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItemQuantity>> {
    let customer_id = require_customer(principal)?;

    let food_exists = Foods::find_by_id(payload.food_id)
        .one(&state.orm)
        .await?
        .is_some();
    if !food_exists {
        return Err(AppError::not_found("Food not found"));
    }

    let txn = state.orm.begin().await?;

    Carts::insert(carts::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        created_at: NotSet,
    })
    .on_conflict(OnConflict::column(CartCol::CustomerId).do_nothing().to_owned())
    .exec_without_returning(&txn)
    .await?;

    let cart = Carts::find()
        .filter(CartCol::CustomerId.eq(customer_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("cart missing after upsert")))?;

    CartItems::insert(cart_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        cart_id: Set(cart.id),
        food_id: Set(payload.food_id),
        quantity: Set(1),
        created_at: NotSet,
    })
    .on_conflict(
        OnConflict::columns([CartItemCol::CartId, CartItemCol::FoodId])
            .value(
                CartItemCol::Quantity,
                Expr::col((CartItems, CartItemCol::Quantity)).add(1),
            )
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await
    .map_err(food_vanished)?;

    let item = CartItems::find()
        .filter(CartItemCol::CartId.eq(cart.id))
        .filter(CartItemCol::FoodId.eq(payload.food_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("cart item missing after upsert")))?;
    if item.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::validation(format!(
            "A cart line cannot hold more than {MAX_LINE_QUANTITY} units"
        )));
    }

    txn.commit().await?;

    audit::record(
        state,
        principal,
        "cart_add",
        "cart_items",
        serde_json::json!({ "food_id": payload.food_id, "quantity": item.quantity }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to cart",
        CartItemQuantity {
            id: item.id,
            food_id: item.food_id,
            quantity: item.quantity,
        },
        None,
    ))
}

/// A customer's cart with food and hotel details per line. A customer who
/// never added anything gets an empty cart.
pub async fn get_cart(state: &AppState, customer_id: Uuid) -> AppResult<ApiResponse<CartView>> {
    let cart = Carts::find()
        .filter(CartCol::CustomerId.eq(customer_id))
        .one(&state.orm)
        .await?;

    let Some(cart) = cart else {
        return Ok(ApiResponse::success(
            "OK",
            CartView {
                cart_id: None,
                customer_id,
                items: Vec::new(),
                total: 0,
            },
            Some(Meta::total(0)),
        ));
    };

    let rows = CartItems::find()
        .select_only()
        .column_as(CartItemCol::Id, "id")
        .column_as(CartItemCol::FoodId, "food_id")
        .column_as(FoodCol::Name, "food_name")
        .column_as(FoodCol::Price, "price")
        .column_as(HotelCol::Name, "hotel_name")
        .column_as(HotelCol::Location, "location")
        .column_as(CartItemCol::Quantity, "quantity")
        .join(JoinType::InnerJoin, cart_items::Relation::Foods.def())
        .join(JoinType::InnerJoin, foods::Relation::Hotels.def())
        .filter(CartItemCol::CartId.eq(cart.id))
        .order_by_asc(CartItemCol::CreatedAt)
        .into_model::<CartLineRow>()
        .all(&state.orm)
        .await?;

    let (items, total) = price_cart(rows)?;
    let meta = Meta::total(items.len());

    Ok(ApiResponse::success(
        "OK",
        CartView {
            cart_id: Some(cart.id),
            customer_id,
            items,
            total,
        },
        Some(meta),
    ))
}

/// Sets an absolute quantity. Zero or negative quantities are rejected;
/// use `remove_cart_item` to drop a line.
pub async fn update_cart_item(
    state: &AppState,
    item_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItemQuantity>> {
    if payload.quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }
    if payload.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity cannot exceed {MAX_LINE_QUANTITY}"
        )));
    }

    let item = CartItems::find_by_id(item_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Item not found"))?;

    let mut active: cart_items::ActiveModel = item.into();
    active.quantity = Set(payload.quantity);
    let item = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        CartItemQuantity {
            id: item.id,
            food_id: item.food_id,
            quantity: item.quantity,
        },
        None,
    ))
}

pub async fn remove_cart_item(
    state: &AppState,
    item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CartItems::delete_by_id(item_id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Item not found"));
    }

    Ok(ApiResponse::success(
        "Removed",
        serde_json::json!({ "item_id": item_id }),
        Some(Meta::empty()),
    ))
}
