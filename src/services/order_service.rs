use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{OrderLineRequest, OrderList, OrderWithItems, PlaceOrderRequest},
    entity::{
        cart_items::{Column as CartItemCol, Entity as CartItems},
        carts::{Column as CartCol, Entity as Carts},
        foods::Entity as Foods,
        hotels::Entity as Hotels,
        order_items::{self, Column as OrderItemCol, Entity as OrderItems},
        orders::{self, Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::{Principal, require_customer},
    models::{MAX_LINE_QUANTITY, Order, OrderItem},
    response::{ApiResponse, Meta},
    services::filters::non_blank,
    state::AppState,
};

/// Prices frozen onto one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub unit_price: i64,
    /// Line amount: `unit_price * quantity`.
    pub price_at_time: i64,
}

/// Shape checks that need no database access.
pub fn validate_order_request(payload: &PlaceOrderRequest) -> AppResult<()> {
    let delivery = [
        ("name", &payload.name),
        ("mobile", &payload.mobile),
        ("address", &payload.address),
        ("payment_method", &payload.payment_method),
    ];
    if let Some((field, _)) = delivery.iter().find(|(_, v)| non_blank(v).is_none()) {
        return Err(AppError::validation(format!("{field} is required")));
    }

    if payload.items.is_empty() {
        return Err(AppError::validation("Order has no items"));
    }

    let mut seen = HashSet::new();
    for line in &payload.items {
        if line.qty < 1 {
            return Err(AppError::validation(format!(
                "Quantity for food {} must be at least 1",
                line.food_id
            )));
        }
        if line.qty > MAX_LINE_QUANTITY {
            return Err(AppError::validation(format!(
                "Quantity for food {} cannot exceed {MAX_LINE_QUANTITY}",
                line.food_id
            )));
        }
        if !seen.insert(line.food_id) {
            return Err(AppError::validation(format!(
                "Food {} appears more than once",
                line.food_id
            )));
        }
    }
    Ok(())
}

/// Prices a line from the catalog. A client-sent unit price must agree with
/// the catalog; it is never used as the stored price.
pub fn price_line(catalog_price: i64, line: &OrderLineRequest) -> AppResult<PricedLine> {
    if let Some(client_price) = line.price {
        if client_price != catalog_price {
            return Err(AppError::validation(format!(
                "Price mismatch for food {}: current price is {catalog_price}",
                line.food_id
            )));
        }
    }

    let price_at_time = catalog_price
        .checked_mul(i64::from(line.qty))
        .ok_or_else(|| AppError::validation("Line amount is too large"))?;

    Ok(PricedLine {
        unit_price: catalog_price,
        price_at_time,
    })
}

pub fn check_declared_total(declared: Option<i64>, computed: i64) -> AppResult<()> {
    match declared {
        Some(total) if total != computed => Err(AppError::validation(format!(
            "Price mismatch: order total is {computed}"
        ))),
        _ => Ok(()),
    }
}

/// Places an order in one transaction. The order row is written first and
/// every line after it; any failure drops the transaction uncommitted, which
/// rolls back the order together with the lines already inserted.
pub async fn place_order(
    state: &AppState,
    principal: &Principal,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let customer_id = require_customer(principal)?;
    validate_order_request(&payload)?;

    let txn = state.orm.begin().await?;

    let order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        name: Set(payload.name.trim().to_string()),
        mobile: Set(payload.mobile.trim().to_string()),
        address: Set(payload.address.trim().to_string()),
        payment_method: Set(payload.payment_method.trim().to_string()),
        total_amount: Set(0),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(payload.items.len());
    for (line_no, line) in (0_i32..).zip(&payload.items) {
        let (food, hotel) = Foods::find_by_id(line.food_id)
            .find_also_related(Hotels)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Food {} not found", line.food_id)))?;
        let hotel =
            hotel.ok_or_else(|| AppError::not_found(format!("Food {} not found", line.food_id)))?;
        if !hotel.status.accepts_food() {
            return Err(AppError::forbidden(format!(
                "{} is not accepting orders",
                hotel.name
            )));
        }

        let priced = price_line(food.price, line)?;
        let item = order_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            food_id: Set(Some(food.id)),
            hotel_id: Set(hotel.id),
            food_name: Set(food.name),
            quantity: Set(line.qty),
            unit_price: Set(priced.unit_price),
            price_at_time: Set(priced.price_at_time),
            line_no: Set(line_no),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(item);
    }

    let total = items
        .iter()
        .try_fold(0_i64, |acc, item| acc.checked_add(item.price_at_time))
        .ok_or_else(|| AppError::validation("Order total is too large"))?;
    check_declared_total(payload.total, total)?;

    let mut active: orders::ActiveModel = order.into();
    active.total_amount = Set(total);
    let order = active.update(&txn).await?;

    if let Some(cart) = Carts::find()
        .filter(CartCol::CustomerId.eq(customer_id))
        .one(&txn)
        .await?
    {
        let ordered: Vec<Uuid> = payload.items.iter().map(|l| l.food_id).collect();
        CartItems::delete_many()
            .filter(CartItemCol::CartId.eq(cart.id))
            .filter(CartItemCol::FoodId.is_in(ordered))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        customer_id = %customer_id,
        total_amount = order.total_amount,
        lines = items.len(),
        "order placed"
    );
    audit::record(
        state,
        principal,
        "order_place",
        "orders",
        serde_json::json!({ "order_id": order.id, "total_amount": order.total_amount }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems {
            order: order.into(),
            items: items.into_iter().map(OrderItem::from).collect(),
        },
        Some(Meta::empty()),
    ))
}

async fn items_by_order<C: ConnectionTrait>(
    conn: &C,
    order_ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<OrderItem>>> {
    let mut grouped: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(grouped);
    }
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .order_by_asc(OrderItemCol::LineNo)
        .order_by_asc(OrderItemCol::Id)
        .all(conn)
        .await?;
    for item in items {
        grouped.entry(item.order_id).or_default().push(item.into());
    }
    Ok(grouped)
}

/// One of `customer_id`'s orders with its frozen lines.
pub async fn find_customer_order<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
    order_id: Uuid,
) -> AppResult<OrderWithItems> {
    let order = Orders::find_by_id(order_id)
        .filter(OrderCol::CustomerId.eq(customer_id))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::LineNo)
        .order_by_asc(OrderItemCol::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(OrderWithItems {
        order: order.into(),
        items,
    })
}

pub async fn list_orders(
    state: &AppState,
    principal: &Principal,
) -> AppResult<ApiResponse<OrderList>> {
    let customer_id = require_customer(principal)?;

    let orders = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut grouped = items_by_order(&state.orm, orders.iter().map(|o| o.id).collect()).await?;
    let items: Vec<OrderWithItems> = orders
        .into_iter()
        .map(|order| OrderWithItems {
            items: grouped.remove(&order.id).unwrap_or_default(),
            order: Order::from(order),
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    principal: &Principal,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let customer_id = require_customer(principal)?;
    let data = find_customer_order(&state.orm, customer_id, id).await?;
    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: Vec<OrderLineRequest>) -> PlaceOrderRequest {
        PlaceOrderRequest {
            name: "Asha".into(),
            mobile: "9999999999".into(),
            address: "12 Lake Road".into(),
            payment_method: "upi".into(),
            total: None,
            items,
        }
    }

    fn line(qty: i32, price: Option<i64>) -> OrderLineRequest {
        OrderLineRequest {
            food_id: Uuid::new_v4(),
            qty,
            price,
        }
    }

    #[test]
    fn line_amount_is_catalog_price_times_quantity() {
        let priced = price_line(120, &line(3, None)).unwrap();
        assert_eq!(
            priced,
            PricedLine {
                unit_price: 120,
                price_at_time: 360
            }
        );
    }

    #[test]
    fn tampered_client_price_is_rejected_not_stored() {
        let err = price_line(120, &line(1, Some(1))).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Price mismatch")));
        assert!(price_line(120, &line(1, Some(120))).is_ok());
    }

    #[test]
    fn declared_total_must_match_computed_total() {
        assert!(check_declared_total(None, 500).is_ok());
        assert!(check_declared_total(Some(500), 500).is_ok());
        assert!(matches!(
            check_declared_total(Some(1), 500),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_empty_orders_and_bad_quantities() {
        assert!(matches!(
            validate_order_request(&request(vec![])),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_order_request(&request(vec![line(0, None)])),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_order_request(&request(vec![line(MAX_LINE_QUANTITY + 1, None)])),
            Err(AppError::Validation(_))
        ));
        assert!(validate_order_request(&request(vec![line(2, None)])).is_ok());
        assert!(validate_order_request(&request(vec![line(MAX_LINE_QUANTITY, None)])).is_ok());
    }

    #[test]
    fn rejects_repeated_food_and_blank_delivery_fields() {
        let repeated = line(1, None);
        let twice = vec![
            OrderLineRequest { ..repeated },
            OrderLineRequest {
                food_id: repeated.food_id,
                qty: 2,
                price: None,
            },
        ];
        assert!(matches!(
            validate_order_request(&request(twice)),
            Err(AppError::Validation(_))
        ));

        let mut blank = request(vec![line(1, None)]);
        blank.address = "   ".into();
        let err = validate_order_request(&blank).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("address")));
    }
}
