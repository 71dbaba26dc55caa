use std::fmt::Write as _;

use sea_orm::EntityTrait;

use crate::{
    dto::{orders::OrderWithItems, receipts::{ReceiptSent, SendReceiptRequest}},
    entity::customers::Entity as Customers,
    error::{AppError, AppResult},
    middleware::auth::{Principal, require_customer},
    response::ApiResponse,
    services::order_service::find_customer_order,
    state::AppState,
};

const SUBJECT: &str = "BiteRoute Order Receipt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound receipt delivery.
pub trait ReceiptMailer: Send + Sync {
    fn send(&self, email: &ReceiptEmail) -> anyhow::Result<()>;
}

/// Writes receipts to the log instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl ReceiptMailer for LogMailer {
    fn send(&self, email: &ReceiptEmail) -> anyhow::Result<()> {
        tracing::info!(to = %email.to, subject = %email.subject, "receipt email\n{}", email.body);
        Ok(())
    }
}

/// Plain-text receipt for a stored order. Amounts are the frozen ones.
pub fn render_receipt(order: &OrderWithItems, registered_contact: &str) -> String {
    let o = &order.order;
    let mut out = String::new();

    let _ = writeln!(out, "BiteRoute");
    let _ = writeln!(out, "Order Receipt");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "Order ID: {}", o.id);
    let _ = writeln!(out, "Date: {}", o.created_at.format("%d %b %Y, %I:%M %p"));
    let _ = writeln!(out, "Customer Name: {}", o.name);
    let _ = writeln!(out, "Registered Contact: {registered_contact}");
    let _ = writeln!(out, "Mobile Number: {}", o.mobile);
    let _ = writeln!(out);
    let _ = writeln!(out, "Delivery Address:");
    for part in o.address.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "  {part}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Order Items");
    let _ = writeln!(out, "{}", "-".repeat(40));
    for item in &order.items {
        let _ = writeln!(
            out,
            "{:<24} x{:<4} {:>8}",
            item.food_name, item.quantity, item.price_at_time
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "Payment Method: {}", o.payment_method);
    let _ = writeln!(out, "Total Amount Paid: {}", o.total_amount);
    let _ = writeln!(out);
    let _ = writeln!(out, "Thank you for ordering with BiteRoute");
    out
}

/// Sends the caller's own order receipt to their registered contact.
pub async fn send_receipt(
    state: &AppState,
    principal: &Principal,
    payload: SendReceiptRequest,
) -> AppResult<ApiResponse<ReceiptSent>> {
    let customer_id = require_customer(principal)?;

    let customer = Customers::find_by_id(customer_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;
    let order = find_customer_order(&state.orm, customer_id, payload.order_id).await?;

    let email = ReceiptEmail {
        to: customer.contact.clone(),
        subject: SUBJECT.to_string(),
        body: render_receipt(&order, &customer.contact),
    };

    if let Err(err) = state.mailer.send(&email) {
        tracing::error!(error = %err, order_id = %payload.order_id, "failed to send receipt");
        return Err(AppError::Internal(err));
    }

    Ok(ApiResponse::success(
        "Receipt sent to registered contact",
        ReceiptSent {
            order_id: payload.order_id,
            sent_to: email.to,
        },
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, OrderItem};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample() -> OrderWithItems {
        let order_id = Uuid::new_v4();
        let line = |name: &str, qty: i32, unit: i64| OrderItem {
            id: Uuid::new_v4(),
            order_id,
            food_id: None,
            hotel_id: Uuid::new_v4(),
            food_name: name.to_string(),
            quantity: qty,
            unit_price: unit,
            price_at_time: unit * i64::from(qty),
        };
        OrderWithItems {
            order: Order {
                id: order_id,
                customer_id: Uuid::new_v4(),
                name: "Asha".into(),
                mobile: "9999999999".into(),
                address: "12 Lake Road, Indiranagar, Bengaluru".into(),
                payment_method: "upi".into(),
                total_amount: 340,
                created_at: Utc.with_ymd_and_hms(2026, 3, 4, 19, 5, 0).unwrap(),
            },
            items: vec![line("Masala Dosa", 2, 120), line("Filter Coffee", 1, 100)],
        }
    }

    #[test]
    fn receipt_lists_frozen_lines_and_total() {
        let text = render_receipt(&sample(), "asha@example.com");
        assert!(text.contains("Registered Contact: asha@example.com"));
        assert!(text.contains("Date: 04 Mar 2026, 07:05 PM"));
        assert!(text.contains("Masala Dosa"));
        assert!(text.contains("240"));
        assert!(text.contains("Total Amount Paid: 340"));
    }

    #[test]
    fn address_is_split_into_lines() {
        let text = render_receipt(&sample(), "asha@example.com");
        assert!(text.contains("  12 Lake Road\n  Indiranagar\n  Bengaluru\n"));
    }

    #[test]
    fn log_mailer_accepts_everything() {
        let email = ReceiptEmail {
            to: "asha@example.com".into(),
            subject: SUBJECT.into(),
            body: "hello".into(),
        };
        assert!(LogMailer.send(&email).is_ok());
    }
}
