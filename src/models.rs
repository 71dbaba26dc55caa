use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{customers, foods, hotel_owners, hotels, order_items, orders};

/// Largest catalog price, in minor units.
pub const MAX_PRICE: i64 = 100_000_000;

/// Largest quantity of one food in a cart line or order line.
pub const MAX_LINE_QUANTITY: i32 = 1_000;

/// Approval state of a hotel. Stored as a single text column so a hotel can
/// never be approved and rejected at once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ApprovalStatus {
    /// Approval is allowed from every state, including a previous rejection.
    pub fn approve(self) -> Self {
        ApprovalStatus::Approved
    }

    pub fn reject(self) -> Self {
        ApprovalStatus::Rejected
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    /// Only approved hotels may list food and show it to customers.
    pub fn accepts_food(self) -> bool {
        self == ApprovalStatus::Approved
    }

    pub fn owner_message(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Your hotel approval is pending",
            ApprovalStatus::Approved => "Your hotel is approved by admin",
            ApprovalStatus::Rejected => "Hotel rejected by admin",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contact: model.contact,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelOwner {
    pub id: Uuid,
    pub username: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

impl From<hotel_owners::Model> for HotelOwner {
    fn from(model: hotel_owners::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            contact: model.contact,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Hotel {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    pub cuisine: String,
    #[schema(value_type = String, example = "09:00:00")]
    pub open_time: NaiveTime,
    #[schema(value_type = String, example = "22:30:00")]
    pub close_time: NaiveTime,
    pub description: String,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<hotels::Model> for Hotel {
    fn from(model: hotels::Model) -> Self {
        Self {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            location: model.location,
            cuisine: model.cuisine,
            open_time: model.open_time,
            close_time: model.close_time,
            description: model.description,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Food {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub category: String,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<foods::Model> for Food {
    fn from(model: foods::Model) -> Self {
        Self {
            id: model.id,
            hotel_id: model.hotel_id,
            category: model.category,
            name: model.name,
            price: model.price,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub payment_method: String,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            name: model.name,
            mobile: model.mobile,
            address: model.address,
            payment_method: model.payment_method,
            total_amount: model.total_amount,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub food_id: Option<Uuid>,
    pub hotel_id: Uuid,
    pub food_name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub price_at_time: i64,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            food_id: model.food_id,
            hotel_id: model.hotel_id,
            food_name: model.food_name,
            quantity: model.quantity,
            unit_price: model.unit_price,
            price_at_time: model.price_at_time,
        }
    }
}
