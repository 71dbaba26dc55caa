use sea_orm::entity::prelude::*;

/// A frozen order line. `hotel_id`, `food_name` and the prices are copied at
/// placement time; `food_id` is nulled when the food is later deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub food_id: Option<Uuid>,
    pub hotel_id: Uuid,
    pub food_name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub price_at_time: i64,
    /// Zero-based position of the line within its order.
    pub line_no: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_delete = "Cascade"
    )]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
