use sea_orm::entity::prelude::*;

use crate::models::ApprovalStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    pub cuisine: String,
    pub open_time: Time,
    pub close_time: Time,
    pub description: String,
    pub status: ApprovalStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel_owners::Entity",
        from = "Column::OwnerId",
        to = "super::hotel_owners::Column::Id",
        on_delete = "Cascade"
    )]
    HotelOwners,
    #[sea_orm(has_many = "super::foods::Entity")]
    Foods,
}

impl Related<super::hotel_owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelOwners.def()
    }
}

impl Related<super::foods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Foods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
