use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ApprovalStatus;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminHotelQuery {
    pub status: Option<ApprovalStatus>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
}
