use serde::Serialize;
use utoipa::ToSchema;

/// List metadata. Lists are returned whole, so only the row count is carried.
#[derive(Debug, Serialize, ToSchema, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub total: Option<i64>,
}

impl Meta {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total(total: usize) -> Self {
        Self {
            total: Some(total as i64),
        }
    }
}

/// Envelope shared by every JSON response, errors included.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
