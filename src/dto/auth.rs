use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::middleware::auth::PrincipalKind;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub contact: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct OwnerSignupRequest {
    pub username: String,
    pub contact: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Profile {
    pub id: Option<Uuid>,
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub role: PrincipalKind,
    pub token: String,
    pub profile: Profile,
}

/// JWT claims. `sub` is the principal's UUID, or `"admin"` for the
/// configured administrator.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: PrincipalKind,
    pub iat: usize,
    pub exp: usize,
}
