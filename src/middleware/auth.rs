use axum::{extract::FromRequestParts, http::header};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppError, services::auth_service::decode_token, state::AppState};

/// The three principal kinds a token can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Admin,
    Customer,
    Owner,
}

impl PrincipalKind {
    /// Precedence used by the unified login. Admin comes first so the
    /// configured credential always wins over a stored contact collision.
    pub const LOGIN_ORDER: [PrincipalKind; 3] = [
        PrincipalKind::Admin,
        PrincipalKind::Customer,
        PrincipalKind::Owner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Admin => "admin",
            PrincipalKind::Customer => "customer",
            PrincipalKind::Owner => "owner",
        }
    }
}

/// An authenticated caller. The administrator carries no id because it is
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Customer(Uuid),
    Owner(Uuid),
    Admin,
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::Customer(_) => PrincipalKind::Customer,
            Principal::Owner(_) => PrincipalKind::Owner,
            Principal::Admin => PrincipalKind::Admin,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            Principal::Customer(id) | Principal::Owner(id) => Some(*id),
            Principal::Admin => None,
        }
    }
}

pub fn require_customer(principal: &Principal) -> Result<Uuid, AppError> {
    match principal {
        Principal::Customer(id) => Ok(*id),
        _ => Err(AppError::forbidden("Only customers can perform this action")),
    }
}

pub fn require_owner(principal: &Principal) -> Result<Uuid, AppError> {
    match principal {
        Principal::Owner(id) => Ok(*id),
        _ => Err(AppError::forbidden("Only hotel owners can perform this action")),
    }
}

pub fn require_admin(principal: &Principal) -> Result<(), AppError> {
    match principal {
        Principal::Admin => Ok(()),
        _ => Err(AppError::forbidden("Admin access required")),
    }
}

fn bearer_token(value: &str) -> Result<&str, AppError> {
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
        .trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized("Missing bearer token".into()));
    }
    Ok(token)
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = bearer_token(auth_str)?;

        decode_token(&state.config.jwt_secret, token)
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))
    }
}
