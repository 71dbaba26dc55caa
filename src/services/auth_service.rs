use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    config::AppConfig,
    dto::auth::{Claims, LoginRequest, LoginResponse, OwnerSignupRequest, Profile, RegisterCustomerRequest},
    entity::{
        customers::{self, Entity as Customers},
        hotel_owners::{self, Entity as HotelOwners},
    },
    error::{AppError, AppResult},
    middleware::auth::{Principal, PrincipalKind},
    models::{Customer, HotelOwner},
    response::{ApiResponse, Meta},
    services::filters::{lower_eq, non_blank},
    state::AppState,
};

const ADMIN_SUBJECT: &str = "admin";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(config: &AppConfig, principal: &Principal) -> AppResult<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(config.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let sub = match principal.id() {
        Some(id) => id.to_string(),
        None => ADMIN_SUBJECT.to_string(),
    };
    let claims = Claims {
        sub,
        role: principal.kind(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Token validation contract: `None` for anything invalid or expired.
pub fn decode_token(secret: &str, token: &str) -> Option<Principal> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    let claims = decoded.claims;

    match claims.role {
        PrincipalKind::Admin => (claims.sub == ADMIN_SUBJECT).then_some(Principal::Admin),
        PrincipalKind::Customer => Uuid::parse_str(&claims.sub).ok().map(Principal::Customer),
        PrincipalKind::Owner => Uuid::parse_str(&claims.sub).ok().map(Principal::Owner),
    }
}

fn required(value: &str) -> AppResult<&str> {
    non_blank(value).ok_or_else(|| AppError::validation("All fields are required"))
}

fn duplicate_contact(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::validation("Contact is already registered")
        }
        _ => AppError::OrmError(err),
    }
}

pub async fn register_customer(
    state: &AppState,
    payload: RegisterCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let name = required(&payload.name)?;
    let contact = required(&payload.contact)?;
    let password = required(&payload.password)?;

    let exist = Customers::find()
        .filter(lower_eq(customers::Column::Contact, contact))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::validation("Contact is already registered"));
    }

    let customer = customers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        contact: Set(contact.to_string()),
        password_hash: Set(hash_password(password)?),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(duplicate_contact)?;

    audit::record(
        state,
        &Principal::Customer(customer.id),
        "customer_register",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User registered successfully",
        customer.into(),
        None,
    ))
}

pub async fn owner_signup(
    state: &AppState,
    payload: OwnerSignupRequest,
) -> AppResult<ApiResponse<HotelOwner>> {
    let username = required(&payload.username)?;
    let contact = required(&payload.contact)?;
    let password = required(&payload.password)?;

    let exist = HotelOwners::find()
        .filter(lower_eq(hotel_owners::Column::Contact, contact))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::validation("Contact is already registered"));
    }

    let owner = hotel_owners::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        contact: Set(contact.to_string()),
        password_hash: Set(hash_password(password)?),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(duplicate_contact)?;

    audit::record(
        state,
        &Principal::Owner(owner.id),
        "owner_signup",
        "hotel_owners",
        serde_json::json!({ "owner_id": owner.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Hotel owner account created successfully",
        owner.into(),
        None,
    ))
}

/// One credential check for a single principal kind. `Ok(None)` means this
/// kind did not authenticate and the next kind may be tried.
async fn authenticate_as(
    state: &AppState,
    kind: PrincipalKind,
    contact: &str,
    password: &str,
) -> AppResult<Option<(Principal, Profile)>> {
    match kind {
        PrincipalKind::Admin => Ok(authenticate_admin(&state.config, contact, password)),
        PrincipalKind::Customer => {
            let customer = Customers::find()
                .filter(lower_eq(customers::Column::Contact, contact))
                .one(&state.orm)
                .await?;
            match customer {
                Some(c) if verify_password(password, &c.password_hash)? => Ok(Some((
                    Principal::Customer(c.id),
                    Profile {
                        id: Some(c.id),
                        name: c.name,
                        contact: c.contact,
                    },
                ))),
                _ => Ok(None),
            }
        }
        PrincipalKind::Owner => {
            let owner = HotelOwners::find()
                .filter(lower_eq(hotel_owners::Column::Contact, contact))
                .one(&state.orm)
                .await?;
            match owner {
                Some(o) if verify_password(password, &o.password_hash)? => Ok(Some((
                    Principal::Owner(o.id),
                    Profile {
                        id: Some(o.id),
                        name: o.username,
                        contact: o.contact,
                    },
                ))),
                _ => Ok(None),
            }
        }
    }
}

/// Admin credentials come from configuration only; no store lookup.
pub fn authenticate_admin(
    config: &AppConfig,
    contact: &str,
    password: &str,
) -> Option<(Principal, Profile)> {
    let admin = config.admin.as_ref()?;
    admin.matches(contact, password).then(|| {
        (
            Principal::Admin,
            Profile {
                id: None,
                name: "Admin".to_string(),
                contact: admin.email.clone(),
            },
        )
    })
}

async fn login_with(
    state: &AppState,
    kinds: &[PrincipalKind],
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let contact = required(&payload.contact)?;
    if payload.password.is_empty() {
        return Err(AppError::validation("All fields are required"));
    }

    for kind in kinds {
        let Some((principal, profile)) =
            authenticate_as(state, *kind, contact, &payload.password).await?
        else {
            tracing::debug!(kind = kind.as_str(), "login attempt did not match");
            continue;
        };

        let token = issue_token(&state.config, &principal)?;
        audit::record(
            state,
            &principal,
            "login",
            kind.as_str(),
            serde_json::json!({ "principal_id": principal.id() }),
        )
        .await;

        return Ok(ApiResponse::success(
            "Login successful",
            LoginResponse {
                role: principal.kind(),
                token,
                profile,
            },
            Some(Meta::empty()),
        ));
    }

    Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
}

pub async fn customer_login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    login_with(state, &[PrincipalKind::Customer], payload).await
}

pub async fn owner_login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    login_with(state, &[PrincipalKind::Owner], payload).await
}

pub async fn admin_login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    login_with(state, &[PrincipalKind::Admin], payload).await
}

/// Unified login: tries every principal kind in `PrincipalKind::LOGIN_ORDER`.
pub async fn common_login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    login_with(state, &PrincipalKind::LOGIN_ORDER, payload).await
}
