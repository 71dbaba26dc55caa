#![allow(dead_code)]

use std::sync::OnceLock;

use biteroute_api::{
    config::{AdminCredentials, AppConfig},
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::{OwnerSignupRequest, RegisterCustomerRequest},
        foods::AddFoodRequest,
        hotels::RegisterHotelRequest,
    },
    middleware::auth::Principal,
    services::{admin_service, auth_service, food_service, hotel_service},
    state::AppState,
};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@biteroute.test";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const PASSWORD: &str = "secret123";

static MIGRATED: OnceLock<Mutex<bool>> = OnceLock::new();

pub fn config(database_url: String) -> AppConfig {
    AppConfig {
        database_url,
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "integration-secret".into(),
        token_ttl_hours: 1,
        admin: Some(AdminCredentials {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        }),
    }
}

/// Connected state, or `None` when no database is configured.
pub async fn setup() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests.");
            return Ok(None);
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    {
        let mut migrated = MIGRATED.get_or_init(|| Mutex::new(false)).lock().await;
        if !*migrated {
            run_migrations(&orm).await?;
            *migrated = true;
        }
    }
    Ok(Some(AppState::new(orm, config(database_url))))
}

pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

pub async fn customer(state: &AppState) -> anyhow::Result<(Principal, String)> {
    let contact = format!("{}@example.com", unique("customer"));
    let res = auth_service::register_customer(
        state,
        RegisterCustomerRequest {
            name: "Asha".into(),
            contact: contact.clone(),
            password: PASSWORD.into(),
        },
    )
    .await?;
    let id = res.data.expect("customer").id;
    Ok((Principal::Customer(id), contact))
}

pub async fn owner(state: &AppState) -> anyhow::Result<(Principal, String)> {
    let contact = format!("{}@example.com", unique("owner"));
    let res = auth_service::owner_signup(
        state,
        OwnerSignupRequest {
            username: "ravi".into(),
            contact: contact.clone(),
            password: PASSWORD.into(),
        },
    )
    .await?;
    let id = res.data.expect("owner").id;
    Ok((Principal::Owner(id), contact))
}

pub fn hotel_request(name: &str, location: &str) -> RegisterHotelRequest {
    RegisterHotelRequest {
        hotel_name: name.into(),
        location: location.into(),
        cuisine: "South Indian".into(),
        open_time: "08:00".into(),
        close_time: "22:00".into(),
        description: String::new(),
    }
}

/// Registers a hotel for `owner`, pending approval. Returns its id and name.
pub async fn pending_hotel(
    state: &AppState,
    owner: &Principal,
    location: &str,
) -> anyhow::Result<(Uuid, String)> {
    let name = unique("Hotel");
    let res = hotel_service::register_hotel(state, owner, hotel_request(&name, location)).await?;
    Ok((res.data.expect("hotel").id, name))
}

pub async fn approved_hotel(
    state: &AppState,
    owner: &Principal,
    location: &str,
) -> anyhow::Result<(Uuid, String)> {
    let (id, name) = pending_hotel(state, owner, location).await?;
    admin_service::approve_hotel(state, &Principal::Admin, id).await?;
    Ok((id, name))
}

pub async fn food(
    state: &AppState,
    owner: &Principal,
    hotel_name: &str,
    category: &str,
    food_name: &str,
    price: i64,
) -> anyhow::Result<Uuid> {
    let res = food_service::add_food(
        state,
        owner,
        AddFoodRequest {
            hotel_name: hotel_name.into(),
            category: category.into(),
            food_name: food_name.into(),
            price: serde_json::json!(price),
            description: String::new(),
        },
    )
    .await?;
    Ok(res.data.expect("food").food_id)
}

/// State whose store is never reached. For tests that stop before any query.
pub fn offline_state() -> AppState {
    use std::sync::Arc;

    use biteroute_api::services::receipt_service::LogMailer;
    use sea_orm::DatabaseConnection;
    use sqlx::postgres::PgPoolOptions;

    let config = config("postgres://biteroute@127.0.0.1:1/offline".into());
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    AppState {
        orm: DatabaseConnection::Disconnected,
        pool,
        config: Arc::new(config),
        mailer: Arc::new(LogMailer),
    }
}
