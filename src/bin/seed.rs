use biteroute_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::auth_service::hash_password,
};
use sqlx::PgPool;
use uuid::Uuid;

const DEMO_PASSWORD: &str = "biteroute123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let pool = orm.get_postgres_connection_pool();

    let owner_id = ensure_owner(pool, "owner@biteroute.test").await?;
    let customer_id = ensure_customer(pool, "customer@biteroute.test").await?;
    let hotel_id = ensure_hotel(pool, owner_id, "Udupi Grand", "Bengaluru", "South Indian").await?;
    seed_foods(pool, hotel_id).await?;

    println!("Seed completed. Owner ID: {owner_id}, Customer ID: {customer_id}, Hotel ID: {hotel_id}");
    Ok(())
}

fn demo_hash() -> anyhow::Result<String> {
    hash_password(DEMO_PASSWORD).map_err(|e| anyhow::anyhow!(e.to_string()))
}

async fn ensure_owner(pool: &PgPool, contact: &str) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO hotel_owners (id, username, contact, password_hash)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT ((lower(contact))) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("demo-owner")
    .bind(contact)
    .bind(demo_hash()?)
    .execute(pool)
    .await?;

    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM hotel_owners WHERE lower(contact) = lower($1)")
        .bind(contact)
        .fetch_one(pool)
        .await?;
    println!("Ensured hotel owner {contact}");
    Ok(id)
}

async fn ensure_customer(pool: &PgPool, contact: &str) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO customers (id, name, contact, password_hash)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT ((lower(contact))) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("Demo Customer")
    .bind(contact)
    .bind(demo_hash()?)
    .execute(pool)
    .await?;

    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM customers WHERE lower(contact) = lower($1)")
        .bind(contact)
        .fetch_one(pool)
        .await?;
    println!("Ensured customer {contact}");
    Ok(id)
}

/// The demo hotel is inserted already approved so its menu is searchable.
async fn ensure_hotel(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    location: &str,
    cuisine: &str,
) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO hotels (id, owner_id, name, location, cuisine, open_time, close_time, description, status)
        VALUES ($1, $2, $3, $4, $5, '08:00', '22:30', 'Demo hotel', 'approved')
        ON CONFLICT (owner_id, (lower(name))) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(name)
    .bind(location)
    .bind(cuisine)
    .execute(pool)
    .await?;

    let (id,): (Uuid,) =
        sqlx::query_as("SELECT id FROM hotels WHERE owner_id = $1 AND lower(name) = lower($2)")
            .bind(owner_id)
            .bind(name)
            .fetch_one(pool)
            .await?;
    println!("Ensured hotel {name}");
    Ok(id)
}

async fn seed_foods(pool: &PgPool, hotel_id: Uuid) -> anyhow::Result<()> {
    let foods = [
        ("Breakfast", "Masala Dosa", 120, "Crisp dosa with potato masala"),
        ("Breakfast", "Idli Vada", 90, "Two idlis and a medu vada"),
        ("Meals", "South Indian Thali", 220, "Rice, sambar, rasam and sides"),
        ("Beverages", "Filter Coffee", 40, "Decoction coffee with milk"),
    ];

    for (category, name, price, description) in foods {
        sqlx::query(
            r#"
            INSERT INTO foods (id, hotel_id, category, name, price, description)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (SELECT 1 FROM foods WHERE hotel_id = $2 AND name = $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(hotel_id)
        .bind(category)
        .bind(name)
        .bind(price as i64)
        .bind(description)
        .execute(pool)
        .await?;
    }

    println!("Seeded foods");
    Ok(())
}
