use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sqlx::PgPool;

use crate::{
    config::AppConfig,
    db::create_orm_conn,
    services::receipt_service::{LogMailer, ReceiptMailer},
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub mailer: Arc<dyn ReceiptMailer>,
}

impl AppState {
    /// Builds the state around an existing SeaORM connection; the sqlx pool is
    /// the one SeaORM already holds.
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        let pool = orm.get_postgres_connection_pool().clone();
        Self {
            orm,
            pool,
            config: Arc::new(config),
            mailer: Arc::new(LogMailer),
        }
    }

    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        let orm = create_orm_conn(&config.database_url).await?;
        Ok(Self::new(orm, config))
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn ReceiptMailer>) -> Self {
        self.mailer = mailer;
        self
    }
}
