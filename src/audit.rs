use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, middleware::auth::Principal, state::AppState};

pub async fn log_audit(
    pool: &PgPool,
    actor: &Principal,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, actor_id, actor_role, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(actor.id())
    .bind(actor.kind().as_str())
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// Best-effort audit write: a failure is logged and never fails the request.
pub async fn record(
    state: &AppState,
    actor: &Principal,
    action: &str,
    resource: &str,
    metadata: Value,
) {
    if let Err(err) = log_audit(&state.pool, actor, action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
