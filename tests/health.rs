mod common;

use axum::extract::State;
use biteroute_api::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok_without_a_database() {
    let response = health_check(State(common::offline_state())).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "unavailable");
}

#[tokio::test]
async fn health_check_reports_a_reachable_database() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let response = health_check(State(state)).await;
    assert_eq!(response.0.data.expect("health data").database, "ok");
    Ok(())
}
