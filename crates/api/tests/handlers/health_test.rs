use axum::http::StatusCode;
use serde_json::Value;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health = ctx.server.get("/health").await;
    let version = ctx.server.get("/version").await;

    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.json::<Value>()["status"], "ok");
    assert_eq!(version.json::<Value>()["name"], "opdslot-api");
}
