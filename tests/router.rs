//! Tests for the assembled router, exercised through the session layer.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use meridian::server::router::routes;
use meridian_test_utils::prelude::*;
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;

use crate::util::TestSetupExt;

fn app(test: &TestSetup) -> axum::Router {
    routes()
        .with_state(test.into_app_state())
        .layer(SessionManagerLayer::new(test.store.clone()))
}

/// Expect the mount route to answer 404 for a visitor without a principal
#[tokio::test]
async fn dashboard_requires_principal() -> Result<(), TestError> {
    let test = TestSetup::new().await?;

    let resp = app(&test)
        .oneshot(
            Request::get("/api/dashboard?version=v1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the group refresh route not to be captured by the single-section route
#[tokio::test]
async fn group_refresh_route_is_distinct() -> Result<(), TestError> {
    let test = TestSetup::new().await?;

    let resp = app(&test)
        .oneshot(
            Request::post("/api/dashboard/refresh")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"sections":["market"]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // No principal in a fresh session, so the group handler answers 404 rather than 405
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the OpenAPI document to be served
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestSetup::new().await?;

    let resp = app(&test)
        .oneshot(
            Request::get("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
