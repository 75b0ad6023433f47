//! Tests for the refresh_section endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use meridian::{
    model::dashboard::{Section, SectionDto, SectionFailureKind, SectionStatus},
    server::{
        controller::dashboard::{get_dashboard, refresh_section, MountParams},
        model::session::principal::SessionPrincipalId,
    },
};

use super::*;

/// Expect 400 for a section identifier outside the fixed set
#[tokio::test]
async fn bad_request_for_unknown_section() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();

    let result = refresh_section(
        State(test.into_app_state()),
        test.session.clone(),
        Path("weather".to_string()),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 404 when no principal is present in session
#[tokio::test]
async fn not_found_without_principal() -> Result<(), TestError> {
    let test = TestSetup::new().await?;

    let result = refresh_section(
        State(test.into_app_state()),
        test.session.clone(),
        Path("market".to_string()),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 200 with the refreshed payload on success
#[tokio::test]
async fn refreshes_section() -> Result<(), TestError> {
    let mut test = TestSetup::new().await?;
    let endpoint = test
        .section()
        .create_section_endpoint("local-info", true, 1);
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();

    let result = refresh_section(
        State(test.into_app_state()),
        test.session.clone(),
        Path("local-info".to_string()),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let section: SectionDto = read_json(resp).await?;
    assert_eq!(section.section, Section::LocalInfo);
    assert_eq!(section.status, SectionStatus::Ready);
    assert_eq!(section.payload, Some(fixture::mock_payload("local-info")));

    endpoint.assert();

    Ok(())
}

/// Expect a refresh that keeps failing to keep the previously displayed payload visible
#[tokio::test]
async fn failed_refresh_keeps_previous_payload() -> Result<(), TestError> {
    let mut test = TestSetup::new().await?;
    test.section().with_all_section_endpoints(1);
    let refresh = test
        .section()
        .create_status_endpoint("market", true, 429, 3);
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();
    let state = test.into_app_state();

    let _ = get_dashboard(
        State(state.clone()),
        test.session.clone(),
        Query(MountParams {
            version: TEST_VERSION.to_string(),
        }),
    )
    .await;
    let result = refresh_section(
        State(state),
        test.session.clone(),
        Path("market".to_string()),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let section: SectionDto = read_json(resp).await?;
    assert_eq!(section.status, SectionStatus::Failed);
    assert_eq!(section.payload, Some(fixture::mock_payload("market")));
    assert!(section.fetched_at.is_some());
    assert_eq!(
        section.error.map(|e| e.kind),
        Some(SectionFailureKind::Transient)
    );

    test.assert_mocks();
    refresh.assert();

    Ok(())
}
