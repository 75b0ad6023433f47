//! Tests for the get_dashboard endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use meridian::{
    model::dashboard::{DashboardDto, LoadPath, Section, SectionFailureKind, SectionStatus},
    server::{
        controller::dashboard::{get_dashboard, MountParams},
        model::session::principal::SessionPrincipalId,
    },
};

use super::*;

fn params(version: &str) -> Query<MountParams> {
    Query(MountParams {
        version: version.to_string(),
    })
}

/// Expect 404 when no principal is present in session
#[tokio::test]
async fn not_found_without_principal() -> Result<(), TestError> {
    let test = TestSetup::new().await?;

    let result = get_dashboard(
        State(test.into_app_state()),
        test.session.clone(),
        params(TEST_VERSION),
    )
    .await;

    assert!(result.is_err());
    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 400 for an empty version marker
#[tokio::test]
async fn bad_request_for_empty_version() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();

    let result = get_dashboard(
        State(test.into_app_state()),
        test.session.clone(),
        params(""),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect a fresh load on the first mount and a network-free restore on the second
#[tokio::test]
async fn fresh_load_then_restore() -> Result<(), TestError> {
    let mut test = TestSetup::new().await?;
    test.section().with_all_section_endpoints(1);
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();
    let state = test.into_app_state();

    let first = get_dashboard(
        State(state.clone()),
        test.session.clone(),
        params(TEST_VERSION),
    )
    .await;

    assert!(first.is_ok());
    let resp = first.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let dashboard: DashboardDto = read_json(resp).await?;
    assert_eq!(dashboard.path, LoadPath::FreshLoad);
    assert!(!dashboard.discarded);
    assert_eq!(
        dashboard.sections.iter().map(|s| s.section).collect::<Vec<_>>(),
        Section::ALL.to_vec()
    );
    assert!(dashboard
        .sections
        .iter()
        .all(|s| s.status == SectionStatus::Ready && s.last_updated.is_some()));

    let second = get_dashboard(State(state), test.session.clone(), params(TEST_VERSION)).await;

    let dashboard: DashboardDto = read_json(second.into_response()).await?;
    assert_eq!(dashboard.path, LoadPath::Restored);

    test.assert_mocks();

    Ok(())
}

/// Expect a failing section to be reported inside a 200 response
#[tokio::test]
async fn failed_section_is_reported_in_body() -> Result<(), TestError> {
    let mut test = TestSetup::new().await?;
    let healthy = test
        .section()
        .create_section_endpoints_except("industry-forecast", 1);
    let failing = test
        .section()
        .create_status_endpoint("industry-forecast", false, 400, 1);
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();

    let result = get_dashboard(
        State(test.into_app_state()),
        test.session.clone(),
        params(TEST_VERSION),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let dashboard: DashboardDto = read_json(resp).await?;
    let forecast = dashboard
        .sections
        .iter()
        .find(|s| s.section == Section::IndustryForecast)
        .unwrap();
    assert_eq!(forecast.status, SectionStatus::Failed);
    assert!(forecast.payload.is_none());
    assert_eq!(
        forecast.error.as_ref().map(|e| e.kind),
        Some(SectionFailureKind::Permanent)
    );
    assert_eq!(
        dashboard
            .sections
            .iter()
            .filter(|s| s.status == SectionStatus::Ready)
            .count(),
        5
    );

    for mock in healthy {
        mock.assert();
    }
    failing.assert();

    Ok(())
}

/// Expect a changed version marker to discard the cache and reload every section
#[tokio::test]
async fn version_change_reports_discard() -> Result<(), TestError> {
    let mut test = TestSetup::new().await?;
    test.section().with_all_section_endpoints(2);
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();
    let state = test.into_app_state();

    let _ = get_dashboard(
        State(state.clone()),
        test.session.clone(),
        params(TEST_VERSION),
    )
    .await;
    let result = get_dashboard(State(state), test.session.clone(), params("v2")).await;

    let dashboard: DashboardDto = read_json(result.into_response()).await?;
    assert!(dashboard.discarded);
    assert_eq!(dashboard.path, LoadPath::FreshLoad);

    test.assert_mocks();

    Ok(())
}
