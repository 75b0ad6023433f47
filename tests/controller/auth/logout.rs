use axum::{extract::State, http::StatusCode, response::IntoResponse};
use meridian::server::{
    controller::auth::logout,
    model::session::principal::SessionPrincipalId,
    service::dashboard::store::{CacheStore, SessionCacheStore},
};

use super::*;

/// Expect 204 and a cleared cache and session after logout with a principal in session
#[tokio::test]
async fn clears_cache_and_session_on_logout() -> Result<(), TestError> {
    let mut test = TestSetup::new().await?;
    let endpoint = test.section().create_section_endpoint("market", true, 1);
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();
    let state = test.into_app_state();

    // Populate the cache through a refresh
    let _ = meridian::server::controller::dashboard::refresh_section(
        State(state.clone()),
        test.session.clone(),
        axum::extract::Path("market".to_string()),
    )
    .await;
    let store = SessionCacheStore::new(test.session.clone(), test.backend());
    assert!(store.load(TEST_PRINCIPAL_ID).await.is_some());

    let result = logout(State(state), test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(store.load(TEST_PRINCIPAL_ID).await.is_none());
    let maybe_principal_id = SessionPrincipalId::get(&test.session).await.unwrap();
    assert!(maybe_principal_id.is_none());

    endpoint.assert();

    Ok(())
}

/// Expect 204 after logout even without session data
#[tokio::test]
async fn returns_no_content_without_session() -> Result<(), TestError> {
    let test = TestSetup::new().await?;

    let result = logout(State(test.into_app_state()), test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}
