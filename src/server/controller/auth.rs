use axum::{extract::State, http::StatusCode, response::IntoResponse};
use dioxus_logger::tracing;
use tower_sessions::Session;

use crate::{
    model::api::ErrorDto,
    server::{
        error::Error,
        model::{app::AppState, session::principal::SessionPrincipalId},
        service::dashboard::store::{CacheStore, SessionCacheStore},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Sign the principal out, clearing their dashboard cache and the session
///
/// # Responses
/// - 204 (No Content): Signed out, or there was no principal in session
/// - 500 (Internal Server Error): The cache or session could not be cleared
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Signed out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let maybe_principal_id = SessionPrincipalId::get(&session).await?;

    // Cache keys are per principal, so there is nothing to clear without one
    if let Some(principal_id) = maybe_principal_id {
        SessionCacheStore::new(session.clone(), state.sessions.clone())
            .clear(&principal_id)
            .await?;
        session.clear().await;

        tracing::debug!("Signed out principal {} and cleared dashboard cache", principal_id);
    }

    Ok(StatusCode::NO_CONTENT)
}
