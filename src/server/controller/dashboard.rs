use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        dashboard::{DashboardDto, RefreshSectionsDto, Section, SectionDto},
    },
    server::{
        controller::util::get_principal::get_principal_from_session,
        error::{dashboard::DashboardError, Error},
        model::{app::AppState, dashboard::VersionTag},
        service::dashboard::{orchestrator::DashboardOrchestrator, store::SessionCacheStore},
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MountParams {
    /// Last-modified marker of the principal's company record
    pub version: String,
}

/// Mount the dashboard for the signed-in principal
///
/// Restores every section from the session cache when possible and otherwise fetches the
/// missing sections from upstream. Section failures are reported per section inside the
/// response, never as an HTTP error.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = DASHBOARD_TAG,
    params(MountParams),
    responses(
        (status = 200, description = "Dashboard sections with per-section status", body = DashboardDto),
        (status = 400, description = "Empty version marker", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<MountParams>,
) -> Result<impl IntoResponse, Error> {
    let principal_id = get_principal_from_session(&session).await?;
    let version = VersionTag::new(params.version)?;

    let store = SessionCacheStore::new(session, state.sessions.clone());
    let snapshot = DashboardOrchestrator::new(&state.fetcher, &store, &state.locks)
        .mount(&principal_id, &version)
        .await;

    Ok((StatusCode::OK, Json(snapshot.into_dto(Utc::now()))))
}

/// Force-refresh a single dashboard section
///
/// Bypasses both the session cache and the upstream cache. A failed refresh keeps the
/// previous payload and reports the failure on the returned section.
#[utoipa::path(
    post,
    path = "/api/dashboard/{section}/refresh",
    tag = DASHBOARD_TAG,
    params(
        ("section" = Section, Path, description = "Section identifier, e.g. `market`")
    ),
    responses(
        (status = 200, description = "Refreshed section, or its previous state with the failure", body = SectionDto),
        (status = 400, description = "Unknown section", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh_section(
    State(state): State<AppState>,
    session: Session,
    Path(section): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let principal_id = get_principal_from_session(&session).await?;
    let section = section
        .parse::<Section>()
        .map_err(|_| DashboardError::UnknownSection(section))?;

    let store = SessionCacheStore::new(session, state.sessions.clone());
    let outcome = DashboardOrchestrator::new(&state.fetcher, &store, &state.locks)
        .refresh_section(&principal_id, section)
        .await;

    Ok((StatusCode::OK, Json(outcome.into_dto(Utc::now()))))
}

/// Force-refresh several dashboard sections concurrently
///
/// Each listed section is refreshed independently; duplicates are refreshed once.
#[utoipa::path(
    post,
    path = "/api/dashboard/refresh",
    tag = DASHBOARD_TAG,
    request_body = RefreshSectionsDto,
    responses(
        (status = 200, description = "Outcome of every refreshed section", body = Vec<SectionDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh_sections(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RefreshSectionsDto>,
) -> Result<impl IntoResponse, Error> {
    let principal_id = get_principal_from_session(&session).await?;

    let store = SessionCacheStore::new(session, state.sessions.clone());
    let outcomes = DashboardOrchestrator::new(&state.fetcher, &store, &state.locks)
        .refresh_sections(&principal_id, &body.sections)
        .await;

    let now = Utc::now();
    let section_dtos: Vec<SectionDto> = outcomes
        .into_iter()
        .map(|outcome| outcome.into_dto(now))
        .collect();

    Ok((StatusCode::OK, Json(section_dtos)))
}
