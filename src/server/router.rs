//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. Swagger UI is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/dashboard?version=<marker>` - Mount the dashboard
/// - `POST /api/dashboard/{section}/refresh` - Force-refresh one section
/// - `POST /api/dashboard/refresh` - Force-refresh a group of sections
/// - `POST /api/auth/logout` - Sign out and clear the dashboard cache
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Returns
/// An Axum `Router<AppState>` ready for `with_state` and the session layer.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Meridian", description = "Meridian dashboard API"), tags(
        (name = controller::dashboard::DASHBOARD_TAG, description = "Dashboard mount and refresh routes"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::dashboard::get_dashboard))
        .routes(routes!(controller::dashboard::refresh_sections))
        .routes(routes!(controller::dashboard::refresh_section))
        .routes(routes!(controller::auth::logout))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
