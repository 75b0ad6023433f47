//! HTTP controller endpoints for the Meridian web API.
//!
//! This module contains Axum handlers for the dashboard (mount and manual refresh) and
//! sign-out. Controllers read the principal from the session, hand the request to the
//! dashboard orchestrator and return DTOs. They integrate with tower-sessions for the
//! session-scoped cache and use utoipa for OpenAPI documentation.

pub mod auth;
pub mod dashboard;
pub mod util;
