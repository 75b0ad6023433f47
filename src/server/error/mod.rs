//! Error types for the Meridian server application.
//!
//! This module provides the error handling system with specialized error types for each
//! concern (authentication, configuration, dashboard requests, upstream section fetches).
//! All errors implement `IntoResponse` for Axum HTTP responses and use `thiserror` for
//! ergonomic error definitions with automatic `Display` and `Error` trait implementations.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, dashboard::DashboardError, fetch::FetchError,
    },
};

/// Main error type for the Meridian server application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (no principal in session)
/// - Dashboard request errors (unknown section, empty version marker)
/// - Section fetch errors (upstream status, timeouts, inline errors, empty content)
/// - External library errors (sessions, session store, Redis, HTTP client, I/O, JSON encoding)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (principal missing from session).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Invalid dashboard request (unknown section, empty version marker).
    #[error(transparent)]
    DashboardError(#[from] DashboardError),
    /// Failure fetching a single dashboard section from upstream.
    #[error(transparent)]
    FetchError(#[from] FetchError),
    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client for section API: {0}")]
    HttpClientError(reqwest::Error),
    /// I/O error (binding the listener, serving connections).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Session backing store error (loading or saving a record by session id).
    #[error(transparent)]
    SessionStoreError(#[from] tower_sessions::session_store::Error),
    /// Dashboard cache record could not be encoded for the session.
    #[error("Failed to encode dashboard cache: {0}")]
    CacheEncodeError(#[from] serde_json::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For invalid dashboard requests
/// - 404 Not Found - When no principal is present in session
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::DashboardError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
