use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors caused by malformed dashboard requests.
///
/// Section failures are never reported through this type; they are scoped to the section and
/// returned inside a successful response.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Unknown dashboard section: {0:?}")]
    UnknownSection(String),
    #[error("Company record version marker must not be empty")]
    EmptyVersion,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected dashboard request: {}", self);

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
