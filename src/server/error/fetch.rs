use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::model::dashboard::Section;

/// Failure fetching a single section from its upstream endpoint.
///
/// Whether a variant is retried is decided in [`crate::server::error::retry`].
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream answered with a non-success status code.
    #[error("Section endpoint responded with HTTP {0}")]
    Status(StatusCode),
    /// A single attempt exceeded the per-attempt timeout.
    #[error("Section request timed out after {0:?}")]
    Timeout(Duration),
    /// Connection-level failure without an HTTP status.
    #[error("Section request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// HTTP success whose body reports that the section could not be produced.
    #[error("Upstream could not produce section {section}: {message}")]
    Upstream { section: Section, message: String },
    /// Structurally valid response with nothing to show.
    #[error("Section {0} returned no content")]
    EmptyPayload(Section),
    /// Response body was not the expected section envelope.
    #[error("Failed to decode section {section} response: {reason}")]
    Decode { section: Section, reason: String },
}
