//! Tests for HTTP controller endpoints.
//!
//! These tests call the axum handlers directly with a mock upstream and an in-memory
//! session, verifying status codes, response bodies and the session cache left behind.

mod auth;
mod dashboard;

use axum::{body::to_bytes, response::Response};
use meridian_test_utils::prelude::*;
use serde::de::DeserializeOwned;

use crate::util::TestSetupExt;

/// Deserialize a handler response body.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, TestError> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    Ok(serde_json::from_slice(&bytes)?)
}
