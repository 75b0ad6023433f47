//! Service layer for dashboard caching and upstream access.
//!
//! Services include the dashboard orchestration (section fetching, session-scoped caching,
//! version-based invalidation) and the retry policy wrapping every upstream call.

pub mod dashboard;
pub mod retry;
