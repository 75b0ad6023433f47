//! Session data models and utilities.
//!
//! This module provides type-safe wrappers for session data storage and retrieval using
//! tower-sessions. The dashboard cache itself lives in the session as well; see
//! [`crate::server::service::dashboard::store`].

pub mod principal;
