//! Server application models and type definitions.
//!
//! This module contains data models for the server application, including application state,
//! the dashboard cache domain types, and session data structures.

pub mod app;
pub mod dashboard;
pub mod session;
