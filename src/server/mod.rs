//! Server application core modules.
//!
//! This module contains all server-side functionality for the Meridian dashboard service,
//! including HTTP routing, session-scoped caching of dashboard sections, upstream section
//! fetching with retry, and version-based cache invalidation.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
