//! Tests for dashboard controller endpoints.

mod get_dashboard;
mod refresh_section;
mod refresh_sections;

use super::*;
