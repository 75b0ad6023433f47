//! Test configuration constants shared across dashboard tests.
//!
//! These values are placeholders used to populate sessions and version markers; none of
//! them correspond to real principals or company records.

/// Principal ID inserted into the test session.
pub static TEST_PRINCIPAL_ID: &str = "principal-1";

/// Company record version marker used for the first mount of a test.
pub static TEST_VERSION: &str = "v1";

/// Section identifiers served by the mock upstream, in dashboard display order.
pub static TEST_SECTIONS: [&str; 6] = [
    "market",
    "local-info",
    "industry-trends",
    "swot-analysis",
    "world-news",
    "industry-forecast",
];

/// Fixed `updatedAt` value returned by mock section endpoints.
pub static TEST_UPDATED_AT: &str = "2026-01-15T09:30:00Z";
