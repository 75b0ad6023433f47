//! Mock section payloads.
//!
//! Payload shapes follow what the upstream section providers return. The orchestrator treats
//! them as opaque, so only `swot-analysis` content is ever inspected by the code under test.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::constant::TEST_UPDATED_AT;

/// Build a representative payload for the given section identifier.
///
/// Unknown identifiers produce a generic object so tests can exercise unexpected sections
/// without panicking.
pub fn mock_payload(section: &str) -> Value {
    match section {
        "market" => json!({
            "currentRate": { "usdJpy": 156.2, "eurJpy": 168.4 },
            "commodities": [{ "name": "steel", "price": 118500, "unit": "t" }],
            "trend": "rising"
        }),
        "local-info" => json!({
            "weather": { "temperature": 12.5, "condition": "cloudy" },
            "traffic": [{ "route": "Route 16", "status": "congested" }],
            "events": []
        }),
        "industry-trends" => json!({
            "industry": "machine parts",
            "trends": [{ "title": "Supply normalization", "impact": "positive" }]
        }),
        "swot-analysis" => mock_swot(),
        "world-news" => json!({
            "headlines": [{ "title": "Central bank holds rates", "category": "finance" }]
        }),
        "industry-forecast" => json!({
            "shortTerm": { "period": "3 months", "outlook": "neutral" },
            "midTerm": { "period": "1 year", "outlook": "positive" },
            "recommendation": "Hold inventory levels"
        }),
        other => json!({ "section": other }),
    }
}

/// A SWOT payload with content in every quadrant.
pub fn mock_swot() -> Value {
    json!({
        "strengths": ["Long-standing supplier relationships"],
        "weaknesses": ["Ageing equipment"],
        "opportunities": ["Export demand"],
        "threats": ["Raw material prices"]
    })
}

/// A SWOT payload that is structurally valid but has nothing to show.
pub fn mock_empty_swot() -> Value {
    json!({
        "strengths": [],
        "weaknesses": [],
        "opportunities": [],
        "threats": []
    })
}

/// Wrap a payload in the upstream success envelope.
pub fn mock_envelope(payload: Value) -> Value {
    json!({ "data": payload, "updatedAt": TEST_UPDATED_AT })
}

/// Upstream success envelope carrying an explicit `updatedAt`.
pub fn mock_envelope_at(payload: Value, updated_at: &str) -> Value {
    json!({ "data": payload, "updatedAt": updated_at })
}

/// Upstream inline-error envelope (still served with HTTP 200).
pub fn mock_error_envelope(message: &str) -> Value {
    json!({ "error": message })
}

/// The `updatedAt` served by [`mock_envelope`], as a timestamp.
pub fn mock_updated_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(TEST_UPDATED_AT)
        .expect("TEST_UPDATED_AT is valid RFC 3339")
        .with_timezone(&Utc)
}
