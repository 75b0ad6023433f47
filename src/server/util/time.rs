//! Time and date formatting utilities.
//!
//! Dashboard sections keep displaying their last known payload when a refresh fails, so the
//! UI needs a short age indicator telling the user how stale that payload is.

use chrono::{DateTime, Utc};

/// Formats the age of a section payload for display.
///
/// # Logic
/// - Under one minute (or a timestamp in the future): `"just now"`
/// - Under one hour: whole minutes, e.g. `"12 min ago"`
/// - Otherwise: whole hours, e.g. `"3 h ago"`
///
/// # Arguments
/// - `fetched_at` - When the payload was produced upstream
/// - `now` - Current UTC timestamp to measure the age against
///
/// # Example
/// ```ignore
/// let fetched_at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 45, 30).unwrap();
/// assert_eq!(updated_label(fetched_at, now), "45 min ago");
/// ```
pub fn updated_label(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(fetched_at).num_minutes();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else {
        format!("{} h ago", minutes / 60)
    }
}
