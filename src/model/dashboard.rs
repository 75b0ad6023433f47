use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the six data sections aggregated on the dashboard.
///
/// The set is closed; sections are never created or destroyed at runtime. Each section is
/// served by its own upstream endpoint at `/api/dashboard/<id>`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Market,
    LocalInfo,
    IndustryTrends,
    SwotAnalysis,
    WorldNews,
    IndustryForecast,
}

impl Section {
    /// Every section, in dashboard display order.
    pub const ALL: [Section; 6] = [
        Section::Market,
        Section::LocalInfo,
        Section::IndustryTrends,
        Section::SwotAnalysis,
        Section::WorldNews,
        Section::IndustryForecast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::LocalInfo => "local-info",
            Self::IndustryTrends => "industry-trends",
            Self::SwotAnalysis => "swot-analysis",
            Self::WorldNews => "world-news",
            Self::IndustryForecast => "industry-forecast",
        }
    }

    /// Path of the upstream endpoint serving this section, relative to the section API base URL.
    pub fn endpoint_path(&self) -> String {
        format!("/api/dashboard/{}", self.as_str())
    }

    /// Whether a structurally valid but empty payload counts as a failure for this section.
    pub fn requires_content(&self) -> bool {
        matches!(self, Self::SwotAnalysis)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("Unknown dashboard section: {}", s))
    }
}

/// How the dashboard data was obtained on a mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPath {
    /// Every section restored from the cache without any network call
    Restored,
    /// Every section fetched from upstream
    FreshLoad,
    /// Only the sections missing from the cache were fetched
    PartialRepair,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    /// A payload is available (possibly stale)
    Ready,
    /// The last fetch or refresh of this section failed
    Failed,
    /// No payload and no failure recorded
    Missing,
}

/// Failure class of a section fetch, used by the UI to pick a message and retry affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SectionFailureKind {
    /// Rate limiting, server errors or timeouts that persisted across every attempt
    Transient,
    /// Client errors and undecodable responses
    Permanent,
    /// Structurally valid response with nothing to show
    DomainEmpty,
    /// The upstream reported it could not produce the section
    Upstream,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SectionErrorDto {
    pub kind: SectionFailureKind,
    pub message: String,
}

/// State of one section as displayed on the dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub section: Section,
    pub status: SectionStatus,
    /// Last known payload, kept on failure so stale data stays visible
    #[schema(value_type = Option<Object>)]
    pub payload: Option<serde_json::Value>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Human readable age of the payload, e.g. "5 min ago"
    pub last_updated: Option<String>,
    pub error: Option<SectionErrorDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub path: LoadPath,
    /// Whether the cached record was discarded because the company record changed
    pub discarded: bool,
    pub sections: Vec<SectionDto>,
}

/// Request body for refreshing a group of sections at once.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RefreshSectionsDto {
    pub sections: Vec<Section>,
}
