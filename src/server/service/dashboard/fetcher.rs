use chrono::{DateTime, Utc};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;

use crate::{
    model::dashboard::Section,
    server::{
        error::{fetch::FetchError, Error},
        model::dashboard::{FetchedSection, SectionPayload},
        service::retry::RetryPolicy,
    },
};

/// Response envelope shared by every section endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionEnvelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Fetches individual dashboard sections from their upstream endpoints.
///
/// Cloning is cheap; the underlying HTTP client shares its connection pool.
#[derive(Clone, Debug)]
pub struct SectionFetcher {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl SectionFetcher {
    /// Creates a new instance of [`SectionFetcher`]
    ///
    /// # Arguments
    /// - `client` - HTTP client used for every section request
    /// - `base_url` - Base URL of the section providers, without a trailing path
    /// - `retry` - Retry policy applied to each section fetch
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        }
    }

    /// Full URL for a section, with the server-side cache bypass modifier when forced.
    pub fn endpoint(&self, section: Section, force_refresh: bool) -> String {
        let url = format!("{}{}", self.base_url, section.endpoint_path());
        if force_refresh {
            format!("{}?refresh=true", url)
        } else {
            url
        }
    }

    /// Fetches one section, retrying transient failures per the retry policy.
    ///
    /// # Arguments
    /// - `section` - Section to fetch
    /// - `force_refresh` - Ask upstream to bypass its own cache
    ///
    /// # Returns
    /// - `Ok(FetchedSection)` - Payload and the upstream `updatedAt` (now, if upstream omitted it)
    /// - `Err(Error::FetchError)` - Transport, status, inline-error, decode or empty-content failure
    pub async fn fetch(&self, section: Section, force_refresh: bool) -> Result<FetchedSection, Error> {
        let description = if force_refresh {
            format!("{} section refresh", section)
        } else {
            format!("{} section fetch", section)
        };

        self.retry
            .execute(&description, || self.fetch_once(section, force_refresh))
            .await
    }

    async fn fetch_once(&self, section: Section, force_refresh: bool) -> Result<FetchedSection, Error> {
        let mut request = self.client.get(self.endpoint(section, force_refresh));
        if force_refresh {
            request = request.header(CACHE_CONTROL, "no-cache");
        }

        let response = request.send().await.map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status).into());
        }

        // A body that breaks off mid-read is a transport failure, not a decode one
        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let envelope: SectionEnvelope =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
                section,
                reason: e.to_string(),
            })?;

        into_fetched(section, envelope)
    }
}

fn into_fetched(section: Section, envelope: SectionEnvelope) -> Result<FetchedSection, Error> {
    // An inline error wins even when data is present; an empty one is no error
    if let Some(message) = envelope.error.filter(|message| !message.is_empty()) {
        return Err(FetchError::Upstream { section, message }.into());
    }

    let payload = match envelope.data {
        Some(data) if !data.is_null() => data,
        _ if section.requires_content() => return Err(FetchError::EmptyPayload(section).into()),
        _ => {
            return Err(FetchError::Decode {
                section,
                reason: "response has no data".to_string(),
            }
            .into())
        }
    };

    if section.requires_content() && !has_analysis_content(&payload) {
        return Err(FetchError::EmptyPayload(section).into());
    }

    let updated_at = envelope
        .updated_at
        .and_then(|value| DateTime::parse_from_rfc3339(&value).ok())
        .map(|value| value.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok(FetchedSection {
        section,
        payload: SectionPayload::new(payload),
        updated_at,
    })
}

/// Whether a SWOT payload has at least one non-empty quadrant.
fn has_analysis_content(payload: &serde_json::Value) -> bool {
    ["strengths", "weaknesses", "opportunities", "threats"]
        .iter()
        .any(|quadrant| {
            payload
                .get(quadrant)
                .and_then(|value| value.as_array())
                .is_some_and(|items| !items.is_empty())
        })
}
