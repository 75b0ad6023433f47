//! Dashboard cache domain types.
//!
//! A [`CacheRecord`] holds one [`CacheEntry`] per [`Section`] for a single principal, along with
//! the version of the company record the cache was populated for and whether the first full
//! load has completed this session.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::dashboard::{Section, SectionDto, SectionErrorDto, SectionFailureKind, SectionStatus},
    server::{
        error::{dashboard::DashboardError, fetch::FetchError, retry::ErrorRetryStrategy, Error},
        util::time::updated_label,
    },
};

/// Version of the serialized cache layout.
///
/// Records written with a different format version are treated as a cache miss. Bump this
/// whenever [`CacheEntry`] or the stored record layout changes.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Opaque token derived from the company record's last-modified marker.
///
/// Two tags are equal iff the company record has not changed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTag(String);

impl VersionTag {
    pub fn new(value: impl Into<String>) -> Result<Self, DashboardError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DashboardError::EmptyVersion);
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Section-specific payload returned by upstream, never inspected by the cache layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionPayload(serde_json::Value);

impl SectionPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Last known payload for one section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub section: Section,
    pub payload: Option<SectionPayload>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn empty(section: Section) -> Self {
        Self {
            section,
            payload: None,
            fetched_at: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.payload.is_some()
    }
}

/// A section successfully fetched from upstream.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchedSection {
    pub section: Section,
    pub payload: SectionPayload,
    pub updated_at: DateTime<Utc>,
}

/// Every cached section for one principal plus cache metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheRecord {
    entries: BTreeMap<Section, CacheEntry>,
    /// Company record version the cache was populated for
    pub owner_version: Option<VersionTag>,
    /// Whether a first full load completed this session
    pub initialized: bool,
}

impl Default for CacheRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheRecord {
    /// Creates an empty record with an absent entry for every section.
    pub fn new() -> Self {
        let entries = Section::ALL
            .into_iter()
            .map(|section| (section, CacheEntry::empty(section)))
            .collect();

        Self {
            entries,
            owner_version: None,
            initialized: false,
        }
    }

    /// Creates a record from stored entries; sections without a stored entry are absent.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CacheEntry>,
        owner_version: Option<VersionTag>,
        initialized: bool,
    ) -> Self {
        let mut record = Self::new();
        for entry in entries {
            record.entries.insert(entry.section, entry);
        }
        record.owner_version = owner_version;
        record.initialized = initialized;

        record
    }

    pub fn entry(&self, section: Section) -> CacheEntry {
        self.entries
            .get(&section)
            .cloned()
            .unwrap_or_else(|| CacheEntry::empty(section))
    }

    /// Entries in dashboard display order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    /// True iff every section has a payload.
    pub fn is_complete(&self) -> bool {
        Section::ALL
            .into_iter()
            .all(|section| self.entries.get(&section).is_some_and(CacheEntry::is_present))
    }

    pub fn missing_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| !self.entries.get(section).is_some_and(CacheEntry::is_present))
            .collect()
    }

    /// Replaces the entry for the fetched section.
    pub fn apply(&mut self, fetched: FetchedSection) {
        self.entries.insert(
            fetched.section,
            CacheEntry {
                section: fetched.section,
                payload: Some(fetched.payload),
                fetched_at: Some(fetched.updated_at),
            },
        );
    }

    /// Replaces the entry unless the cached one is strictly newer.
    ///
    /// Returns whether the entry was replaced.
    pub fn apply_if_newer(&mut self, fetched: FetchedSection) -> bool {
        let cached_at = self
            .entries
            .get(&fetched.section)
            .filter(|entry| entry.is_present())
            .and_then(|entry| entry.fetched_at);

        if cached_at.is_some_and(|cached_at| cached_at > fetched.updated_at) {
            return false;
        }

        self.apply(fetched);
        true
    }
}

/// Why a section could not be fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionFailure {
    pub kind: SectionFailureKind,
    pub message: String,
}

impl From<&Error> for SectionFailure {
    fn from(err: &Error) -> Self {
        let kind = match err {
            Error::FetchError(FetchError::Upstream { .. }) => SectionFailureKind::Upstream,
            Error::FetchError(FetchError::EmptyPayload(_)) => SectionFailureKind::DomainEmpty,
            err => match err.to_retry_strategy() {
                ErrorRetryStrategy::Retry => SectionFailureKind::Transient,
                ErrorRetryStrategy::Fail => SectionFailureKind::Permanent,
            },
        };

        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Displayable state of a section after a mount or refresh.
///
/// On failure `entry` still carries the last known payload, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionOutcome {
    pub entry: CacheEntry,
    pub failure: Option<SectionFailure>,
}

impl SectionOutcome {
    pub fn section(&self) -> Section {
        self.entry.section
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn into_dto(self, now: DateTime<Utc>) -> SectionDto {
        let status = match (&self.failure, self.entry.is_present()) {
            (Some(_), _) => SectionStatus::Failed,
            (None, true) => SectionStatus::Ready,
            (None, false) => SectionStatus::Missing,
        };

        SectionDto {
            section: self.entry.section,
            status,
            last_updated: self
                .entry
                .fetched_at
                .filter(|_| self.entry.is_present())
                .map(|fetched_at| updated_label(fetched_at, now)),
            payload: self.entry.payload.map(SectionPayload::into_value),
            fetched_at: self.entry.fetched_at,
            error: self.failure.map(|failure| SectionErrorDto {
                kind: failure.kind,
                message: failure.message,
            }),
        }
    }
}
