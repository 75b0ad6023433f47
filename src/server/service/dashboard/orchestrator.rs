//! Dashboard mount and refresh orchestration.
//!
//! A mount walks an explicit state machine:
//!
//! - `Restoring` runs the version guard, loads the cached record and decides whether it can be
//!   adopted as is, needs a partial repair or needs a fresh load.
//! - `FreshLoading` fetches the chosen sections concurrently and merges every success into the
//!   principal's record under the principal's lock.
//! - `Ready` carries the resulting snapshot.
//!
//! Failures never leave the state machine; they are recorded per section in the snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use futures::{future::join_all, stream::FuturesUnordered, StreamExt};

use crate::{
    model::dashboard::{DashboardDto, LoadPath, Section},
    server::{
        model::dashboard::{CacheRecord, SectionFailure, SectionOutcome, VersionTag},
        service::dashboard::{
            fetcher::SectionFetcher,
            guard::{GuardAction, VersionGuard},
            lock::PrincipalLocks,
            store::CacheStore,
        },
    },
};

/// Result of a dashboard mount.
#[derive(Clone, Debug)]
pub struct DashboardSnapshot {
    pub path: LoadPath,
    /// Whether the cache was discarded because the company record changed
    pub discarded: bool,
    /// Number of sections fetched from upstream during the mount
    pub fetch_count: usize,
    pub record: CacheRecord,
    pub failures: BTreeMap<Section, SectionFailure>,
}

impl DashboardSnapshot {
    /// Every section in display order, with failures attached to their last known entry.
    pub fn sections(&self) -> Vec<SectionOutcome> {
        Section::ALL
            .into_iter()
            .map(|section| SectionOutcome {
                entry: self.record.entry(section),
                failure: self.failures.get(&section).cloned(),
            })
            .collect()
    }

    pub fn into_dto(self, now: DateTime<Utc>) -> DashboardDto {
        DashboardDto {
            path: self.path,
            discarded: self.discarded,
            sections: self
                .sections()
                .into_iter()
                .map(|outcome| outcome.into_dto(now))
                .collect(),
        }
    }
}

enum MountState {
    Restoring,
    FreshLoading {
        path: LoadPath,
        sections: Vec<Section>,
    },
    Ready(DashboardSnapshot),
}

pub struct DashboardOrchestrator<'a, S: CacheStore> {
    fetcher: &'a SectionFetcher,
    store: &'a S,
    locks: &'a PrincipalLocks,
}

impl<'a, S: CacheStore> DashboardOrchestrator<'a, S> {
    pub fn new(fetcher: &'a SectionFetcher, store: &'a S, locks: &'a PrincipalLocks) -> Self {
        Self {
            fetcher,
            store,
            locks,
        }
    }

    /// Mounts the dashboard for a principal.
    ///
    /// Restores a complete cache without any network call, repairs an incomplete one by
    /// fetching only its missing sections, and otherwise fetches every section. A changed
    /// `current` version discards the cache before anything else happens.
    ///
    /// # Arguments
    /// - `principal_id` - Principal whose cache record is used
    /// - `current` - Version marker of the principal's company record as currently loaded
    ///
    /// # Returns
    /// - `DashboardSnapshot` - Resulting record plus any per-section failures
    pub async fn mount(&self, principal_id: &str, current: &VersionTag) -> DashboardSnapshot {
        let decision = VersionGuard::new(self.store)
            .check(principal_id, current)
            .await;
        let discarded = decision.action == GuardAction::Discard;

        let mut state = MountState::Restoring;
        loop {
            state = match state {
                MountState::Restoring => self.restore(principal_id, current, discarded).await,
                MountState::FreshLoading { path, sections } => {
                    self.load(principal_id, current, path, sections).await
                }
                MountState::Ready(mut snapshot) => {
                    snapshot.discarded = discarded;

                    tracing::info!(
                        "Dashboard for {} ready via {:?} ({} fetched, {} failed)",
                        principal_id,
                        snapshot.path,
                        snapshot.fetch_count,
                        snapshot.failures.len()
                    );

                    return snapshot;
                }
            };
        }
    }

    async fn restore(&self, principal_id: &str, current: &VersionTag, discarded: bool) -> MountState {
        let cached = if discarded {
            None
        } else {
            self.store.load(principal_id).await
        };

        match cached {
            Some(mut record) if record.initialized && self.store.is_complete(&record) => {
                if record.owner_version.is_none() {
                    record.owner_version = Some(current.clone());
                    if let Err(e) = self.store.save(principal_id, &record).await {
                        tracing::error!(
                            "Failed to stamp dashboard cache version for {}: {}",
                            principal_id,
                            e
                        );
                    }
                }

                MountState::Ready(DashboardSnapshot {
                    path: LoadPath::Restored,
                    discarded,
                    fetch_count: 0,
                    record,
                    failures: BTreeMap::new(),
                })
            }
            Some(record) if record.initialized => MountState::FreshLoading {
                path: LoadPath::PartialRepair,
                sections: record.missing_sections(),
            },
            _ => MountState::FreshLoading {
                path: LoadPath::FreshLoad,
                sections: Section::ALL.to_vec(),
            },
        }
    }

    async fn load(
        &self,
        principal_id: &str,
        current: &VersionTag,
        path: LoadPath,
        sections: Vec<Section>,
    ) -> MountState {
        tracing::debug!(
            "Fetching {} dashboard sections for {} ({:?})",
            sections.len(),
            principal_id,
            path
        );

        let mut pending: FuturesUnordered<_> = sections
            .iter()
            .map(|&section| async move { (section, self.fetcher.fetch(section, false).await) })
            .collect();

        let mut fetched = Vec::new();
        let mut failures = BTreeMap::new();
        while let Some((section, result)) = pending.next().await {
            match result {
                Ok(section_data) => {
                    tracing::debug!("Section {} arrived for {}", section, principal_id);
                    fetched.push(section_data);
                }
                Err(e) => {
                    tracing::warn!("Section {} failed for {}: {}", section, principal_id, e);
                    failures.insert(section, SectionFailure::from(&e));
                }
            }
        }

        let _guard = self.locks.acquire(principal_id).await;

        // Re-read so sections written by a refresh during the fan-out are not lost
        let mut record = match self.store.load(principal_id).await {
            Some(record)
                if record.owner_version.is_none()
                    || record.owner_version.as_ref() == Some(current) =>
            {
                record
            }
            _ => CacheRecord::new(),
        };
        for section_data in fetched {
            record.apply_if_newer(section_data);
        }
        record.initialized = true;
        record.owner_version = Some(current.clone());

        if let Err(e) = self.store.save(principal_id, &record).await {
            tracing::error!("Failed to save dashboard cache for {}: {}", principal_id, e);
        }

        MountState::Ready(DashboardSnapshot {
            path,
            discarded: false,
            fetch_count: sections.len(),
            record,
            failures,
        })
    }

    /// Force-refreshes one section, bypassing both this cache and upstream's.
    ///
    /// Only the refreshed section's entry changes. On failure the previous entry is left in
    /// place and returned alongside the failure.
    pub async fn refresh_section(&self, principal_id: &str, section: Section) -> SectionOutcome {
        let result = self.fetcher.fetch(section, true).await;

        let _guard = self.locks.acquire(principal_id).await;
        let mut record = self.store.load(principal_id).await.unwrap_or_default();

        match result {
            Ok(section_data) => {
                record.apply(section_data);
                if let Err(e) = self.store.save(principal_id, &record).await {
                    tracing::error!(
                        "Failed to save refreshed {} section for {}: {}",
                        section,
                        principal_id,
                        e
                    );
                }

                tracing::info!("Refreshed {} section for {}", section, principal_id);

                SectionOutcome {
                    entry: record.entry(section),
                    failure: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Refresh of {} section failed for {}, keeping previous entry: {}",
                    section,
                    principal_id,
                    e
                );

                SectionOutcome {
                    entry: record.entry(section),
                    failure: Some(SectionFailure::from(&e)),
                }
            }
        }
    }

    /// Force-refreshes several sections concurrently; duplicates are refreshed once.
    pub async fn refresh_sections(
        &self,
        principal_id: &str,
        sections: &[Section],
    ) -> Vec<SectionOutcome> {
        let mut unique: Vec<Section> = Vec::with_capacity(sections.len());
        for &section in sections {
            if !unique.contains(&section) {
                unique.push(section);
            }
        }

        join_all(
            unique
                .into_iter()
                .map(|section| self.refresh_section(principal_id, section)),
        )
        .await
    }
}
