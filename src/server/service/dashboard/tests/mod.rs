
use std::time::Duration;

use chrono::{DateTime, Utc};
use meridian_test_utils::prelude::*;

use crate::{
    model::dashboard::{LoadPath, Section, SectionFailureKind},
    server::{
        model::dashboard::{CacheRecord, FetchedSection, SectionPayload, VersionTag},
        service::{
            dashboard::{
                fetcher::SectionFetcher,
                lock::PrincipalLocks,
                orchestrator::DashboardOrchestrator,
                store::{CacheStore, SessionCacheStore},
            },
            retry::RetryPolicy,
        },
    },
};

fn test_fetcher(test: &TestSetup) -> SectionFetcher {
    let retry = RetryPolicy::new(3, Duration::from_secs(5), Duration::from_millis(1));
    SectionFetcher::new(reqwest::Client::new(), test.url(), retry)
}

fn version(value: &str) -> VersionTag {
    VersionTag::new(value).unwrap()
}

fn fetched(section: Section, updated_at: DateTime<Utc>) -> FetchedSection {
    FetchedSection {
        section,
        payload: SectionPayload::new(fixture::mock_payload(section.as_str())),
        updated_at,
    }
}

/// Record holding every section except `missing`, initialized for [`TEST_VERSION`].
fn cached_record(missing: &[Section], updated_at: DateTime<Utc>) -> CacheRecord {
    let mut record = CacheRecord::new();
    for section in Section::ALL {
        if !missing.contains(&section) {
            record.apply(fetched(section, updated_at));
        }
    }
    record.initialized = true;
    record.owner_version = Some(version(TEST_VERSION));

    record
}
