use dioxus_logger::tracing;

use crate::server::{model::dashboard::VersionTag, service::dashboard::store::CacheStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardAction {
    Keep,
    Discard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardReason {
    /// The cache was never stamped with a version; it is kept and stamped on the next save
    NoStoredVersion,
    VersionUnchanged,
    VersionChanged { stored: VersionTag },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardDecision {
    pub action: GuardAction,
    pub reason: GuardReason,
}

/// Invalidates a principal's cache when the company record it was built from has changed.
pub struct VersionGuard<'a, S: CacheStore> {
    store: &'a S,
}

impl<'a, S: CacheStore> VersionGuard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Compares the stored owner version against `current`, clearing the cache on mismatch.
    ///
    /// A failure to clear is logged and does not change the decision; the orchestrator
    /// rebuilds the record from scratch after a discard either way.
    pub async fn check(&self, principal_id: &str, current: &VersionTag) -> GuardDecision {
        let Some(stored) = self.store.owner_version(principal_id).await else {
            return GuardDecision {
                action: GuardAction::Keep,
                reason: GuardReason::NoStoredVersion,
            };
        };

        if &stored == current {
            return GuardDecision {
                action: GuardAction::Keep,
                reason: GuardReason::VersionUnchanged,
            };
        }

        tracing::info!(
            "Company record for {} changed ({} -> {}), discarding dashboard cache",
            principal_id,
            stored.as_str(),
            current.as_str()
        );

        if let Err(e) = self.store.clear(principal_id).await {
            tracing::error!(
                "Failed to clear dashboard cache for {}: {}",
                principal_id,
                e
            );
        }

        GuardDecision {
            action: GuardAction::Discard,
            reason: GuardReason::VersionChanged { stored },
        }
    }
}
