use std::sync::Arc;

use tower_sessions::SessionStore;

use crate::server::service::dashboard::{fetcher::SectionFetcher, lock::PrincipalLocks};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: SectionFetcher,
    pub locks: PrincipalLocks,
    /// Backing store of the session layer, read directly for the dashboard cache
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(fetcher: SectionFetcher, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            fetcher,
            locks: PrincipalLocks::default(),
            sessions,
        }
    }
}
