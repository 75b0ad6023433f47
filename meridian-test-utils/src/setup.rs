use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test environment for dashboard tests.
///
/// Holds a mock upstream server standing in for the six section providers, plus an
/// in-memory session store and a session over it acting as the session-scoped cache.
pub struct TestSetup {
    pub server: ServerGuard,
    pub store: MemoryStore,
    pub session: Session,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;

        let store = MemoryStore::default();
        let session = Session::new(None, Arc::new(store.clone()), None);

        Ok(TestSetup {
            server: mock_server,
            store,
            session,
            mocks: Vec::new(),
        })
    }

    /// Base URL of the mock upstream, used as the section API base URL.
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Shared handle to the session store, as the session layer would hold it.
    pub fn backend(&self) -> Arc<MemoryStore> {
        Arc::new(self.store.clone())
    }

    /// Create a second, unrelated session over the same store.
    ///
    /// Used to check that cache state never leaks between sessions.
    pub fn new_session(&self) -> Session {
        Session::new(None, self.backend(), None)
    }

    /// Open another handle onto the test session, as a concurrent request for the same
    /// visitor would.
    ///
    /// The handle snapshots the session independently of [`TestSetup::session`]. The test
    /// session must have been saved first so it has an id.
    pub fn concurrent_session(&self) -> Session {
        Session::new(self.session.id(), self.backend(), None)
    }

    /// Assert all mock endpoints registered through `with_*` fixtures were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
