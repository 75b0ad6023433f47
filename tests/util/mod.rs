//! Test utilities for creating AppState against the mock upstream

use std::time::Duration;

use meridian::server::{
    model::app::AppState,
    service::{dashboard::fetcher::SectionFetcher, retry::RetryPolicy},
};
use meridian_test_utils::TestSetup;

/// Extension trait for TestSetup to create AppState pointing at the mock server
pub trait TestSetupExt {
    fn into_app_state(&self) -> AppState;
}

impl TestSetupExt for TestSetup {
    fn into_app_state(&self) -> AppState {
        // Short backoff keeps retry tests fast
        let retry = RetryPolicy::new(3, Duration::from_secs(5), Duration::from_millis(1));
        let fetcher = SectionFetcher::new(reqwest::Client::new(), self.url(), retry);

        AppState::new(fetcher, self.backend())
    }
}
