//! Mock upstream section endpoint creation utilities.
//!
//! Each method registers a mock on the shared mockito server and verifies it was called the
//! expected number of times. Endpoints created with `refresh = false` only match requests
//! without a query string, so a stray `?refresh=true` request is never served by them.

use std::{
    io::{self, Write},
    sync::{mpsc::Receiver, Mutex},
    time::Duration,
};

use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::{
    constant::TEST_SECTIONS,
    fixtures::section::{
        data::{mock_envelope, mock_error_envelope, mock_payload},
        SectionFixtures,
    },
};

fn section_path(section: &str) -> String {
    format!("/api/dashboard/{}", section)
}

/// Upper bound on how long a gated endpoint waits for its release signal.
const GATE_TIMEOUT: Duration = Duration::from_secs(5);

impl<'a> SectionFixtures<'a> {
    fn section_mock(&mut self, section: &str, refresh: bool) -> Mock {
        let path = section_path(section);
        let mock = self
            .setup
            .server
            .mock("GET", path.as_str())
            .with_header("content-type", "application/json");

        if refresh {
            mock.match_query(Matcher::UrlEncoded("refresh".into(), "true".into()))
                .match_header("cache-control", "no-cache")
        } else {
            mock
        }
    }

    /// Create a mock endpoint returning the given JSON body with the given status.
    ///
    /// # Arguments
    /// - `section` - Section identifier used for the endpoint path
    /// - `refresh` - Whether the endpoint matches force-refresh requests (`?refresh=true` and
    ///   `Cache-Control: no-cache`) instead of plain requests
    /// - `status` - HTTP status code to respond with
    /// - `body` - JSON body to respond with
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_endpoint(
        &mut self,
        section: &str,
        refresh: bool,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.section_mock(section, refresh)
            .with_status(status)
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint that holds its response until `gate` receives a signal.
    ///
    /// The body is written from mockito's body thread, so other endpoints on the server keep
    /// answering while this one waits. The wait gives up after a few seconds so a test that
    /// never releases the gate fails instead of hanging.
    ///
    /// # Arguments
    /// - `section` - Section identifier used for the endpoint path
    /// - `refresh` - Whether the endpoint matches force-refresh requests
    /// - `body` - JSON body sent once the gate opens
    /// - `gate` - Receives one signal per request to release
    pub fn create_gated_endpoint(
        &mut self,
        section: &str,
        refresh: bool,
        body: Value,
        gate: Receiver<()>,
    ) -> Mock {
        let gate = Mutex::new(gate);
        let body = body.to_string();

        self.section_mock(section, refresh)
            .with_status(200)
            .with_chunked_body(move |w| {
                let released = gate
                    .lock()
                    .map_err(|_| io::Error::other("gate poisoned"))?
                    .recv_timeout(GATE_TIMEOUT);
                released.map_err(|e| io::Error::new(io::ErrorKind::TimedOut, e))?;
                w.write_all(body.as_bytes())
            })
            .expect(1)
            .create()
    }

    /// Create a mock endpoint whose body breaks off after a partial envelope.
    pub fn create_truncated_endpoint(
        &mut self,
        section: &str,
        refresh: bool,
        expected_requests: usize,
    ) -> Mock {
        self.section_mock(section, refresh)
            .with_status(200)
            .with_chunked_body(|w| {
                w.write_all(br#"{"data": {"trend": "ri"#)?;
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
            })
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint serving the standard fixture payload for `section`.
    pub fn create_section_endpoint(
        &mut self,
        section: &str,
        refresh: bool,
        expected_requests: usize,
    ) -> Mock {
        let body = mock_envelope(mock_payload(section));
        self.create_endpoint(section, refresh, 200, body, expected_requests)
    }

    /// Create a mock endpoint that answers HTTP 200 with an inline `error` field.
    pub fn create_error_body_endpoint(
        &mut self,
        section: &str,
        refresh: bool,
        message: &str,
        expected_requests: usize,
    ) -> Mock {
        let body = mock_error_envelope(message);
        self.create_endpoint(section, refresh, 200, body, expected_requests)
    }

    /// Create a mock endpoint that always answers with `status` and an error body.
    pub fn create_status_endpoint(
        &mut self,
        section: &str,
        refresh: bool,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let body = mock_error_envelope("upstream failure");
        self.create_endpoint(section, refresh, status, body, expected_requests)
    }

    /// Create plain (non-refresh) endpoints for every section.
    ///
    /// # Returns
    /// - `Vec<Mock>` - One mock per section, in dashboard display order
    pub fn create_all_section_endpoints(&mut self, expected_requests: usize) -> Vec<Mock> {
        TEST_SECTIONS
            .iter()
            .map(|section| self.create_section_endpoint(section, false, expected_requests))
            .collect()
    }

    /// Create plain endpoints for every section except `skip`.
    pub fn create_section_endpoints_except(
        &mut self,
        skip: &str,
        expected_requests: usize,
    ) -> Vec<Mock> {
        TEST_SECTIONS
            .iter()
            .filter(|section| **section != skip)
            .map(|section| self.create_section_endpoint(section, false, expected_requests))
            .collect()
    }

    /// Create plain endpoints for every section and register them for `assert_mocks`.
    pub fn with_all_section_endpoints(&mut self, expected_requests: usize) {
        let mocks = self.create_all_section_endpoints(expected_requests);
        self.setup.mocks.extend(mocks);
    }
}
