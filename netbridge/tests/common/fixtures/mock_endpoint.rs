//! Mock HTTP endpoint for testing
//!
//! Wraps a wiremock server so request manager tests exercise the real
//! reqwest transport without network access.

use std::time::Duration;
use wiremock::{
    matchers::{body_string, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockEndpoint {
    pub server: MockServer,
    pub base_url: String,
}

impl MockEndpoint {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET `endpoint` answers 200 with `body`
    pub async fn mock_get(&self, endpoint: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// GET `endpoint` answers 200 only when `name: value` is present
    pub async fn mock_get_with_header(&self, endpoint: &str, name: &str, value: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header(name, value))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// POST `endpoint` with exactly `expected_body` as JSON answers 201 with `body`
    pub async fn mock_post(&self, endpoint: &str, expected_body: &str, body: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(header("content-type", "application/json; charset=utf-8"))
            .and(body_string(expected_body))
            .respond_with(ResponseTemplate::new(201).set_body_string(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Any method on `endpoint` answers `status_code` with `body`
    pub async fn mock_status(&self, endpoint: &str, status_code: u16, body: &str) {
        Mock::given(path(endpoint))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// GET `endpoint` answers only after `delay`
    pub async fn mock_slow(&self, endpoint: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Fail the test on drop if anything hits the server
    pub async fn expect_no_requests(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub async fn received_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
