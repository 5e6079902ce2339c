//! Mock HTTP fixture server for testing
//!
//! Serves collection documents the way a static file host would, using
//! wiremock for configurable responses.

#![allow(dead_code)]

use std::time::Duration;
use serde_json::Value;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock static fixture host
pub struct FixtureMockServer {
    pub server: MockServer,
}

impl FixtureMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL the fixtures are served under
    pub fn base_url(&self) -> String {
        format!("{}/data/", self.server.uri())
    }

    pub async fn serve(&self, resource: &str, document: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/data/{}", resource)))
            .respond_with(ResponseTemplate::new(200).set_body_json(document))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_delayed(&self, resource: &str, document: Value, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(format!("/data/{}", resource)))
            .respond_with(ResponseTemplate::new(200).set_body_json(document).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_raw(&self, resource: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/data/{}", resource)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received for `resource` so far
    pub async fn hits(&self, resource: &str) -> usize {
        let wanted = format!("/data/{}", resource);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == wanted)
            .count()
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
