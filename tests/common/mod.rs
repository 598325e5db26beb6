//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the router in memory against a dataset that is already
//! loaded, so every test starts from a known set of transactions.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use utxo_explorer::config::{Config, YearRange};
use utxo_explorer::handlers;
use utxo_explorer::models::{Timestamp, Transaction};
use utxo_explorer::services::dataset::Dataset;
use utxo_explorer::state::AppState;

/// 2020-01-01T00:00:00Z
pub const JAN_1_2020: i64 = 1_577_836_800_000;
/// 2020-01-02T00:00:00Z
pub const JAN_2_2020: i64 = 1_577_923_200_000;

/// A -> B 10, A -> C 5 on 1/1/2020 and B -> C 7 on 1/2/2020.
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new("A", "B", 10.0, Timestamp::from_millis(JAN_1_2020)),
        Transaction::new("A", "C", 5.0, Timestamp::from_millis(JAN_1_2020)),
        Transaction::new("B", "C", 7.0, Timestamp::from_millis(JAN_2_2020)),
    ]
}

/// A test client that simulates a browser session, allowing sequential requests
/// against the application.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// A client over [`sample_transactions`] with the default year range.
    pub fn new() -> Self {
        Self::with_transactions(sample_transactions())
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self::with_config(transactions, YearRange::default())
    }

    /// A client with a custom year -> count mapping, for exercising the
    /// prefix filter on a small dataset.
    pub fn with_config(transactions: Vec<Transaction>, years: YearRange) -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            static_path: PathBuf::from("static"),
            years,
            ..Config::default()
        };

        let dataset = Arc::new(Dataset::with_transactions(transactions));
        Self {
            state: AppState::new(config, dataset),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with form data and return status and body.
    pub async fn post_form(&self, uri: &str, form_data: &[(&str, &str)]) -> (StatusCode, String) {
        let body = form_data
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    /// Move the year slider.
    pub async fn select_year(&self, year: i32) -> serde_json::Value {
        let (status, body) = self
            .post_form("/api/filter/year", &[("year", &year.to_string())])
            .await;
        assert_eq!(status, StatusCode::OK, "select_year failed: {}", body);
        serde_json::from_str(&body).unwrap()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
