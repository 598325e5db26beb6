//! Selection list, history panel, and clipboard export.

mod common;

use axum::http::StatusCode;
use common::{sample_transactions, TestClient};
use utxo_explorer::config::YearRange;

#[tokio::test]
async fn test_select_pair_adds_matching_transactions() {
    let client = TestClient::new();

    let (status, body) = client
        .post_form("/api/selection", &[("from", "A"), ("to", "B")])
        .await;
    assert_eq!(status, StatusCode::OK);
    // Panel stays collapsed until toggled.
    assert!(body.contains("Preview Transactions"));
    assert!(!body.contains("<table>"));

    let (_, text) = client.get("/api/selection/export").await;
    assert_eq!(text, "From: A, To: B, Amount: 10, Timestamp: 1577836800000");
}

#[tokio::test]
async fn test_selection_accumulates() {
    let client = TestClient::new();

    client
        .post_form("/api/selection", &[("from", "A"), ("to", "B")])
        .await;
    client
        .post_form("/api/selection", &[("from", "B"), ("to", "C")])
        .await;
    client
        .post_form("/api/selection", &[("from", "A"), ("to", "B")])
        .await;

    let (_, text) = client.get("/api/selection/export").await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "From: B, To: C, Amount: 7, Timestamp: 1577923200000");
    assert_eq!(lines[0], lines[2]);
}

#[tokio::test]
async fn test_empty_cell_selects_nothing() {
    let client = TestClient::new();

    client
        .post_form("/api/selection", &[("from", "C"), ("to", "A")])
        .await;

    let (status, text) = client.get("/api/selection/export").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_selection_respects_year_filter() {
    let years = YearRange {
        base_count: 1,
        increment_per_year: 1,
        ..YearRange::default()
    };
    let client = TestClient::with_config(sample_transactions(), years);

    // Only the first transaction is visible in the base year.
    client
        .post_form("/api/selection", &[("from", "B"), ("to", "C")])
        .await;
    let (_, text) = client.get("/api/selection/export").await;
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_toggle_history() {
    let client = TestClient::new();
    client
        .post_form("/api/selection", &[("from", "A"), ("to", "C")])
        .await;

    let (status, body) = client
        .post_form("/api/selection/toggle-history", &[])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hide Transactions"));
    assert!(body.contains("<table>"));
    assert!(body.contains("<td>A</td><td>C</td><td>5</td>"));

    let (_, body) = client
        .post_form("/api/selection/toggle-history", &[])
        .await;
    assert!(body.contains("Preview Transactions"));
    assert!(!body.contains("<table>"));
}

#[tokio::test]
async fn test_clear_selection() {
    let client = TestClient::new();
    client
        .post_form("/api/selection", &[("from", "A"), ("to", "B")])
        .await;

    let (status, _) = client.delete("/api/selection").await;
    assert_eq!(status, StatusCode::OK);

    let (_, text) = client.get("/api/selection/export").await;
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_copy_outcome() {
    let client = TestClient::new();
    client
        .post_form("/api/selection", &[("from", "A"), ("to", "B")])
        .await;

    let (_, body) = client
        .post_form("/api/selection/copied", &[("error", "NotAllowedError")])
        .await;
    assert!(!body.contains("Transactions copied to clipboard!"));

    let (status, body) = client.post_form("/api/selection/copied", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Transactions copied to clipboard!"));

    // A new selection clears the status.
    let (_, body) = client
        .post_form("/api/selection", &[("from", "B"), ("to", "C")])
        .await;
    assert!(!body.contains("Transactions copied to clipboard!"));
}
