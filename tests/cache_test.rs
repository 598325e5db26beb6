//! Integration tests for the generation-keyed derived-data cache.

mod common;

use std::sync::Arc;

use common::TestClient;
use serde_json::{json, Value};
use utxo_explorer::models::{Timestamp, Transaction};

fn other_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new("X", "Y", 1.0, Timestamp::from_millis(0)),
        Transaction::new("Y", "Z", 2.0, Timestamp::from_millis(0)),
        Transaction::new("Z", "X", 3.0, Timestamp::from_millis(0)),
    ]
}

/// Repeated reads of the same view share one computed matrix.
#[tokio::test]
async fn test_cached_reads_share_result() {
    let client = TestClient::new();
    let state = client.state();

    let view = state.filtered().unwrap();
    let first = state.matrix(&view);
    let second = state.matrix(&state.filtered().unwrap());
    assert!(Arc::ptr_eq(&first, &second));

    let buckets_1 = state.buckets(&view);
    let buckets_2 = state.buckets(&view);
    assert!(Arc::ptr_eq(&buckets_1, &buckets_2));
}

/// Storing a new dataset bumps its generation, so the next read
/// recomputes without any explicit invalidation.
#[tokio::test]
async fn test_dataset_store_refreshes_cache() {
    let client = TestClient::new();
    let state = client.state();

    let (_, before) = client.get_json::<Value>("/api/matrix").await;
    assert_eq!(before.unwrap()["participants"], json!(["A", "B", "C"]));

    // Same length, so only the generation tells the views apart.
    state.dataset.apply(Ok(other_transactions()));

    let (_, fresh) = client.get_json::<Value>("/api/matrix").await;
    assert_eq!(fresh.unwrap()["participants"], json!(["X", "Y", "Z"]));

    let (_, buckets) = client.get_json::<Value>("/api/time-series").await;
    assert_eq!(buckets.unwrap(), json!([{"date": "1/1/1970", "amount": 6.0}]));
}

/// A failed load after a good one empties every derived view.
#[tokio::test]
async fn test_failed_reload_clears_views() {
    let client = TestClient::new();
    let state = client.state();

    let view = state.filtered().unwrap();
    assert_eq!(state.matrix(&view).dimension(), 3);

    state
        .dataset
        .apply(Err(utxo_explorer::error::AppError::Status("DOWN".into())));

    let view = state.filtered().unwrap();
    assert!(view.is_empty());
    assert!(state.matrix(&view).is_empty());
}

/// Moving the slider changes the visible count, which is part of the key.
#[tokio::test]
async fn test_year_change_recomputes() {
    let client = TestClient::with_config(
        common::sample_transactions(),
        utxo_explorer::config::YearRange {
            base_count: 1,
            increment_per_year: 1,
            ..Default::default()
        },
    );
    let state = client.state();

    let before = state.matrix(&state.filtered().unwrap());
    client.select_year(2021).await;
    let after = state.matrix(&state.filtered().unwrap());

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.dimension(), 2);
    assert_eq!(after.dimension(), 3);
}
