//! One-shot dataset loading.
//!
//! The document is fetched (or read) exactly once. Any failure is logged and
//! leaves the transaction list empty; there is no retry.

use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::DatasetSource;
use crate::error::{AppError, AppResult};
use crate::models::Transaction;

const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

impl LoadStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Snapshot {
    /// Bumped on every store, so derived data keyed on it goes stale.
    generation: u64,
    transactions: Arc<[Transaction]>,
    status: LoadStatus,
}

/// The loaded transactions, shared read-only once set.
#[derive(Debug, Default)]
pub struct Dataset {
    inner: RwLock<Snapshot>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dataset that is already loaded, for tests and local tooling.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            inner: RwLock::new(Snapshot {
                generation: 1,
                transactions: transactions.into(),
                status: LoadStatus::Loaded,
            }),
        }
    }

    pub fn transactions(&self) -> Arc<[Transaction]> {
        self.inner
            .read()
            .map(|s| Arc::clone(&s.transactions))
            .unwrap_or_else(|_| Arc::from(Vec::new()))
    }

    /// The transactions together with the generation they belong to.
    pub fn versioned(&self) -> (u64, Arc<[Transaction]>) {
        self.inner
            .read()
            .map(|s| (s.generation, Arc::clone(&s.transactions)))
            .unwrap_or_else(|_| (0, Arc::from(Vec::new())))
    }

    pub fn generation(&self) -> u64 {
        self.versioned().0
    }

    pub fn status(&self) -> LoadStatus {
        self.inner
            .read()
            .map(|s| s.status.clone())
            .unwrap_or_else(|_| LoadStatus::Failed("dataset lock poisoned".into()))
    }

    pub fn len(&self) -> usize {
        self.transactions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&self, transactions: Vec<Transaction>, status: LoadStatus) {
        if let Ok(mut guard) = self.inner.write() {
            let generation = guard.generation + 1;
            *guard = Snapshot {
                generation,
                transactions: transactions.into(),
                status,
            };
        }
    }

    /// Store the outcome of a load attempt. Failures are logged and leave
    /// the list empty.
    pub fn apply(&self, result: AppResult<Vec<Transaction>>) {
        match result {
            Ok(transactions) => {
                info!(count = transactions.len(), "Dataset loaded");
                self.set(transactions, LoadStatus::Loaded);
            }
            Err(e) => {
                error!(error = %e, "Error fetching data");
                self.set(Vec::new(), LoadStatus::Failed(e.to_string()));
            }
        }
    }
}

/// Parse the `{status, data: {transactions}}` document. A status other than
/// `"OK"` is an error, regardless of what `data` holds.
pub fn parse_document(body: &str) -> AppResult<Vec<Transaction>> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.status != STATUS_OK {
        return Err(AppError::Status(envelope.status));
    }

    let data = envelope
        .data
        .ok_or_else(|| AppError::Internal("Dataset has no data section".into()))?;
    let payload: Payload = serde_json::from_value(data)?;
    Ok(payload.transactions)
}

fn create_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

pub async fn fetch_remote(url: &str, timeout: Duration) -> AppResult<Vec<Transaction>> {
    debug!(url = %url, "Fetching dataset");
    let client = create_client(timeout)?;
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_document(&body)
}

pub async fn read_file(path: &Path) -> AppResult<Vec<Transaction>> {
    debug!(path = %path.display(), "Reading dataset");
    let body = tokio::fs::read_to_string(path).await?;
    parse_document(&body)
}

pub async fn load(source: &DatasetSource, timeout: Duration) -> AppResult<Vec<Transaction>> {
    match source {
        DatasetSource::Remote(url) => fetch_remote(url, timeout).await,
        DatasetSource::File(path) => read_file(path).await,
    }
}

/// Fire-and-forget load into `dataset`.
pub fn spawn_load(dataset: Arc<Dataset>, source: DatasetSource, timeout: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = load(&source, timeout).await;
        dataset.apply(result);
    })
}
