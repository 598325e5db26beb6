use std::sync::{Arc, Mutex, MutexGuard};

use crate::cache::{AppCache, ViewKey};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Transaction;
use crate::services::dataset::Dataset;
use crate::services::heatmap::HeatmapLayout;
use crate::services::matrix::VolumeMatrix;
use crate::services::time_series::{bucket_by_date, ChartLayout, DateBucket};
use crate::services::year_filter::{prefix_len, FilterState, YearFilter};
use crate::store::{Action, ExplorerStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dataset: Arc<Dataset>,
    pub store: Arc<Mutex<ExplorerStore>>,
    pub cache: Arc<AppCache>,
    pub heatmap_layout: HeatmapLayout,
    pub chart_layout: ChartLayout,
}

/// The transactions currently in view, plus the filter that selected them.
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub filter: FilterState,
    pub total: usize,
    key: ViewKey,
    transactions: Arc<[Transaction]>,
    len: usize,
}

impl FilteredView {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AppState {
    pub fn new(config: Config, dataset: Arc<Dataset>) -> Self {
        let store = ExplorerStore::new(YearFilter::new(config.years));
        Self {
            config: Arc::new(config),
            dataset,
            store: Arc::new(Mutex::new(store)),
            cache: Arc::new(AppCache::new()),
            heatmap_layout: HeatmapLayout::default(),
            chart_layout: ChartLayout::default(),
        }
    }

    pub fn store(&self) -> AppResult<MutexGuard<'_, ExplorerStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("Explorer state lock poisoned".into()))
    }

    /// Apply an action and return the resulting snapshot.
    pub fn dispatch(&self, action: Action) -> AppResult<ExplorerStore> {
        let mut store = self.store()?;
        store.reduce(action);
        Ok(store.clone())
    }

    pub fn snapshot(&self) -> AppResult<ExplorerStore> {
        Ok(self.store()?.clone())
    }

    pub fn filtered(&self) -> AppResult<FilteredView> {
        let filter = self.store()?.filter;
        let (generation, transactions) = self.dataset.versioned();
        let total = transactions.len();
        let len = prefix_len(filter.transaction_count, total);
        Ok(FilteredView {
            filter,
            total,
            key: ViewKey {
                generation,
                count: len,
            },
            transactions,
            len,
        })
    }

    pub fn matrix(&self, view: &FilteredView) -> Arc<VolumeMatrix> {
        self.cache.matrix(view.key, || {
            let matrix = VolumeMatrix::from_transactions(view.transactions());
            if matrix.dimension() > self.config.max_participants {
                tracing::warn!(
                    participants = matrix.dimension(),
                    limit = self.config.max_participants,
                    "Volume matrix exceeds participant soft limit"
                );
            }
            matrix
        })
    }

    pub fn buckets(&self, view: &FilteredView) -> Arc<Vec<DateBucket>> {
        self.cache.buckets(view.key, || {
            bucket_by_date(view.transactions(), &self.config.date_format)
        })
    }
}
