//! Explorer state container.
//!
//! All interactive state lives here and changes only through [`Action`]s
//! passed to [`ExplorerStore::reduce`]. Renderers read a snapshot and never
//! write back.

use serde::Serialize;

use crate::models::Transaction;
use crate::services::export::COPY_SUCCESS_MESSAGE;
use crate::services::year_filter::{FilterState, YearFilter};

#[derive(Debug, Clone)]
pub enum Action {
    /// The slider moved.
    SelectYear(i32),
    /// Append transactions to the selection list.
    Select(Vec<Transaction>),
    ClearSelection,
    ToggleHistory,
    CopySucceeded,
    CopyFailed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplorerStore {
    pub filter: FilterState,
    pub selected: Vec<Transaction>,
    pub show_history: bool,
    /// Transient status shown after a copy attempt.
    pub copy_status: Option<String>,
    #[serde(skip)]
    year_filter: YearFilter,
}

impl ExplorerStore {
    pub fn new(year_filter: YearFilter) -> Self {
        Self {
            filter: year_filter.initial_state(),
            selected: Vec::new(),
            show_history: false,
            copy_status: None,
            year_filter,
        }
    }

    pub fn year_filter(&self) -> &YearFilter {
        &self.year_filter
    }

    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::SelectYear(year) => {
                self.filter = self.year_filter.state_for(year);
            }
            Action::Select(transactions) => {
                self.selected.extend(transactions);
                self.copy_status = None;
            }
            Action::ClearSelection => {
                self.selected.clear();
                self.copy_status = None;
            }
            Action::ToggleHistory => {
                self.show_history = !self.show_history;
            }
            Action::CopySucceeded => {
                self.copy_status = Some(COPY_SUCCESS_MESSAGE.to_string());
            }
            Action::CopyFailed(reason) => {
                tracing::error!(reason = %reason, "Error copying transactions to clipboard");
            }
        }
    }
}
