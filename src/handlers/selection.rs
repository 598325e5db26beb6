use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Form;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AppResult, RenderHtml};
use crate::handlers::explorer::HistoryPartial;
use crate::services::export::clipboard_text;
use crate::state::AppState;
use crate::store::Action;

#[derive(Debug, Deserialize)]
pub struct PairForm {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CopyResultForm {
    /// Set when the browser failed to write the clipboard.
    pub error: Option<String>,
}

/// Add every visible transaction from `from` to `to` to the selection.
pub async fn select_pair(
    State(state): State<AppState>,
    Form(form): Form<PairForm>,
) -> AppResult<Html<String>> {
    let view = state.filtered()?;
    let matching: Vec<_> = view
        .transactions()
        .iter()
        .filter(|t| t.from == form.from && t.to == form.to)
        .cloned()
        .collect();

    debug!(from = %form.from, to = %form.to, count = matching.len(), "Selecting transactions");
    let store = state.dispatch(Action::Select(matching))?;
    HistoryPartial::from_store(store).render_html()
}

pub async fn clear(State(state): State<AppState>) -> AppResult<Html<String>> {
    let store = state.dispatch(Action::ClearSelection)?;
    HistoryPartial::from_store(store).render_html()
}

pub async fn toggle_history(State(state): State<AppState>) -> AppResult<Html<String>> {
    let store = state.dispatch(Action::ToggleHistory)?;
    HistoryPartial::from_store(store).render_html()
}

/// Clipboard text for the current selection.
pub async fn export(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let store = state.snapshot()?;
    info!(count = store.selected.len(), "Exporting selected transactions");
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        clipboard_text(&store.selected),
    ))
}

/// Browser report of the clipboard write outcome.
pub async fn copied(
    State(state): State<AppState>,
    Form(form): Form<CopyResultForm>,
) -> AppResult<Html<String>> {
    let action = match form.error.filter(|e| !e.is_empty()) {
        Some(reason) => Action::CopyFailed(reason),
        None => Action::CopySucceeded,
    };
    let store = state.dispatch(action)?;
    HistoryPartial::from_store(store).render_html()
}
