pub mod api;
pub mod explorer;
pub mod selection;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(explorer::index))
        // Partials (swapped in by the page script)
        .route("/partials/heatmap", get(explorer::heatmap_partial))
        .route("/partials/time-series", get(explorer::time_series_partial))
        .route("/partials/history", get(explorer::history_partial))
        // Filter
        .route("/api/filter", get(api::filter))
        .route("/api/filter/year", post(api::select_year))
        // Heatmap data
        .route("/api/matrix", get(api::matrix))
        .route("/api/heatmap/cells/:index", get(api::cell))
        .route("/api/heatmap/zoom", get(api::zoom))
        // Time series
        .route("/api/time-series", get(api::time_series))
        // Dataset load status
        .route("/api/dataset", get(api::dataset))
        // Selection and clipboard export
        .route(
            "/api/selection",
            post(selection::select_pair).delete(selection::clear),
        )
        .route(
            "/api/selection/toggle-history",
            post(selection::toggle_history),
        )
        .route("/api/selection/export", get(selection::export))
        .route("/api/selection/copied", post(selection::copied))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
