use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppResult, RenderHtml};
use crate::models::Transaction;
use crate::services::dataset::LoadStatus;
use crate::services::heatmap::{build_scene, HeatmapScene};
use crate::services::time_series::{build_chart, LineChartScene};
use crate::services::year_filter::FilterState;
use crate::services::year_slider::YearSlider;
use crate::services::zoom::ZoomTransform;
use crate::state::AppState;
use crate::store::ExplorerStore;
use crate::VERSION;

/// Optional zoom transform carried by heatmap requests.
#[derive(Debug, Default, Deserialize)]
pub struct TransformParams {
    pub k: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl TransformParams {
    pub fn transform(&self) -> ZoomTransform {
        ZoomTransform {
            k: self.k.unwrap_or(1.0),
            x: self.x.unwrap_or(0.0),
            y: self.y.unwrap_or(0.0),
        }
    }
}

/// Transaction-history panel contents.
pub struct HistoryPanel {
    pub show: bool,
    pub rows: Vec<Transaction>,
    pub copy_status: Option<String>,
}

impl From<ExplorerStore> for HistoryPanel {
    fn from(store: ExplorerStore) -> Self {
        Self {
            show: store.show_history,
            rows: store.selected,
            copy_status: store.copy_status,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/explorer.html")]
pub struct ExplorerTemplate {
    pub title: String,
    pub version: &'static str,
    pub slider: YearSlider,
    pub filter: FilterState,
    pub dataset_status: LoadStatus,
    pub shown: usize,
    pub total: usize,
    pub heatmap: HeatmapScene,
    pub chart: LineChartScene,
    pub history: HistoryPanel,
}

#[derive(Template)]
#[template(path = "partials/heatmap.html")]
pub struct HeatmapPartial {
    pub heatmap: HeatmapScene,
}

#[derive(Template)]
#[template(path = "partials/time_series.html")]
pub struct TimeSeriesPartial {
    pub chart: LineChartScene,
}

#[derive(Template)]
#[template(path = "partials/history.html")]
pub struct HistoryPartial {
    pub history: HistoryPanel,
}

impl HistoryPartial {
    pub fn from_store(store: ExplorerStore) -> Self {
        Self {
            history: store.into(),
        }
    }
}

fn heatmap_scene(state: &AppState, transform: ZoomTransform) -> AppResult<HeatmapScene> {
    let view = state.filtered()?;
    let matrix = state.matrix(&view);
    Ok(build_scene(&matrix, &state.heatmap_layout, transform))
}

fn chart_scene(state: &AppState) -> AppResult<LineChartScene> {
    let view = state.filtered()?;
    let buckets = state.buckets(&view);
    Ok(build_chart(&buckets, &state.chart_layout))
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let store = state.snapshot()?;
    let view = state.filtered()?;
    let years = state.config.years;

    let matrix = state.matrix(&view);
    let buckets = state.buckets(&view);
    debug!(
        year = view.filter.current_year,
        shown = view.len(),
        total = view.total,
        participants = matrix.dimension(),
        buckets = buckets.len(),
        "Rendering explorer"
    );

    let template = ExplorerTemplate {
        title: "Transaction Explorer".into(),
        version: VERSION,
        slider: YearSlider::new(years.min_year, years.max_year, store.filter.current_year),
        filter: view.filter,
        dataset_status: state.dataset.status(),
        shown: view.len(),
        total: view.total,
        heatmap: build_scene(&matrix, &state.heatmap_layout, ZoomTransform::IDENTITY),
        chart: build_chart(&buckets, &state.chart_layout),
        history: store.into(),
    };

    template.render_html()
}

pub async fn heatmap_partial(
    State(state): State<AppState>,
    Query(params): Query<TransformParams>,
) -> AppResult<Html<String>> {
    HeatmapPartial {
        heatmap: heatmap_scene(&state, params.transform())?,
    }
    .render_html()
}

pub async fn time_series_partial(State(state): State<AppState>) -> AppResult<Html<String>> {
    TimeSeriesPartial {
        chart: chart_scene(&state)?,
    }
    .render_html()
}

pub async fn history_partial(State(state): State<AppState>) -> AppResult<Html<String>> {
    HistoryPartial::from_store(state.snapshot()?).render_html()
}
