use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::Form;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::dataset::LoadStatus;
use crate::services::matrix::CellInfo;
use crate::services::time_series::{order_buckets, BucketOrder, DateBucket};
use crate::services::year_filter::FilterState;
use crate::services::year_slider::parse_year;
use crate::services::zoom::ZoomTransform;
use crate::state::AppState;
use crate::store::Action;

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    #[serde(flatten)]
    pub filter: FilterState,
    pub shown: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct YearForm {
    pub year: String,
}

#[derive(Debug, Serialize)]
pub struct MatrixResponse {
    pub participants: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub max: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub status: LoadStatus,
    pub total: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeSeriesParams {
    pub order: Option<String>,
}

/// Current transform plus at most one gesture to apply to it.
#[derive(Debug, Default, Deserialize)]
pub struct ZoomParams {
    pub k: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// Wheel delta in pixels, applied about `(px, py)`.
    pub wheel: Option<f64>,
    pub px: Option<f64>,
    pub py: Option<f64>,
    /// Drag delta in screen pixels.
    pub dx: Option<f64>,
    pub dy: Option<f64>,
}

fn filter_response(state: &AppState) -> AppResult<FilterResponse> {
    let view = state.filtered()?;
    Ok(FilterResponse {
        filter: view.filter,
        shown: view.len(),
        total: view.total,
    })
}

pub async fn filter(State(state): State<AppState>) -> AppResult<Json<FilterResponse>> {
    Ok(Json(filter_response(&state)?))
}

pub async fn select_year(
    State(state): State<AppState>,
    Form(form): Form<YearForm>,
) -> AppResult<Json<FilterResponse>> {
    let year = parse_year(&form.year)?;
    let store = state.dispatch(Action::SelectYear(year))?;
    tracing::debug!(
        year = store.filter.current_year,
        count = store.filter.transaction_count,
        "Year selected"
    );
    Ok(Json(filter_response(&state)?))
}

pub async fn matrix(State(state): State<AppState>) -> AppResult<Json<MatrixResponse>> {
    let view = state.filtered()?;
    let matrix = state.matrix(&view);
    Ok(Json(MatrixResponse {
        participants: matrix.participants().to_vec(),
        matrix: matrix.rows().to_vec(),
        max: matrix.max(),
        total: matrix.total(),
    }))
}

pub async fn cell(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<CellInfo>> {
    let view = state.filtered()?;
    state
        .matrix(&view)
        .cell_info(index)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No heatmap cell at index {}", index)))
}

pub async fn zoom(
    State(state): State<AppState>,
    Query(params): Query<ZoomParams>,
) -> Json<ZoomTransform> {
    let behavior = state.heatmap_layout.zoom();
    let current = behavior.constrain(ZoomTransform {
        k: params.k.unwrap_or(1.0),
        x: params.x.unwrap_or(0.0),
        y: params.y.unwrap_or(0.0),
    });

    let next = match (params.wheel, params.dx, params.dy) {
        (Some(delta), _, _) => behavior.wheel(
            current,
            delta,
            params.px.unwrap_or(0.0),
            params.py.unwrap_or(0.0),
        ),
        (None, dx, dy) if dx.is_some() || dy.is_some() => {
            behavior.pan(current, dx.unwrap_or(0.0), dy.unwrap_or(0.0))
        }
        _ => current,
    };

    Json(next)
}

pub async fn time_series(
    State(state): State<AppState>,
    Query(params): Query<TimeSeriesParams>,
) -> AppResult<Json<Vec<DateBucket>>> {
    let order = match params.order.as_deref() {
        None => BucketOrder::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Validation(format!("Unknown bucket order: {}", raw)))?,
    };

    let view = state.filtered()?;
    let buckets = state.buckets(&view);
    Ok(Json(order_buckets(buckets.as_ref().clone(), order)))
}

pub async fn dataset(State(state): State<AppState>) -> Json<DatasetResponse> {
    Json(DatasetResponse {
        status: state.dataset.status(),
        total: state.dataset.len(),
    })
}
