pub mod dataset;
pub mod export;
pub mod heatmap;
pub mod matrix;
pub mod scale;
pub mod time_series;
pub mod year_filter;
pub mod year_slider;
pub mod zoom;
