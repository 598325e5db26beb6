//! Heatmap scene: a pure description of what to draw for a volume matrix.
//!
//! Cell `(i, j)` sits at `(x(participants[j]), y(participants[i]))`, so rows
//! are origins and columns are destinations.

use serde::Serialize;

use crate::filters::{format_amount, shorten_id};
use crate::services::matrix::VolumeMatrix;
use crate::services::scale::{interpolate_blues, BandScale, SequentialScale};
use crate::services::zoom::{ZoomBehavior, ZoomTransform};

const AXIS_LABEL_CHARS: usize = 12;
const LEGEND_STOPS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_left: f64,
    pub padding: f64,
}

impl Default for HeatmapLayout {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 640.0,
            margin_top: 90.0,
            margin_left: 90.0,
            padding: 0.05,
        }
    }
}

impl HeatmapLayout {
    pub fn zoom(&self) -> ZoomBehavior {
        ZoomBehavior::for_plot(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    /// Row-major index into the flattened matrix.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl HeatCell {
    pub fn tooltip(&self) -> String {
        format!("From: {}\nTo: {}\nAmount: {}", self.from, self.to, self.amount)
    }

    pub fn amount_label(&self) -> String {
        format_amount(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    /// Band center along the axis.
    pub position: f64,
    pub text: String,
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendStop {
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapScene {
    pub outer_width: f64,
    pub outer_height: f64,
    pub margin_top: f64,
    pub margin_left: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub cells: Vec<HeatCell>,
    pub x_axis: Vec<AxisLabel>,
    pub y_axis: Vec<AxisLabel>,
    pub max: f64,
    pub legend: Vec<LegendStop>,
    pub transform: ZoomTransform,
}

impl HeatmapScene {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn max_label(&self) -> String {
        format_amount(self.max)
    }

    pub fn transform_attr(&self) -> String {
        self.transform.to_svg()
    }
}

/// Lay out every cell and axis label for `matrix` under `transform`.
///
/// The transform is constrained against the layout before it is stored.
pub fn build_scene(
    matrix: &VolumeMatrix,
    layout: &HeatmapLayout,
    transform: ZoomTransform,
) -> HeatmapScene {
    let n = matrix.dimension();
    let participants = matrix.participants();
    let x_scale = BandScale::new(n, (0.0, layout.width), layout.padding);
    let y_scale = BandScale::new(n, (0.0, layout.height), layout.padding);
    let max = matrix.max();
    let color = SequentialScale::new(max);

    let mut cells = Vec::with_capacity(n * n);
    for (row, values) in matrix.rows().iter().enumerate() {
        for (col, &amount) in values.iter().enumerate() {
            let (Some(x), Some(y)) = (x_scale.position(col), y_scale.position(row)) else {
                continue;
            };
            cells.push(HeatCell {
                index: row * n + col,
                x: round2(x),
                y: round2(y),
                width: round2(x_scale.bandwidth()),
                height: round2(y_scale.bandwidth()),
                fill: color.color(amount),
                from: participants[row].clone(),
                to: participants[col].clone(),
                amount,
            });
        }
    }

    let axis = |scale: &BandScale| -> Vec<AxisLabel> {
        participants
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                scale.center(i).map(|position| AxisLabel {
                    position: round2(position),
                    text: shorten_id(p, AXIS_LABEL_CHARS),
                    full: p.clone(),
                })
            })
            .collect()
    };

    let legend = (0..LEGEND_STOPS)
        .map(|i| {
            let t = i as f64 / (LEGEND_STOPS - 1) as f64;
            LegendStop {
                offset: round2(t * 100.0),
                color: interpolate_blues(t),
            }
        })
        .collect();

    HeatmapScene {
        outer_width: layout.width + layout.margin_left,
        outer_height: layout.height + layout.margin_top,
        margin_top: layout.margin_top,
        margin_left: layout.margin_left,
        plot_width: layout.width,
        plot_height: layout.height,
        x_axis: axis(&x_scale),
        y_axis: axis(&y_scale),
        cells,
        max,
        legend,
        transform: layout.zoom().constrain(transform),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Timestamp, Transaction};

    fn matrix() -> VolumeMatrix {
        let tx = |from: &str, to: &str, amount: f64| {
            Transaction::new(from, to, amount, Timestamp::from_millis(0))
        };
        VolumeMatrix::from_transactions(&[
            tx("A", "B", 10.0),
            tx("B", "C", 20.0),
            tx("A", "B", 5.0),
        ])
    }

    #[test]
    fn test_one_cell_per_matrix_entry() {
        let scene = build_scene(&matrix(), &HeatmapLayout::default(), ZoomTransform::IDENTITY);
        assert_eq!(scene.cells.len(), 9);
        assert_eq!(scene.x_axis.len(), 3);
        assert_eq!(scene.y_axis.len(), 3);
        assert_eq!(scene.max, 20.0);
    }

    #[test]
    fn test_cell_position_row_is_origin() {
        let layout = HeatmapLayout::default();
        let scene = build_scene(&matrix(), &layout, ZoomTransform::IDENTITY);
        let band = BandScale::new(3, (0.0, layout.width), layout.padding);

        // Row 1 (B) -> column 2 (C)
        let cell = &scene.cells[5];
        assert_eq!(cell.index, 5);
        assert_eq!(cell.from, "B");
        assert_eq!(cell.to, "C");
        assert_eq!(cell.amount, 20.0);
        assert_eq!(cell.x, round2(band.position(2).unwrap()));
        assert_eq!(cell.y, round2(band.position(1).unwrap()));
        assert_eq!(cell.fill, "#08306b");
    }

    #[test]
    fn test_empty_cells_use_lightest_color() {
        let scene = build_scene(&matrix(), &HeatmapLayout::default(), ZoomTransform::IDENTITY);
        assert_eq!(scene.cells[0].fill, "#f7fbff");
    }

    #[test]
    fn test_tooltip_text() {
        let scene = build_scene(&matrix(), &HeatmapLayout::default(), ZoomTransform::IDENTITY);
        assert_eq!(scene.cells[1].tooltip(), "From: A\nTo: B\nAmount: 15");
    }

    #[test]
    fn test_transform_is_constrained() {
        let scene = build_scene(
            &matrix(),
            &HeatmapLayout::default(),
            ZoomTransform {
                k: 50.0,
                x: 100.0,
                y: 100.0,
            },
        );
        assert_eq!(scene.transform.k, 10.0);
        assert_eq!(scene.transform.x, 0.0);
        assert_eq!(scene.transform.y, 0.0);
    }

    #[test]
    fn test_empty_matrix_scene() {
        let scene = build_scene(
            &VolumeMatrix::default(),
            &HeatmapLayout::default(),
            ZoomTransform::IDENTITY,
        );
        assert!(scene.is_empty());
        assert!(scene.x_axis.is_empty());
        assert_eq!(scene.legend.len(), LEGEND_STOPS);
    }
}
