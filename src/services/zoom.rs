//! Pan/zoom transforms for the heatmap.
//!
//! A transform maps plot coordinates to screen coordinates as
//! `screen = plot * k + (x, y)`. Every operation returns a transform whose
//! scale lies inside the scale extent and whose viewport stays inside the
//! translate extent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Shift by `(dx, dy)` in plot units.
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + self.k * dx,
            y: self.y + self.k * dy,
        }
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!("translate({:.2},{:.2}) scale({:.4})", self.x, self.y, self.k)
    }
}

/// Axis-aligned rectangle `[[x0, y0], [x1, y1]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Extent {
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: width,
            y1: height,
        }
    }
}

/// Zoom rules for one plot: scale bounds, viewport, and the region the
/// viewport may show. Double-click zoom is not part of the behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBehavior {
    pub min_scale: f64,
    pub max_scale: f64,
    pub viewport: Extent,
    pub translate_extent: Extent,
}

impl ZoomBehavior {
    /// 1x..10x over a `width` x `height` plot whose viewport is the plot itself.
    pub fn for_plot(width: f64, height: f64) -> Self {
        let extent = Extent::from_size(width, height);
        Self {
            min_scale: 1.0,
            max_scale: 10.0,
            viewport: extent,
            translate_extent: extent,
        }
    }

    pub fn clamp_scale(&self, k: f64) -> f64 {
        if k.is_nan() {
            return self.min_scale;
        }
        k.clamp(self.min_scale, self.max_scale)
    }

    /// Pull a transform back so the viewport stays within the translate
    /// extent. When the viewport is larger than the extent on an axis, the
    /// extent is centered instead.
    pub fn constrain(&self, transform: ZoomTransform) -> ZoomTransform {
        let t = ZoomTransform {
            k: self.clamp_scale(transform.k),
            x: finite_or_zero(transform.x),
            y: finite_or_zero(transform.y),
        };
        let v = self.viewport;
        let e = self.translate_extent;

        let dx0 = t.invert_x(v.x0) - e.x0;
        let dx1 = t.invert_x(v.x1) - e.x1;
        let dy0 = t.invert_y(v.y0) - e.y0;
        let dy1 = t.invert_y(v.y1) - e.y1;

        t.translate(correction(dx0, dx1), correction(dy0, dy1))
    }

    /// Scale by `factor` keeping the plot point under `(px, py)` fixed.
    pub fn scale_about(&self, transform: ZoomTransform, factor: f64, px: f64, py: f64) -> ZoomTransform {
        let k = self.clamp_scale(transform.k * factor);
        let plot_x = transform.invert_x(px);
        let plot_y = transform.invert_y(py);
        self.constrain(ZoomTransform {
            k,
            x: px - plot_x * k,
            y: py - plot_y * k,
        })
    }

    /// Wheel zoom: each unit of pixel delta is worth 0.2% of a doubling,
    /// scrolling up zooms in.
    pub fn wheel(&self, transform: ZoomTransform, delta_y: f64, px: f64, py: f64) -> ZoomTransform {
        let factor = 2f64.powf(-delta_y * 0.002);
        self.scale_about(transform, factor, px, py)
    }

    /// Drag pan by a screen-space delta.
    pub fn pan(&self, transform: ZoomTransform, dx: f64, dy: f64) -> ZoomTransform {
        self.constrain(ZoomTransform {
            k: transform.k,
            x: transform.x + dx,
            y: transform.y + dy,
        })
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Shift along one axis given how far each viewport edge overshoots.
fn correction(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        return (d0 + d1) / 2.0;
    }
    let pull = d0.min(0.0);
    if pull != 0.0 {
        pull
    } else {
        d1.max(0.0)
    }
}
