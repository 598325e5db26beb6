//! Scales shared by the heatmap and the line chart.

/// Nine-class sequential blue ramp, lightest first.
const BLUES: [(u8, u8, u8); 9] = [
    (0xf7, 0xfb, 0xff),
    (0xde, 0xeb, 0xf7),
    (0xc6, 0xdb, 0xef),
    (0x9e, 0xca, 0xe1),
    (0x6b, 0xae, 0xd6),
    (0x42, 0x92, 0xc6),
    (0x21, 0x71, 0xb5),
    (0x08, 0x51, 0x9c),
    (0x08, 0x30, 0x6b),
];

/// Ordinal band scale over `n` categories.
///
/// Outer and inner padding are the same fraction of a step, and leftover
/// space is split evenly on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
    len: usize,
}

impl BandScale {
    pub fn new(len: usize, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = len as f64;
        let step = (r1 - r0) / (n - padding + 2.0 * padding).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding),
            len,
        }
    }

    /// Start coordinate of category `index`.
    pub fn position(&self, index: usize) -> Option<f64> {
        (index < self.len).then(|| self.start + self.step * index as f64)
    }

    /// Center coordinate of category `index`.
    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|p| p + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Continuous `[0, max]` -> blue ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    max: f64,
}

impl SequentialScale {
    pub fn new(max: f64) -> Self {
        Self { max }
    }

    /// Normalized position of `value`, clamped to `[0, 1]`. A degenerate
    /// domain puts every value mid-ramp.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max <= 0.0 || !self.max.is_finite() {
            return 0.5;
        }
        (value / self.max).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> String {
        interpolate_blues(self.normalize(value))
    }
}

/// Piecewise-linear interpolation through the blue ramp.
pub fn interpolate_blues(t: f64) -> String {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (BLUES.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(BLUES.len() - 2);
    let frac = scaled - lower as f64;

    let (r0, g0, b0) = BLUES[lower];
    let (r1, g1, b1) = BLUES[lower + 1];
    let mix = |a: u8, b: u8| -> u8 { (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8 };

    format!("#{:02x}{:02x}{:02x}", mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Linear map from a value domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Round step near `range / count` taken from the 1-2-5 series.
fn tick_step(lowest: f64, highest: f64, count: usize) -> f64 {
    let range = (highest - lowest).abs().max(f64::EPSILON);
    let rough = range / count.max(1) as f64;
    let base = 10f64.powf(rough.log10().floor());

    match rough / base {
        r if r <= 1.0 => base,
        r if r <= 2.0 => 2.0 * base,
        r if r <= 5.0 => 5.0 * base,
        _ => 10.0 * base,
    }
}

/// Tick values covering `[lowest, highest]`, with the top rounded up to a
/// whole step so the axis ends on a tick.
pub fn nice_ticks(lowest: f64, highest: f64, count: usize) -> Vec<f64> {
    if !lowest.is_finite() || !highest.is_finite() || highest < lowest {
        return Vec::new();
    }
    if (highest - lowest).abs() < f64::EPSILON {
        return vec![lowest];
    }

    let step = tick_step(lowest, highest, count);
    let first = (lowest / step).floor() * step;
    let last = (highest / step).ceil() * step;

    let steps = ((last - first) / step).round() as usize;
    (0..=steps).map(|i| first + step * i as f64).collect()
}
