use serde::Serialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMark {
    pub year: i32,
    /// Offset along the track, 0..=100.
    pub left_percent: f64,
}

/// Range input from `min_year` to `max_year` in steps of one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSlider {
    pub min_year: i32,
    pub max_year: i32,
    pub value: i32,
}

impl YearSlider {
    pub fn new(min_year: i32, max_year: i32, value: i32) -> Self {
        Self {
            min_year,
            max_year,
            value: value.clamp(min_year, max_year),
        }
    }

    pub fn step(&self) -> i32 {
        1
    }

    /// One label per year, spread proportionally along the track.
    pub fn marks(&self) -> Vec<YearMark> {
        let count = (self.max_year - self.min_year + 1).max(0) as usize;
        let gaps = count.saturating_sub(1).max(1) as f64;

        (self.min_year..=self.max_year)
            .enumerate()
            .map(|(i, year)| YearMark {
                year,
                left_percent: (i as f64 / gaps * 10_000.0).round() / 100.0,
            })
            .collect()
    }
}

/// Parse the raw value of the range input.
pub fn parse_year(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid year: {:?}", raw)))
}
