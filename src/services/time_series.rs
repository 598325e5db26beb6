//! Date-bucketed totals and the line chart drawn from them.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_utils::format_day;
use crate::filters::{abbreviate, format_amount};
use crate::models::Transaction;
use crate::services::scale::{nice_ticks, LinearScale};

/// Total amount for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateBucket {
    pub date: String,
    pub amount: f64,
    #[serde(skip)]
    pub day: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BucketOrder {
    /// Order in which each date first appears in the input.
    #[default]
    Appearance,
    /// Ascending by date; undated buckets last.
    Chronological,
}

impl FromStr for BucketOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appearance" => Ok(Self::Appearance),
            "chronological" => Ok(Self::Chronological),
            _ => Err(()),
        }
    }
}

/// Sum amounts per formatted date, keeping first-occurrence order.
pub fn bucket_by_date(transactions: &[Transaction], date_format: &str) -> Vec<DateBucket> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<DateBucket> = Vec::new();

    for tx in transactions {
        let at = tx.timestamp.at();
        let date = format_day(at, date_format);

        match index.get(&date) {
            Some(&i) => buckets[i].amount += tx.amount,
            None => {
                index.insert(date.clone(), buckets.len());
                buckets.push(DateBucket {
                    date,
                    amount: tx.amount,
                    day: at.map(|at| at.date_naive()),
                });
            }
        }
    }

    buckets
}

pub fn order_buckets(mut buckets: Vec<DateBucket>, order: BucketOrder) -> Vec<DateBucket> {
    if order == BucketOrder::Chronological {
        // None sorts before Some, so flip the key to push undated buckets last.
        buckets.sort_by_key(|b| (b.day.is_none(), b.day));
    }
    buckets
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub y_ticks: usize,
    /// Minimum horizontal room per x-axis label.
    pub x_label_spacing: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 300.0,
            margin_top: 10.0,
            margin_right: 20.0,
            margin_bottom: 30.0,
            margin_left: 60.0,
            y_ticks: 5,
            x_label_spacing: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub date: String,
    pub amount: f64,
}

impl ChartPoint {
    pub fn tooltip(&self) -> String {
        format!("{}\namount : {}", self.date, format_amount(self.amount))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartScene {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_top: f64,
    pub plot_right: f64,
    pub plot_bottom: f64,
    pub points: Vec<ChartPoint>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

impl LineChartScene {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG `points` attribute for the polyline.
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lay out a line chart with one point per bucket, in the given order.
pub fn build_chart(buckets: &[DateBucket], layout: &ChartLayout) -> LineChartScene {
    let plot_left = layout.margin_left;
    let plot_top = layout.margin_top;
    let plot_right = layout.width - layout.margin_right;
    let plot_bottom = layout.height - layout.margin_bottom;

    let highest = buckets.iter().map(|b| b.amount).fold(0.0, f64::max);
    let lowest = buckets.iter().map(|b| b.amount).fold(0.0, f64::min);
    let tick_values = if buckets.is_empty() {
        Vec::new()
    } else {
        nice_ticks(lowest, highest.max(lowest + 1.0), layout.y_ticks)
    };
    let domain = (
        tick_values.first().copied().unwrap_or(0.0),
        tick_values.last().copied().unwrap_or(1.0),
    );
    let y = LinearScale::new(domain, (plot_bottom, plot_top));

    // Categorical x axis: points sit in the middle of equal slots.
    let slot = (plot_right - plot_left) / buckets.len().max(1) as f64;
    let x_at = |i: usize| plot_left + slot * (i as f64 + 0.5);

    let points: Vec<ChartPoint> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| ChartPoint {
            x: round2(x_at(i)),
            y: round2(y.map(b.amount)),
            date: b.date.clone(),
            amount: b.amount,
        })
        .collect();

    let y_ticks = tick_values
        .iter()
        .map(|&v| Tick {
            position: round2(y.map(v)),
            label: abbreviate(v),
        })
        .collect();

    LineChartScene {
        width: layout.width,
        height: layout.height,
        plot_left,
        plot_top,
        plot_right,
        plot_bottom,
        x_ticks: x_ticks(&points, plot_right - plot_left, layout.x_label_spacing),
        y_ticks,
        points,
    }
}

/// Thin x labels so they don't overlap; the last label is always kept.
fn x_ticks(points: &[ChartPoint], plot_width: f64, spacing: f64) -> Vec<Tick> {
    if points.is_empty() {
        return Vec::new();
    }

    let fit = ((plot_width / spacing.max(1.0)).floor() as usize).max(1);
    let interval = points.len().div_ceil(fit).max(1);
    let last = points.len() - 1;

    points
        .iter()
        .enumerate()
        .filter(|(i, _)| (last - i) % interval == 0)
        .map(|(_, p)| Tick {
            position: p.x,
            label: p.date.clone(),
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATE_FORMAT;
    use crate::date_utils::INVALID_DATE;
    use crate::models::Timestamp;

    fn tx(amount: f64, timestamp: &str) -> Transaction {
        Transaction::new("a", "b", amount, Timestamp::parse(timestamp))
    }

    #[test]
    fn test_buckets_sum_per_day_in_creation_order() {
        let buckets = bucket_by_date(
            &[
                tx(10.0, "2020-01-01T08:00:00Z"),
                tx(5.0, "2020-01-01T20:00:00Z"),
                tx(3.0, "2020-01-02T01:00:00Z"),
            ],
            DEFAULT_DATE_FORMAT,
        );

        let pairs: Vec<(&str, f64)> = buckets.iter().map(|b| (b.date.as_str(), b.amount)).collect();
        assert_eq!(pairs, vec![("1/1/2020", 15.0), ("1/2/2020", 3.0)]);
    }

    #[test]
    fn test_unsorted_input_keeps_first_appearance() {
        let buckets = bucket_by_date(
            &[
                tx(1.0, "2021-05-03"),
                tx(2.0, "2021-05-01"),
                tx(4.0, "2021-05-03"),
            ],
            DEFAULT_DATE_FORMAT,
        );
        let dates: Vec<&str> = buckets.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["5/3/2021", "5/1/2021"]);
        assert_eq!(buckets[0].amount, 5.0);
    }

    #[test]
    fn test_chronological_order() {
        let buckets = bucket_by_date(
            &[
                tx(1.0, "garbage"),
                tx(1.0, "2021-05-03"),
                tx(2.0, "2021-05-01"),
            ],
            DEFAULT_DATE_FORMAT,
        );
        let sorted = order_buckets(buckets, BucketOrder::Chronological);
        let dates: Vec<&str> = sorted.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["5/1/2021", "5/3/2021", INVALID_DATE]);
    }

    #[test]
    fn test_invalid_timestamps_share_a_bucket() {
        let buckets = bucket_by_date(&[tx(1.0, "x"), tx(2.0, "y")], DEFAULT_DATE_FORMAT);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, INVALID_DATE);
        assert_eq!(buckets[0].amount, 3.0);
    }

    #[test]
    fn test_bucket_order_parse() {
        assert_eq!(
            "chronological".parse::<BucketOrder>(),
            Ok(BucketOrder::Chronological)
        );
        assert_eq!(
            "appearance".parse::<BucketOrder>(),
            Ok(BucketOrder::Appearance)
        );
        assert!("sideways".parse::<BucketOrder>().is_err());
    }

    #[test]
    fn test_chart_points_follow_bucket_order() {
        let buckets = bucket_by_date(
            &[tx(10.0, "2020-01-02"), tx(20.0, "2020-01-01")],
            DEFAULT_DATE_FORMAT,
        );
        let layout = ChartLayout::default();
        let chart = build_chart(&buckets, &layout);

        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].date, "1/2/2020");
        assert!(chart.points[0].x < chart.points[1].x);
        // Larger amount is drawn higher (smaller y).
        assert!(chart.points[1].y < chart.points[0].y);
        assert!(chart.points.iter().all(|p| p.y >= layout.margin_top
            && p.y <= layout.height - layout.margin_bottom));
    }

    #[test]
    fn test_y_ticks_cover_max() {
        let buckets = bucket_by_date(&[tx(18.0, "2020-01-01")], DEFAULT_DATE_FORMAT);
        let chart = build_chart(&buckets, &ChartLayout::default());
        let labels: Vec<&str> = chart.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "5", "10", "15", "20"]);
    }

    #[test]
    fn test_x_labels_are_thinned() {
        let transactions: Vec<Transaction> = (1..=28)
            .map(|d| tx(1.0, &format!("2020-02-{d:02}")))
            .collect();
        let buckets = bucket_by_date(&transactions, DEFAULT_DATE_FORMAT);
        let chart = build_chart(&buckets, &ChartLayout::default());

        assert!(chart.x_ticks.len() < buckets.len());
        assert_eq!(chart.x_ticks.last().unwrap().label, "2/28/2020");
    }

    #[test]
    fn test_empty_chart() {
        let chart = build_chart(&[], &ChartLayout::default());
        assert!(chart.is_empty());
        assert!(chart.y_ticks.is_empty());
        assert_eq!(chart.polyline(), "");
    }
}
