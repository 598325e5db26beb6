//! Origin x destination volume matrix.
//!
//! The matrix is dense: memory and time grow with the square of the
//! participant count. Callers log when a dataset crosses the configured soft
//! limit rather than switching representation.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::Transaction;

/// Resolved contents of one heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellInfo {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumeMatrix {
    participants: Vec<String>,
    #[serde(rename = "matrix")]
    cells: Vec<Vec<f64>>,
}

impl VolumeMatrix {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let participants = participants(transactions);
        let index: HashMap<&str, usize> = participants
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str(), i))
            .collect();

        let n = participants.len();
        let mut cells = vec![vec![0.0; n]; n];

        for tx in transactions {
            // Both endpoints were collected above.
            if let (Some(&row), Some(&col)) = (index.get(tx.from.as_str()), index.get(tx.to.as_str()))
            {
                cells[row][col] += tx.amount;
            }
        }

        Self {
            participants,
            cells,
        }
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    pub fn dimension(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Largest cell value, 0 for an empty matrix.
    pub fn max(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Row-major flat index back to `(row, col)`.
    pub fn decode(&self, flat_index: usize) -> Option<(usize, usize)> {
        let n = self.dimension();
        if n == 0 || flat_index >= n * n {
            return None;
        }
        Some((flat_index / n, flat_index % n))
    }

    pub fn cell_info(&self, flat_index: usize) -> Option<CellInfo> {
        let (row, col) = self.decode(flat_index)?;
        Some(CellInfo {
            index: flat_index,
            row,
            col,
            from: self.participants[row].clone(),
            to: self.participants[col].clone(),
            amount: self.cells[row][col],
        })
    }
}

/// Distinct identifiers in first-seen order: every `from` value first, then
/// every `to` value.
pub fn participants(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashMap::new();
    let mut ordered = Vec::new();

    let endpoints = transactions
        .iter()
        .map(|tx| tx.from.as_str())
        .chain(transactions.iter().map(|tx| tx.to.as_str()));

    for id in endpoints {
        if !seen.contains_key(id) {
            seen.insert(id, ordered.len());
            ordered.push(id.to_string());
        }
    }

    ordered
}
