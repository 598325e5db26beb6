use crate::models::Transaction;

pub const COPY_SUCCESS_MESSAGE: &str = "Transactions copied to clipboard!";

/// One line per transaction, newline-joined, for the clipboard.
pub fn clipboard_text(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| {
            format!(
                "From: {}, To: {}, Amount: {}, Timestamp: {}",
                t.from, t.to, t.amount, t.timestamp
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
