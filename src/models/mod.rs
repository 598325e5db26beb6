pub mod transaction;

pub use transaction::{RawTimestamp, Timestamp, Transaction};
