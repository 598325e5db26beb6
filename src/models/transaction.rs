use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date_utils;

/// A single transfer between two participants.
///
/// Loaded once and shared read-only; nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub timestamp: Timestamp,
}

impl Transaction {
    pub fn new(from: &str, to: &str, amount: f64, timestamp: Timestamp) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            timestamp,
        }
    }
}

/// The timestamp exactly as it appeared in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTimestamp {
    Number(serde_json::Number),
    Text(String),
}

/// Point in time of a transaction.
///
/// Keeps the raw serialized value for display alongside the parsed instant.
/// An unparseable timestamp is still a valid record; it simply has no instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    raw: RawTimestamp,
    at: Option<DateTime<Utc>>,
}

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self {
            raw: RawTimestamp::Number(millis.into()),
            at: DateTime::from_timestamp_millis(millis),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self {
            raw: RawTimestamp::Text(text.to_string()),
            at: date_utils::parse_timestamp(text),
        }
    }

    pub fn raw(&self) -> &RawTimestamp {
        &self.raw
    }

    pub fn at(&self) -> Option<DateTime<Utc>> {
        self.at
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            RawTimestamp::Number(n) => write!(f, "{}", n),
            RawTimestamp::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.raw {
            RawTimestamp::Number(n) => n.serialize(serializer),
            RawTimestamp::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Timestamp {
                at: n.as_f64().and_then(date_utils::from_epoch_millis),
                raw: RawTimestamp::Number(n),
            },
            Wire::Text(s) => Timestamp::parse(&s),
        })
    }
}
