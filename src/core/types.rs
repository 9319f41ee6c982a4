// Basic types for the ledger

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value stored in the genesis block's `previous_hash` slot.
/// It is a bare integer, never a digest.
pub const GENESIS_SENTINEL: u64 = 1;

/// Link from a block to its predecessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviousHash {
    /// Fixed marker carried only by the genesis block
    Sentinel(u64),
    /// Hex digest of the preceding block
    Digest(String),
}

impl PreviousHash {
    /// The genesis marker
    pub fn genesis() -> Self {
        PreviousHash::Sentinel(GENESIS_SENTINEL)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, PreviousHash::Sentinel(_))
    }

    /// The digest, if this link points at a real block
    pub fn as_digest(&self) -> Option<&str> {
        match self {
            PreviousHash::Digest(hash) => Some(hash),
            PreviousHash::Sentinel(_) => None,
        }
    }
}

impl fmt::Display for PreviousHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PreviousHash::Sentinel(value) => write!(f, "{}", value),
            PreviousHash::Digest(hash) => write!(f, "{}", hash),
        }
    }
}

/// A transfer between two parties.
///
/// Only the parties and the calendar date are recorded. Any amount given
/// when the transfer was submitted is not part of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub sender: String,
    pub recipient: String,
    /// Calendar date, serialized as month/day/year
    #[serde(with = "mdy_date")]
    pub date: NaiveDate,
}

impl Transfer {
    /// Create a transfer dated `date`
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            date,
        }
    }

    /// Create a transfer stamped with today's local date
    pub fn today(sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self::new(sender, recipient, Local::now().date_naive())
    }
}

mod mdy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%m/%d/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
