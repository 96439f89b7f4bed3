// Bucket assignment for dated and dateless records.
use super::TemporalRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse temporal grouping a record is displayed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[default]
    Today,
    Upcoming,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Today => "today",
            Bucket::Upcoming => "upcoming",
        }
    }

    /// Maps a stored bucket string onto a bucket. Older clients wrote
    /// "week" for the non-today tab.
    pub fn from_legacy(value: &str) -> Option<Bucket> {
        match value.trim().to_lowercase().as_str() {
            "today" => Some(Bucket::Today),
            "upcoming" | "week" => Some(Bucket::Upcoming),
            _ => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assigns exactly one bucket to a record.
///
/// A deadline that is today or already past lands in `Today`: overdue
/// records surface in the urgent list instead of disappearing. The stored
/// bucket is consulted only when no deadline survives normalization, and a
/// record with neither defaults to `Today`.
pub fn resolve_bucket<R: TemporalRecord>(record: &R, today: NaiveDate) -> Bucket {
    if let Some(due) = record.deadline() {
        if due <= today {
            Bucket::Today
        } else {
            Bucket::Upcoming
        }
    } else if let Some(bucket) = record.explicit_bucket() {
        bucket
    } else {
        Bucket::Today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_bucket_strings() {
        assert_eq!(Bucket::from_legacy("today"), Some(Bucket::Today));
        assert_eq!(Bucket::from_legacy("Upcoming"), Some(Bucket::Upcoming));
        assert_eq!(Bucket::from_legacy("week"), Some(Bucket::Upcoming));
        assert_eq!(Bucket::from_legacy("someday"), None);
        assert_eq!(Bucket::from_legacy(""), None);
    }

    #[test]
    fn test_bucket_serde_round_trip() {
        let json = serde_json::to_string(&Bucket::Upcoming).unwrap();
        assert_eq!(json, "\"upcoming\"");
        let back: Bucket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Bucket::Upcoming);
    }
}
