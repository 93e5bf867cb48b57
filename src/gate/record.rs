//! Persisted Daily Usage Record
//!
//! One record per device tracks how many generations happened on a given
//! calendar day. A record is only valid for the day named in its `date`
//! field; anything older is treated as absent by the quota tracker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for the record's validity day (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Persisted (date, count) pair tracking today's usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day this record is valid for, formatted `YYYY-MM-DD`
    pub date: String,

    /// Number of generations recorded on `date`
    pub count: u32,
}

impl DailyRecord {
    /// Create a fresh zero-count record for the given day
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            count: 0,
        }
    }

    /// Whether this record is valid for the given day
    pub fn is_for(&self, day: NaiveDate) -> bool {
        self.date == day.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_fresh_record() {
        let record = DailyRecord::fresh(day("2026-08-25"));
        assert_eq!(record.date, "2026-08-25");
        assert_eq!(record.count, 0);
    }

    #[test]
    fn test_is_for_same_day() {
        let record = DailyRecord::fresh(day("2026-08-25"));
        assert!(record.is_for(day("2026-08-25")));
    }

    #[test]
    fn test_is_for_later_day() {
        let mut record = DailyRecord::fresh(day("2026-08-25"));
        record.count = 3;
        assert!(!record.is_for(day("2026-08-26")));
    }

    #[test]
    fn test_serialization_round_trip() {
        let record = DailyRecord {
            date: "2026-08-25".to_string(),
            count: 2,
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: DailyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn test_expected_wire_shape() {
        let record = DailyRecord {
            date: "2026-08-25".to_string(),
            count: 1,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"date":"2026-08-25","count":1}"#);
    }
}
