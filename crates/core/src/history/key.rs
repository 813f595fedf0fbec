//! Operator-day storage keys

use std::fmt;

use chrono::NaiveDate;
use shiftline_domain::constants::{HISTORY_KEY_DATE_FORMAT, HISTORY_KEY_PREFIX};

/// `activity_history_{YYYY-MM-DD}_{operatorId}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    pub date: NaiveDate,
    pub operator_id: String,
}

impl HistoryKey {
    pub fn new(operator_id: impl Into<String>, date: NaiveDate) -> Self {
        Self { date, operator_id: operator_id.into() }
    }

    /// Parse a storage key. Returns `None` for keys that belong to anything
    /// else in the store.
    ///
    /// The date has a fixed width, so operator ids containing `_` parse
    /// unambiguously.
    pub fn parse(key: &str) -> Option<Self> {
        let rest = key.strip_prefix(HISTORY_KEY_PREFIX)?;
        let date_part = rest.get(..10)?;
        let operator_id = rest.get(10..)?.strip_prefix('_')?;
        if operator_id.is_empty() {
            return None;
        }
        let date = NaiveDate::parse_from_str(date_part, HISTORY_KEY_DATE_FORMAT).ok()?;
        Some(Self::new(operator_id, date))
    }

    pub fn belongs_to(&self, operator_id: &str) -> bool {
        self.operator_id == operator_id
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{HISTORY_KEY_PREFIX}{}_{}",
            self.date.format(HISTORY_KEY_DATE_FORMAT),
            self.operator_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_storage_key() {
        let key = HistoryKey::new("OP-17", date(2026, 1, 9));
        assert_eq!(key.to_string(), "activity_history_2026-01-09_OP-17");
    }

    #[test]
    fn parses_operator_ids_with_underscores() {
        let key = HistoryKey::parse("activity_history_2025-12-31_site_a_op_4").unwrap();
        assert_eq!(key.date, date(2025, 12, 31));
        assert_eq!(key.operator_id, "site_a_op_4");
        assert!(key.belongs_to("site_a_op_4"));
    }

    #[test]
    fn ignores_unrelated_or_malformed_keys() {
        assert_eq!(HistoryKey::parse("session_token"), None);
        assert_eq!(HistoryKey::parse("activity_history_2025-13-01_op"), None);
        assert_eq!(HistoryKey::parse("activity_history_2025-12-01_"), None);
        assert_eq!(HistoryKey::parse("activity_history_2025-12-01"), None);
        assert_eq!(HistoryKey::parse("activity_history_2025-12-01-op"), None);
    }
}
