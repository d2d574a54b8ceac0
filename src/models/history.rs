use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::IcebergRecord;
use crate::utils::constants::{FRESHNESS_THRESHOLD_DAYS, HISTORY_DATE_FORMAT};

/// The accumulated scrape history: one list of iceberg records per
/// collection date (`MM/DD/YY`), keyed by the date the page was revised.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IcebergHistory {
    snapshots: BTreeMap<String, Vec<IcebergRecord>>,
}

/// How stale the most recent snapshot is, relative to today
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataFreshness {
    Fresh,
    Recent(i64),
    Outdated(i64),
    Unknown,
}

impl fmt::Display for DataFreshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFreshness::Fresh => write!(f, "Fresh (updated today)"),
            DataFreshness::Recent(days) => write!(f, "Recent (updated {} days ago)", days),
            DataFreshness::Outdated(days) => write!(f, "Outdated (updated {} days ago)", days),
            DataFreshness::Unknown => write!(f, "Update time unknown"),
        }
    }
}

impl IcebergHistory {
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of collection dates
    pub fn date_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn snapshots(&self) -> &BTreeMap<String, Vec<IcebergRecord>> {
        &self.snapshots
    }

    pub fn get(&self, date: &str) -> Option<&[IcebergRecord]> {
        self.snapshots.get(date).map(Vec::as_slice)
    }

    /// Insert a snapshot, replacing any earlier scrape of the same day
    pub fn insert_snapshot(&mut self, date: String, records: Vec<IcebergRecord>) {
        self.snapshots.insert(date, records);
    }

    /// Collection dates in chronological order. Keys that fail to parse as
    /// `MM/DD/YY` demote the whole ordering to plain string sorting, the
    /// same fallback the stored files have always been read with.
    pub fn sorted_dates(&self) -> Vec<String> {
        let mut parsed: Vec<(NaiveDate, &String)> = Vec::with_capacity(self.snapshots.len());
        for key in self.snapshots.keys() {
            match NaiveDate::parse_from_str(key, HISTORY_DATE_FORMAT) {
                Ok(date) => parsed.push((date, key)),
                Err(_) => return self.snapshots.keys().cloned().collect(),
            }
        }
        parsed.sort_by_key(|(date, _)| *date);
        parsed.into_iter().map(|(_, key)| key.clone()).collect()
    }

    pub fn latest_date(&self) -> Option<String> {
        self.sorted_dates().pop()
    }

    pub fn earliest_date(&self) -> Option<String> {
        self.sorted_dates().into_iter().next()
    }

    pub fn latest_snapshot(&self) -> Option<(String, &[IcebergRecord])> {
        let date = self.latest_date()?;
        let records = self.snapshots.get(&date)?;
        Some((date, records.as_slice()))
    }

    pub fn total_records(&self) -> usize {
        self.snapshots.values().map(Vec::len).sum()
    }

    pub fn unique_icebergs(&self) -> BTreeSet<String> {
        self.snapshots
            .values()
            .flatten()
            .filter(|record| !record.name.is_empty())
            .map(|record| record.name.clone())
            .collect()
    }

    /// The last `window` collection dates, preserving their records
    pub fn recent(&self, window: usize) -> BTreeMap<String, Vec<IcebergRecord>> {
        let dates = self.sorted_dates();
        let start = dates.len().saturating_sub(window);
        dates[start..]
            .iter()
            .filter_map(|date| {
                self.snapshots
                    .get(date)
                    .map(|records| (date.clone(), records.clone()))
            })
            .collect()
    }

    /// Freshness of the latest snapshot relative to `today`
    pub fn freshness(&self, today: NaiveDate) -> DataFreshness {
        let Some(latest) = self.latest_date() else {
            return DataFreshness::Unknown;
        };
        let Ok(latest_date) = NaiveDate::parse_from_str(&latest, HISTORY_DATE_FORMAT) else {
            return DataFreshness::Unknown;
        };

        let days_old = (today - latest_date).num_days();
        if days_old == 0 {
            DataFreshness::Fresh
        } else if days_old <= FRESHNESS_THRESHOLD_DAYS {
            DataFreshness::Recent(days_old)
        } else {
            DataFreshness::Outdated(days_old)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, observation: &str) -> IcebergRecord {
        IcebergRecord::new(
            name.to_string(),
            "39°50'W".to_string(),
            "75°25'S".to_string(),
            -39.833333,
            -75.416667,
            observation.to_string(),
        )
    }

    fn sample_history() -> IcebergHistory {
        let mut history = IcebergHistory::default();
        history.insert_snapshot("12/28/20".to_string(), vec![record("A23A", "12/27/20")]);
        history.insert_snapshot(
            "01/05/21".to_string(),
            vec![record("A23A", "01/04/21"), record("B22A", "01/02/21")],
        );
        history
    }

    #[test]
    fn test_chronological_ordering_beats_lexicographic() {
        // String sorting would call 12/28/20 the latest.
        let history = sample_history();
        assert_eq!(history.latest_date(), Some("01/05/21".to_string()));
        assert_eq!(history.earliest_date(), Some("12/28/20".to_string()));
        assert_eq!(
            history.sorted_dates(),
            vec!["12/28/20".to_string(), "01/05/21".to_string()]
        );
    }

    #[test]
    fn test_unparsable_key_falls_back_to_string_order() {
        let mut history = sample_history();
        history.insert_snapshot("not-a-date".to_string(), vec![]);
        assert_eq!(history.sorted_dates(), vec!["01/05/21", "12/28/20", "not-a-date"]);
    }

    #[test]
    fn test_counts_and_unique_names() {
        let history = sample_history();
        assert_eq!(history.date_count(), 2);
        assert_eq!(history.total_records(), 3);
        let unique = history.unique_icebergs();
        assert_eq!(unique.len(), 2);
        assert!(unique.contains("A23A"));
        assert!(unique.contains("B22A"));
    }

    #[test]
    fn test_same_day_rescrape_replaces() {
        let mut history = sample_history();
        history.insert_snapshot("01/05/21".to_string(), vec![record("C19", "01/05/21")]);
        assert_eq!(history.total_records(), 2);
        assert_eq!(history.get("01/05/21").unwrap()[0].name, "C19");
    }

    #[test]
    fn test_recent_window() {
        let history = sample_history();
        let recent = history.recent(1);
        assert_eq!(recent.len(), 1);
        assert!(recent.contains_key("01/05/21"));

        // Window larger than the history returns everything.
        assert_eq!(history.recent(10).len(), 2);
    }

    #[test]
    fn test_freshness() {
        let history = sample_history();
        let latest = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();

        assert_eq!(history.freshness(latest), DataFreshness::Fresh);
        assert_eq!(
            history.freshness(latest + chrono::Duration::days(3)),
            DataFreshness::Recent(3)
        );
        assert_eq!(
            history.freshness(latest + chrono::Duration::days(12)),
            DataFreshness::Outdated(12)
        );
        assert_eq!(
            IcebergHistory::default().freshness(latest),
            DataFreshness::Unknown
        );
    }
}
