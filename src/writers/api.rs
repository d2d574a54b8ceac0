use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::models::{IcebergHistory, IcebergRecord};
use crate::utils::constants::{
    JSONP_ENDPOINT, LATEST_ENDPOINT, RECENT_ENDPOINT, RECENT_WINDOW, SUMMARY_ENDPOINT,
    SUMMARY_SAMPLE_SIZE,
};

#[derive(Debug, Serialize)]
struct LatestEndpoint<'a> {
    last_updated: &'a str,
    total_icebergs: usize,
    icebergs: &'a [IcebergRecord],
}

#[derive(Debug, Serialize)]
struct DateRange {
    earliest: Option<String>,
    latest: Option<String>,
}

#[derive(Debug, Serialize)]
struct SummaryEndpoint {
    generated_at: String,
    total_observation_dates: usize,
    total_records: usize,
    unique_icebergs: usize,
    date_range: DateRange,
    sample_icebergs: Vec<String>,
}

/// Derives the static JSON "API" files external consumers poll:
/// `latest.json`, `summary.json`, a JSONP twin of the latest data, and a
/// `recent.json` window of the last 30 collection dates.
pub struct ApiWriter {
    output_dir: PathBuf,
}

impl ApiWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write all endpoint files, returning the paths written.
    pub fn write_endpoints(&self, history: &IcebergHistory) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;
        let mut written = Vec::new();

        if let Some((last_updated, icebergs)) = history.latest_snapshot() {
            let latest = LatestEndpoint {
                last_updated: &last_updated,
                total_icebergs: icebergs.len(),
                icebergs,
            };
            let latest_json = serde_json::to_string_pretty(&latest)?;

            let latest_path = self.output_dir.join(LATEST_ENDPOINT);
            fs::write(&latest_path, &latest_json)?;
            written.push(latest_path);

            // JSONP wrapper for consumers that cannot do CORS.
            let jsonp_path = self.output_dir.join(JSONP_ENDPOINT);
            fs::write(
                &jsonp_path,
                format!("window.icebergDataCallback({});", latest_json),
            )?;
            written.push(jsonp_path);
        }

        let unique = history.unique_icebergs();
        let summary = SummaryEndpoint {
            generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            total_observation_dates: history.date_count(),
            total_records: history.total_records(),
            unique_icebergs: unique.len(),
            date_range: DateRange {
                earliest: history.earliest_date(),
                latest: history.latest_date(),
            },
            sample_icebergs: unique.into_iter().take(SUMMARY_SAMPLE_SIZE).collect(),
        };
        let summary_path = self.output_dir.join(SUMMARY_ENDPOINT);
        fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
        written.push(summary_path);

        let recent_path = self.output_dir.join(RECENT_ENDPOINT);
        fs::write(
            &recent_path,
            serde_json::to_string_pretty(&history.recent(RECENT_WINDOW))?,
        )?;
        written.push(recent_path);

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str) -> IcebergRecord {
        IcebergRecord::new(
            name.to_string(),
            "39°50'W".to_string(),
            "75°25'S".to_string(),
            -39.833333,
            -75.416667,
            "02/09/21".to_string(),
        )
    }

    fn sample_history() -> IcebergHistory {
        let mut history = IcebergHistory::default();
        history.insert_snapshot("12/28/20".to_string(), vec![record("a23a")]);
        history.insert_snapshot(
            "01/05/21".to_string(),
            vec![record("a23a"), record("b22a")],
        );
        history
    }

    #[test]
    fn test_write_endpoints() {
        let dir = TempDir::new().unwrap();
        let writer = ApiWriter::new(dir.path());
        let written = writer.write_endpoints(&sample_history()).unwrap();

        assert_eq!(written.len(), 4);
        for path in &written {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_latest_endpoint_contents() {
        let dir = TempDir::new().unwrap();
        ApiWriter::new(dir.path())
            .write_endpoints(&sample_history())
            .unwrap();

        let latest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("latest.json")).unwrap())
                .unwrap();
        assert_eq!(latest["last_updated"], "01/05/21");
        assert_eq!(latest["total_icebergs"], 2);
        assert_eq!(latest["icebergs"][1]["iceberg"], "b22a");
    }

    #[test]
    fn test_summary_endpoint_contents() {
        let dir = TempDir::new().unwrap();
        ApiWriter::new(dir.path())
            .write_endpoints(&sample_history())
            .unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["total_observation_dates"], 2);
        assert_eq!(summary["total_records"], 3);
        assert_eq!(summary["unique_icebergs"], 2);
        assert_eq!(summary["date_range"]["earliest"], "12/28/20");
        assert_eq!(summary["date_range"]["latest"], "01/05/21");
        assert!(summary["generated_at"].as_str().unwrap().ends_with("UTC"));
    }

    #[test]
    fn test_jsonp_wrapper() {
        let dir = TempDir::new().unwrap();
        ApiWriter::new(dir.path())
            .write_endpoints(&sample_history())
            .unwrap();

        let jsonp = fs::read_to_string(dir.path().join("latest.jsonp")).unwrap();
        assert!(jsonp.starts_with("window.icebergDataCallback("));
        assert!(jsonp.ends_with(");"));
    }

    #[test]
    fn test_empty_history_writes_summary_only() {
        let dir = TempDir::new().unwrap();
        let written = ApiWriter::new(dir.path())
            .write_endpoints(&IcebergHistory::default())
            .unwrap();

        assert_eq!(written.len(), 2);
        assert!(!dir.path().join("latest.json").exists());
        assert!(dir.path().join("summary.json").exists());
        assert!(dir.path().join("recent.json").exists());
    }
}
