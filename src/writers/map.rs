use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::models::{IcebergHistory, IcebergRecord};

const MAP_TEMPLATE: &str = include_str!("map_template.html");
const DATA_PLACEHOLDER: &str = "__ICEBERG_DATA__";

#[derive(Debug, Serialize)]
struct MapData<'a> {
    last_updated: Option<String>,
    icebergs: &'a [IcebergRecord],
}

/// Emits the static Leaflet map page with the latest snapshot embedded as a
/// JSON literal. No templating beyond one placeholder substitution.
pub struct MapWriter {
    output_file: PathBuf,
}

impl MapWriter {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn generate(&self, history: &IcebergHistory) -> Result<()> {
        let latest = history.latest_snapshot();
        let data = MapData {
            last_updated: latest.as_ref().map(|(date, _)| date.clone()),
            icebergs: latest.map(|(_, records)| records).unwrap_or(&[]),
        };

        let html = MAP_TEMPLATE.replace(DATA_PLACEHOLDER, &serde_json::to_string(&data)?);

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.output_file, html)?;
        Ok(())
    }
}
