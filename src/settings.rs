use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

/// Immutable runtime settings, resolved once at startup.
///
/// Defaults cover the public NASA SCP endpoints and local file layout; any
/// field can be overridden with an `ICEBERG_`-prefixed environment variable
/// (`ICEBERG_OUTPUT_FILE`, `ICEBERG_REQUEST_TIMEOUT`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source_url: String,
    pub animation_base_url: String,

    pub output_file: PathBuf,
    pub api_directory: PathBuf,
    pub map_file: PathBuf,

    pub request_timeout: u64,
    pub user_agent: String,

    pub backup_enabled: bool,
    pub backup_directory: PathBuf,
    pub max_backups: usize,

    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .set_default("source_url", "https://www.scp.byu.edu/current_icebergs.html")?
            .set_default(
                "animation_base_url",
                "https://ftp.scp.byu.edu/data/misc/iceberg_animations/",
            )?
            .set_default("output_file", "data/iceberg_location.json")?
            .set_default("api_directory", "api")?
            .set_default("map_file", "output/iceberg_map.html")?
            .set_default("request_timeout", 30)?
            .set_default(
                "user_agent",
                "Mozilla/5.0 (Iceberg-Tracker/2.0; +https://github.com/iceberg-tracker/iceberg-tracker)",
            )?
            .set_default("backup_enabled", true)?
            .set_default("backup_directory", "backups")?
            .set_default("max_backups", 30)?
            .set_default("min_latitude", -90.0)?
            .set_default("max_latitude", -60.0)? // Antarctic region
            .set_default("min_longitude", -180.0)?
            .set_default("max_longitude", 180.0)?
            .add_source(Environment::with_prefix("ICEBERG"))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }

    pub fn is_within_bounds(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_latitude
            && latitude <= self.max_latitude
            && longitude >= self.min_longitude
            && longitude <= self.max_longitude
    }
}
