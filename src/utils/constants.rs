/// Date format of history keys and resolved observation dates
pub const HISTORY_DATE_FORMAT: &str = "%m/%d/%y";

/// Format of the "Last revised:" timestamp on the source page
pub const REVISED_DATE_FORMAT: &str = "%H:%M:%S %m/%d/%y";

/// Length of the revision timestamp tail in the "Last revised:" paragraph
pub const REVISED_DATE_LEN: usize = 17;

/// Data older than this many days is reported as outdated
pub const FRESHNESS_THRESHOLD_DAYS: i64 = 7;

/// Number of most recent snapshot dates exported to recent.json
pub const RECENT_WINDOW: usize = 30;

/// Number of iceberg names included as a preview in summary.json
pub const SUMMARY_SAMPLE_SIZE: usize = 10;

/// API endpoint file names
pub const LATEST_ENDPOINT: &str = "latest.json";
pub const SUMMARY_ENDPOINT: &str = "summary.json";
pub const JSONP_ENDPOINT: &str = "latest.jsonp";
pub const RECENT_ENDPOINT: &str = "recent.json";
