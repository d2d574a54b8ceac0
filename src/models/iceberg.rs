use serde::{Deserialize, Serialize};
use validator::Validate;

/// One tracked iceberg position, as stored in the date-keyed history.
///
/// Wire names match the JSON the tracker has always written; the misspelled
/// `lattitude` keys of older data files are accepted as aliases on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IcebergRecord {
    #[serde(rename = "iceberg")]
    pub name: String,

    pub dms_longitude: String,

    #[serde(alias = "dms_lattitude")]
    pub dms_latitude: String,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[serde(alias = "lattitude")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    /// Resolved observation date, `MM/DD/YY`
    pub recent_observation: String,
}

impl IcebergRecord {
    pub fn new(
        name: String,
        dms_longitude: String,
        dms_latitude: String,
        longitude: f64,
        latitude: f64,
        recent_observation: String,
    ) -> Self {
        Self {
            name,
            dms_longitude,
            dms_latitude,
            longitude,
            latitude,
            recent_observation,
        }
    }

    /// URL of the drift-animation GIF NASA SCP publishes for this iceberg
    pub fn animation_url(&self, base_url: &str) -> String {
        format!("{}{}_movie.gif", base_url, self.name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a23a() -> IcebergRecord {
        IcebergRecord::new(
            "A23A".to_string(),
            "39°50'W".to_string(),
            "75°25'S".to_string(),
            -39.833333,
            -75.416667,
            "07/02/25".to_string(),
        )
    }

    #[test]
    fn test_record_validation() {
        assert!(a23a().validate().is_ok());

        let mut bad = a23a();
        bad.latitude = -91.0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&a23a()).unwrap();
        assert!(json.contains("\"iceberg\":\"A23A\""));
        assert!(json.contains("\"dms_latitude\""));
        assert!(json.contains("\"recent_observation\""));
    }

    #[test]
    fn test_legacy_spelling_accepted() {
        let json = r#"{
            "iceberg": "B22A",
            "dms_longitude": "156°27'E",
            "dms_lattitude": "70°7'S",
            "longitude": 156.45,
            "lattitude": -70.12,
            "recent_observation": "01/15/25"
        }"#;
        let record: IcebergRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "B22A");
        assert_eq!(record.dms_latitude, "70°7'S");
        assert!((record.latitude - -70.12).abs() < f64::EPSILON);
    }

    #[test]
    fn test_animation_url() {
        assert_eq!(
            a23a().animation_url("https://ftp.scp.byu.edu/data/misc/iceberg_animations/"),
            "https://ftp.scp.byu.edu/data/misc/iceberg_animations/a23a_movie.gif"
        );
    }
}
