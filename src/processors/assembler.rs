use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::{Result, TrackerError};
use crate::models::IcebergRecord;
use crate::readers::RawObservation;
use crate::utils::{parse_dms, resolve_observation_date};

/// Turns raw scraped rows into `IcebergRecord`s against one revision
/// timestamp. Each row is independent; a row that fails to normalize is
/// skipped with a warning rather than aborting the scrape.
pub struct RecordAssembler {
    revised: NaiveDateTime,
}

impl RecordAssembler {
    pub fn new(revised: NaiveDateTime) -> Self {
        Self { revised }
    }

    /// Assemble a single row. Pure: same row and revision timestamp always
    /// produce the same record.
    pub fn assemble_row(&self, row: &RawObservation) -> Result<IcebergRecord> {
        let longitude = parse_dms(&row.dms_longitude)?;
        let latitude = parse_dms(&row.dms_latitude)?;

        // A missing day cell means "observed on day 0", as the listing has
        // always been read.
        let day_of_year = match row.day_of_year.as_deref() {
            Some(cell) => cell.trim().parse::<i32>().map_err(|_| {
                TrackerError::NumericConversion(format!("invalid observation day: '{}'", cell))
            })?,
            None => 0,
        };
        let recent_observation = resolve_observation_date(day_of_year, &self.revised)?;

        Ok(IcebergRecord::new(
            row.name.clone(),
            row.dms_longitude.clone(),
            row.dms_latitude.clone(),
            longitude,
            latitude,
            recent_observation,
        ))
    }

    /// Assemble every row, skipping and logging the ones that fail.
    /// Returns the records plus the number of skipped rows.
    pub fn assemble_all(&self, rows: &[RawObservation]) -> (Vec<IcebergRecord>, usize) {
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0;

        for row in rows {
            match self.assemble_row(row) {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(iceberg = %row.name, %error, "skipping unparsable row");
                    skipped += 1;
                }
            }
        }

        (records, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn revised() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 2, 12)
            .unwrap()
            .and_hms_opt(10, 2, 45)
            .unwrap()
    }

    fn row(name: &str, lon: &str, lat: &str, day: Option<&str>) -> RawObservation {
        RawObservation {
            name: name.to_string(),
            dms_longitude: lon.to_string(),
            dms_latitude: lat.to_string(),
            day_of_year: day.map(str::to_string),
        }
    }

    #[test]
    fn test_assemble_row() {
        let assembler = RecordAssembler::new(revised());
        let record = assembler
            .assemble_row(&row("a23a", "39°50'W", "75°25'S", Some("43")))
            .unwrap();

        assert_eq!(record.name, "a23a");
        assert_eq!(record.dms_longitude, "39°50'W");
        assert!((record.longitude - -(39.0 + 50.0 / 60.0)).abs() < 1e-9);
        assert!((record.latitude - -(75.0 + 25.0 / 60.0)).abs() < 1e-9);
        assert_eq!(record.recent_observation, "02/12/21");
    }

    #[test]
    fn test_missing_day_defaults_to_zero() {
        let assembler = RecordAssembler::new(revised());
        let record = assembler
            .assemble_row(&row("b22a", "156°27'E", "70°7'S", None))
            .unwrap();
        // Day 0 resolves through the same arithmetic: Dec 31 of the prior year.
        assert_eq!(record.recent_observation, "12/31/20");
    }

    #[test]
    fn test_bad_coordinate_fails_row() {
        let assembler = RecordAssembler::new(revised());
        let result = assembler.assemble_row(&row("x", "not a coordinate", "75°25'S", Some("1")));
        assert!(matches!(
            result,
            Err(TrackerError::InvalidCoordinateFormat(_))
        ));
    }

    #[test]
    fn test_bad_day_cell_fails_row() {
        let assembler = RecordAssembler::new(revised());
        let result = assembler.assemble_row(&row("x", "39°50'W", "75°25'S", Some("soon")));
        assert!(matches!(result, Err(TrackerError::NumericConversion(_))));
    }

    #[test]
    fn test_assemble_all_skips_bad_rows() {
        let assembler = RecordAssembler::new(revised());
        let rows = vec![
            row("a23a", "39°50'W", "75°25'S", Some("43")),
            row("broken", "n/a", "75°25'S", Some("43")),
            row("b22a", "156°27'E", "70°7'S", Some("40")),
        ];

        let (records, skipped) = assembler.assemble_all(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(skipped, 1);
        assert_eq!(records[0].name, "a23a");
        assert_eq!(records[1].name, "b22a");
    }
}
