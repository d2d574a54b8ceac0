use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, TrackerError};
use crate::utils::constants::{REVISED_DATE_FORMAT, REVISED_DATE_LEN};

/// One table row as scraped, before any coordinate or date normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub name: String,
    pub dms_longitude: String,
    pub dms_latitude: String,
    /// Raw "days since start of year" cell; absent on some rows
    pub day_of_year: Option<String>,
}

/// Everything extracted from one scrape of the listing page.
#[derive(Debug, Clone)]
pub struct ScrapedPage {
    pub revised: NaiveDateTime,
    pub observations: Vec<RawObservation>,
}

/// Parses the NASA SCP current-icebergs page.
///
/// The page carries a `Last revised: HH:MM:SS MM/DD/YY` paragraph and one
/// table whose header row starts with an "Iceberg" cell, followed by rows of
/// `name | longitude | latitude | days` cells.
pub struct PageReader {
    paragraph: Selector,
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl PageReader {
    pub fn new() -> Self {
        Self {
            paragraph: Selector::parse("p").unwrap(),
            table: Selector::parse("table").unwrap(),
            row: Selector::parse("tr").unwrap(),
            cell: Selector::parse("td").unwrap(),
        }
    }

    pub fn parse(&self, html: &str) -> Result<ScrapedPage> {
        let document = Html::parse_document(html);
        let revised = self.parse_revised_date(&document)?;
        let observations = self.extract_observations(&document)?;

        Ok(ScrapedPage {
            revised,
            observations,
        })
    }

    /// The revision timestamp is the 17-character tail of the
    /// "Last revised:" paragraph.
    fn parse_revised_date(&self, document: &Html) -> Result<NaiveDateTime> {
        for paragraph in document.select(&self.paragraph) {
            let text: String = paragraph.text().collect();
            let text = text.trim_end();
            if !text.contains("Last revised:") {
                continue;
            }

            let chars: Vec<char> = text.chars().collect();
            let start = chars.len().saturating_sub(REVISED_DATE_LEN);
            let tail: String = chars[start..].iter().collect();

            return Ok(NaiveDateTime::parse_from_str(tail.trim(), REVISED_DATE_FORMAT)?);
        }

        Err(TrackerError::MissingData(
            "no 'Last revised:' paragraph on page".to_string(),
        ))
    }

    fn extract_observations(&self, document: &Html) -> Result<Vec<RawObservation>> {
        let table = self
            .find_iceberg_table(document)
            .ok_or_else(|| TrackerError::PageStructure("iceberg table not found".to_string()))?;

        let mut observations = Vec::new();
        for (index, row) in table.select(&self.row).enumerate() {
            let cells: Vec<String> = row
                .select(&self.cell)
                .map(|cell| Self::cell_text(&cell))
                .collect();

            if cells.len() < 4 {
                continue;
            }

            // Header row
            if index == 0 && cells[0].to_lowercase().contains("iceberg") {
                continue;
            }

            let cells: Vec<String> = cells.into_iter().filter(|c| !c.is_empty()).collect();
            if cells.len() < 3 {
                continue;
            }

            observations.push(RawObservation {
                name: cells[0].clone(),
                dms_longitude: cells[1].clone(),
                dms_latitude: cells[2].clone(),
                day_of_year: cells.get(3).cloned(),
            });
        }

        Ok(observations)
    }

    /// The listing nests tables; the one we want is an innermost table whose
    /// first row has at least four cells starting with "Iceberg". Wrapper
    /// tables contain the same text, so only tables without nested tables
    /// are considered.
    fn find_iceberg_table<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        for table in document.select(&self.table) {
            if table.select(&self.table).next().is_some() {
                continue;
            }
            let Some(first_row) = table.select(&self.row).next() else {
                continue;
            };
            let cells: Vec<String> = first_row
                .select(&self.cell)
                .map(|cell| Self::cell_text(&cell))
                .collect();

            if cells.len() >= 4 && cells[0].to_lowercase().contains("iceberg") {
                return Some(table);
            }
        }
        None
    }

    fn cell_text(cell: &ElementRef) -> String {
        cell.text().collect::<String>().trim().to_string()
    }
}

impl Default for PageReader {
    fn default() -> Self {
        Self::new()
    }
}
