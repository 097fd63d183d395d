//! Input loaders for historical series and budget snapshots
//!
//! Series files are either CSV with a `date,value` header or a JSON array of
//! `{ "date": "YYYY-MM-DD", "value": 123.4 }` objects. Loaded series are
//! sorted chronologically; duplicate dates and non-finite values are
//! rejected so the forecasters can rely on clean input.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{BudgetInput, TimeSeriesPoint};

/// Parse a `date,value` CSV series
pub fn parse_series_csv<R: Read>(reader: R) -> Result<Vec<TimeSeriesPoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_idx = column_index(&headers, "date")?;
    let value_idx = column_index(&headers, "value")?;

    let mut points = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = row + 2;

        let date_str = record.get(date_idx).unwrap_or_default();
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            Error::InvalidData(format!("Line {}: invalid date '{}': {}", line, date_str, e))
        })?;

        let value_str = record.get(value_idx).unwrap_or_default();
        let value: f64 = value_str.parse().map_err(|_| {
            Error::InvalidData(format!("Line {}: invalid value '{}'", line, value_str))
        })?;

        points.push(TimeSeriesPoint { date, value });
    }

    normalize_series(points)
}

/// Parse a JSON array of series points
pub fn parse_series_json<R: Read>(reader: R) -> Result<Vec<TimeSeriesPoint>> {
    let points: Vec<TimeSeriesPoint> = serde_json::from_reader(reader)?;
    normalize_series(points)
}

/// Load a series from a `.csv` or `.json` file
pub fn load_series(path: &Path) -> Result<Vec<TimeSeriesPoint>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let reader = BufReader::new(File::open(path)?);
    let points = match extension.as_deref() {
        Some("csv") => parse_series_csv(reader)?,
        Some("json") => parse_series_json(reader)?,
        _ => {
            return Err(Error::InvalidData(format!(
                "Unsupported series file '{}' (expected .csv or .json)",
                path.display()
            )))
        }
    };

    debug!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Load a budget snapshot from a JSON file
pub fn load_budget_input(path: &Path) -> Result<BudgetInput> {
    let reader = BufReader::new(File::open(path)?);
    let input: BudgetInput = serde_json::from_reader(reader)?;

    let amounts = [input.budget_total, input.spent_to_date, input.committed];
    let category_amounts = input.categories.iter().flat_map(|c| [c.budgeted, c.actual]);
    if !amounts.into_iter().chain(category_amounts).all(f64::is_finite) {
        return Err(Error::InvalidData(format!(
            "Budget '{}' contains non-finite amounts",
            input.project_id
        )));
    }

    debug!(
        "Loaded budget {} with {} categories",
        input.project_id,
        input.categories.len()
    );
    Ok(input)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidData(format!("Missing '{}' column", name)))
}

/// Sort by date and reject duplicate dates or non-finite values
fn normalize_series(mut points: Vec<TimeSeriesPoint>) -> Result<Vec<TimeSeriesPoint>> {
    if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
        return Err(Error::InvalidData(format!(
            "Non-finite value on {}",
            bad.date
        )));
    }

    points.sort_by_key(|p| p.date);

    if let Some(dup) = points.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(Error::InvalidData(format!("Duplicate date {}", dup[0].date)));
    }

    Ok(points)
}
