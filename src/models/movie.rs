use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Column holding the TMDB identifier
pub const ID_COLUMN: &str = "movie_id";
pub const TITLE_COLUMN: &str = "title";
pub const RATING_COLUMN: &str = "vote_average";

/// Where a table's release year comes from
///
/// Chosen once per table by column presence, in priority order
/// `release_date` > `release_year` > `year`. A table that has a
/// `release_date` column reads every row's year from it, even rows whose
/// date is null or unparsable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearSource {
    ReleaseDate,
    ReleaseYear,
    Year,
    Unavailable,
}

impl YearSource {
    /// Picks the source from the set of columns present in a table
    pub fn detect<'a>(mut columns: impl Iterator<Item = &'a str> + Clone) -> Self {
        if columns.clone().any(|c| c == "release_date") {
            YearSource::ReleaseDate
        } else if columns.clone().any(|c| c == "release_year") {
            YearSource::ReleaseYear
        } else if columns.any(|c| c == "year") {
            YearSource::Year
        } else {
            YearSource::Unavailable
        }
    }

    pub fn column(&self) -> Option<&'static str> {
        match self {
            YearSource::ReleaseDate => Some("release_date"),
            YearSource::ReleaseYear => Some("release_year"),
            YearSource::Year => Some("year"),
            YearSource::Unavailable => None,
        }
    }

    /// Resolves a raw cell into a calendar year
    ///
    /// Null cells are unknown. Anything that cannot be read as a year is
    /// reported as `MalformedYear`; callers degrade it to unknown.
    pub fn resolve(&self, raw: Option<&Value>) -> AppResult<Option<i32>> {
        let value = match raw {
            None | Some(Value::Null) => return Ok(None),
            Some(v) => v,
        };

        match self {
            YearSource::Unavailable => Ok(None),
            YearSource::ReleaseDate => match value {
                Value::String(s) if s.trim().is_empty() => Ok(None),
                Value::String(s) => parse_release_year(s).map(Some),
                other => Err(AppError::MalformedYear(other.to_string())),
            },
            YearSource::ReleaseYear | YearSource::Year => parse_year_value(value).map(Some),
        }
    }
}

/// Extracts the calendar year from a release date string
pub fn parse_release_year(raw: &str) -> AppResult<i32> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return Ok(date.year());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.year());
    }
    // Year-month ("2009-12") and bare year ("2009")
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return Ok(date.year());
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(year) = raw.parse() {
            return Ok(year);
        }
    }

    Err(AppError::MalformedYear(raw.to_string()))
}

fn parse_year_value(value: &Value) -> AppResult<i32> {
    let year = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    year.and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| AppError::MalformedYear(value.to_string()))
}

/// A movie record from the metadata table
///
/// Its position in the table is its row/column index into the
/// similarity matrix. Absent fields stay `None`; defaults are applied when
/// a record is turned into a [`Recommendation`](super::Recommendation).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB identifier
    pub id: Option<i64>,
    pub title: Option<String>,
    pub year: Option<i32>,
    /// TMDB `vote_average`
    pub rating: Option<f64>,
}

impl Movie {
    /// Builds a record from one table row
    ///
    /// `row` yields the cell for a column name, or `None` when the row has
    /// no such column.
    pub fn from_row<'a, F>(row: F, year_source: YearSource) -> Self
    where
        F: Fn(&str) -> Option<&'a Value>,
    {
        let id = row(ID_COLUMN).and_then(as_i64);
        let title = row(TITLE_COLUMN).and_then(|v| v.as_str()).map(str::to_string);
        let rating = row(RATING_COLUMN).and_then(as_f64);

        let year = match year_source.column() {
            Some(column) => match year_source.resolve(row(column)) {
                Ok(year) => year,
                Err(e) => {
                    tracing::debug!(
                        movie_id = ?id,
                        error = %e,
                        "Treating release year as unknown"
                    );
                    None
                }
            },
            None => None,
        };

        Self {
            id,
            title,
            year,
            rating,
        }
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
