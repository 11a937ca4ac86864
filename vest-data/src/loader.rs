use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use vest_core::TaxBracket;

/// Errors that can occur when loading bracket-table data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("tax year {0} not present in the loaded table")]
    YearNotFound(i32),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket-table CSV file.
///
/// The CSV format:
/// - `tax_year`: the tax year the bracket belongs to (e.g., 2024)
/// - `upper_bound`: cumulative annual income where the bracket ends
///   (empty for the unbounded top bracket)
/// - `rate`: the marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BracketRecord {
    pub tax_year: i32,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket-table CSV data.
///
/// Parsing and per-year selection live here; structural validation (the
/// unbounded terminal bracket, rate ranges) belongs to
/// [`vest_core::TaxYearConfig::validate`], which callers run on the
/// assembled configuration.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// The bracket table for one tax year, ordered ascending with the
    /// unbounded bracket last regardless of row order in the file.
    ///
    /// # Errors
    ///
    /// Returns [`BracketLoaderError::YearNotFound`] when the table has no
    /// rows for `year`.
    pub fn brackets_for_year(
        records: &[BracketRecord],
        year: i32,
    ) -> Result<Vec<TaxBracket>, BracketLoaderError> {
        let mut brackets: Vec<TaxBracket> = records
            .iter()
            .filter(|record| record.tax_year == year)
            .map(|record| TaxBracket {
                upper_bound: record.upper_bound,
                rate: record.rate,
            })
            .collect();

        if brackets.is_empty() {
            return Err(BracketLoaderError::YearNotFound(year));
        }

        brackets.sort_by_key(|bracket| (bracket.upper_bound.is_none(), bracket.upper_bound));
        Ok(brackets)
    }

    /// Every tax year present in the records, ascending and de-duplicated.
    pub fn years(records: &[BracketRecord]) -> Vec<i32> {
        let mut years: Vec<i32> = records.iter().map(|record| record.tax_year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
