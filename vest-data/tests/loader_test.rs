//! Integration tests: the CSV fixture round-trips into configurations
//! the engine accepts.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use vest_core::{IncomeTaxSchedule, TaxYearConfig};
use vest_data::{BracketLoaderError, BracketTableLoader, seeds};

const FIXTURE_CSV: &str = include_str!("../test-data/tax_brackets.csv");

#[test]
fn fixture_parses_completely() {
    let records = BracketTableLoader::parse(FIXTURE_CSV.as_bytes()).expect("failed to parse CSV");

    assert_eq!(records.len(), 14);
    assert_eq!(BracketTableLoader::years(&records), vec![2023, 2024]);
}

#[test]
fn fixture_2024_brackets_match_the_seeds() {
    let records = BracketTableLoader::parse(FIXTURE_CSV.as_bytes()).expect("failed to parse CSV");

    let brackets =
        BracketTableLoader::brackets_for_year(&records, 2024).expect("2024 missing from fixture");

    assert_eq!(brackets, seeds::tax_year_2024().brackets);
}

#[test]
fn loaded_brackets_assemble_into_a_valid_config() {
    let records = BracketTableLoader::parse(FIXTURE_CSV.as_bytes()).expect("failed to parse CSV");
    let brackets =
        BracketTableLoader::brackets_for_year(&records, 2023).expect("2023 missing from fixture");

    let config = TaxYearConfig {
        tax_year: 2023,
        brackets,
        ..seeds::tax_year_2023()
    };

    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn loaded_schedule_computes_marginal_tax() {
    let records = BracketTableLoader::parse(FIXTURE_CSV.as_bytes()).expect("failed to parse CSV");
    let brackets =
        BracketTableLoader::brackets_for_year(&records, 2024).expect("2024 missing from fixture");

    let schedule = IncomeTaxSchedule::new(&brackets);

    // A 1,000 increment starting exactly on the first boundary is taxed
    // entirely at the second bracket's rate.
    assert_eq!(schedule.marginal_tax(dec!(84120), dec!(1000)), dec!(140));
}

#[test]
fn missing_year_is_reported_by_year() {
    let records = BracketTableLoader::parse(FIXTURE_CSV.as_bytes()).expect("failed to parse CSV");

    let result = BracketTableLoader::brackets_for_year(&records, 2019);

    assert_eq!(result, Err(BracketLoaderError::YearNotFound(2019)));
}

#[test]
fn truncated_file_is_a_parse_error() {
    let truncated = &FIXTURE_CSV[..FIXTURE_CSV.len() - 60];

    let result = BracketTableLoader::parse(truncated.as_bytes());

    assert!(matches!(result, Err(BracketLoaderError::CsvParse(_))));
}
