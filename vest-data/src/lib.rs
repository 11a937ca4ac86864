//! Configuration tooling for the tax engine: a CSV loader for bracket
//! tables and the shipped per-year seed configurations. The engine itself
//! loads nothing; this crate produces the [`vest_core::TaxYearConfig`]
//! values callers pass into it.

pub mod loader;
pub mod seeds;

pub use loader::{BracketLoaderError, BracketRecord, BracketTableLoader};
