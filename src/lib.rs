//! Collects per-size criterion reports of the set benchmarks into one flat
//! table (one row per structure/category/operation/size) for plotting.

use clap::ValueEnum;

pub mod error;
pub mod extract;
pub mod label;
pub mod pipeline;
pub mod schema;
pub mod space;

pub use error::{CollectError, ExtractError};
pub use extract::{MeanRowExtractor, StatExtractor};
pub use label::size_label;
pub use pipeline::{Pipeline, PipelineOptions, RunSummary};
pub use schema::OutputRow;
pub use space::{BenchmarkId, BenchmarkSpace};

/// Output encoding for the collected table.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a fixed header row.
    #[default]
    Csv,
    /// Pretty-printed JSON array of rows, keyed by the CSV header names.
    Json,
}
