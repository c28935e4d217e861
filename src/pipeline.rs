//! Enumerate, discover, extract, label, emit.

use std::fs;
use std::io::Write;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::CollectError;
use crate::extract::{MeanRowExtractor, StatExtractor};
use crate::label::size_label;
use crate::schema::{OutputRow, HEADER};
use crate::space::{BenchmarkId, BenchmarkSpace};
use crate::OutputFormat;

#[derive(Clone, Debug)]
pub struct PipelineOptions {
    /// Abort when a report has a `Mean` row but the value line breaks the layout.
    pub strict: bool,
    /// Extraction threads; `0` or `1` streams rows one at a time.
    pub jobs: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            strict: false,
            jobs: 1,
        }
    }
}

/// Totals for one run, logged once the table is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub missing_stats: usize,
}

impl RunSummary {
    fn record(&mut self, row: &OutputRow) {
        self.rows += 1;
        if row.mean_ns.is_none() {
            self.missing_stats += 1;
        }
    }
}

pub struct Pipeline<E = MeanRowExtractor> {
    space: BenchmarkSpace,
    extractor: E,
    options: PipelineOptions,
}

impl Pipeline<MeanRowExtractor> {
    /// Pipeline over `space` reading criterion's HTML `Mean` row.
    pub fn new(space: BenchmarkSpace, options: PipelineOptions) -> Self {
        Self::with_extractor(space, MeanRowExtractor::default(), options)
    }
}

impl<E: StatExtractor> Pipeline<E> {
    pub fn with_extractor(space: BenchmarkSpace, extractor: E, options: PipelineOptions) -> Self {
        Self {
            space,
            extractor,
            options,
        }
    }

    /// Every (id, size) pair found on disk, in enumeration order.
    pub fn targets(
        &self,
    ) -> impl Iterator<Item = Result<(BenchmarkId, u64), CollectError>> + '_ {
        self.space
            .ids()
            .flat_map(move |id| match self.space.sizes(&id) {
                Ok(sizes) => sizes
                    .into_iter()
                    .map(|size| Ok((id.clone(), size)))
                    .collect::<Vec<_>>(),
                Err(e) => vec![Err(e)],
            })
    }

    /// Lazily built rows, one per discovered size variant.
    pub fn rows(&self) -> impl Iterator<Item = Result<OutputRow, CollectError>> + '_ {
        self.targets()
            .map(move |target| target.and_then(|(id, size)| self.row(&id, size)))
    }

    /// All rows, extracted on `jobs` threads when `jobs > 1`.
    ///
    /// Discovery stays sequential and the result keeps enumeration order.
    pub fn collect_rows(&self) -> Result<Vec<OutputRow>, CollectError> {
        if self.options.jobs <= 1 {
            return self.rows().collect();
        }

        let targets = self.targets().collect::<Result<Vec<_>, _>>()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .build()?;
        pool.install(|| {
            targets
                .par_iter()
                .map(|(id, size)| self.row(id, *size))
                .collect()
        })
    }

    /// Write the table in `format`, header first.
    pub fn write<W: Write>(
        &self,
        format: OutputFormat,
        writer: W,
    ) -> Result<RunSummary, CollectError> {
        let summary = match format {
            OutputFormat::Csv => self.write_csv(writer)?,
            OutputFormat::Json => self.write_json(writer)?,
        };
        info!(
            rows = summary.rows,
            missing_stats = summary.missing_stats,
            "collected benchmark table"
        );
        Ok(summary)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<RunSummary, CollectError> {
        let mut out = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        out.write_record(HEADER)?;

        let mut summary = RunSummary::default();
        let mut emit = |row: OutputRow| -> Result<(), CollectError> {
            summary.record(&row);
            out.write_record(row.to_record())?;
            Ok(())
        };

        if self.options.jobs <= 1 {
            for row in self.rows() {
                emit(row?)?;
            }
        } else {
            for row in self.collect_rows()? {
                emit(row)?;
            }
        }

        out.flush().map_err(CollectError::Output)?;
        Ok(summary)
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<RunSummary, CollectError> {
        let rows = self.collect_rows()?;
        let mut summary = RunSummary::default();
        rows.iter().for_each(|row| summary.record(row));

        serde_json::to_writer_pretty(&mut writer, &rows).map_err(|e| {
            if e.is_io() {
                CollectError::Output(e.into())
            } else {
                CollectError::Json(e)
            }
        })?;
        writeln!(writer)
            .and_then(|_| writer.flush())
            .map_err(CollectError::Output)?;
        Ok(summary)
    }

    fn row(&self, id: &BenchmarkId, size: u64) -> Result<OutputRow, CollectError> {
        let path = self.space.report_path(id, size);
        let mean_ns = self.read_stat(&path)?;
        Ok(OutputRow {
            structure: id.structure.clone(),
            category: id.category.clone(),
            operation: id.operation.clone(),
            elements: size,
            elements_label: size_label(size),
            mean_ns,
        })
    }

    /// Missing, unreadable and unparsable reports all become `None`.
    fn read_stat(&self, path: &Path) -> Result<Option<f64>, CollectError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable report");
                return Ok(None);
            }
        };

        match self.extractor.extract(&text) {
            Ok(ns) => Ok(Some(ns)),
            Err(reason) if self.options.strict && reason.is_layout_deviation() => {
                Err(CollectError::LayoutDeviation {
                    path: path.to_path_buf(),
                    reason,
                })
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "no mean time in report");
                Ok(None)
            }
        }
    }
}
