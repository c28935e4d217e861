//! Mean-time extraction from criterion HTML reports.
//!
//! Criterion's `report/index.html` lays the additive statistics out as a table
//! with one cell per line:
//!
//! ```text
//! <td>Mean</td>
//! <td class="ci-bound">120.31 ns</td>   <- lower bound
//! <td>123.45 ns</td>                    <- point estimate
//! <td class="ci-bound">126.02 ns</td>   <- upper bound
//! ```
//!
//! The point estimate sits exactly two lines below the label cell. Extraction
//! anchors on the `<td>` cell text and reads that fixed offset, never a byte offset.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ExtractError;

/// A table cell; the capture is its text content.
static TABLE_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<td\b[^>]*>\s*([^<]*?)\s*</td>").expect("valid cell pattern"));

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup pattern"));

/// A decimal value followed by a unit word, e.g. `123.45 ns`.
static VALUE_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(\d+(?:\.\d+)?)\s+(\p{L}+)").expect("valid value pattern")
});

/// Recovers one statistic, in nanoseconds, from a report's text.
pub trait StatExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<f64, ExtractError>;
}

/// Reads the first `value unit` pair a fixed number of lines below a label cell.
#[derive(Clone, Debug)]
pub struct MeanRowExtractor {
    /// Text of the anchor `<td>` cell.
    pub label: String,
    /// Lines between the anchor and the value line, counting the value line.
    pub offset: usize,
}

impl Default for MeanRowExtractor {
    fn default() -> Self {
        Self {
            label: "Mean".to_string(),
            offset: 2,
        }
    }
}

impl MeanRowExtractor {
    fn is_anchor(&self, line: &str) -> bool {
        TABLE_CELL
            .captures_iter(line)
            .any(|cell| &cell[1] == self.label)
    }
}

impl StatExtractor for MeanRowExtractor {
    fn extract(&self, text: &str) -> Result<f64, ExtractError> {
        let lines: Vec<&str> = text.lines().collect();
        let anchor = lines
            .iter()
            .position(|line| self.is_anchor(line))
            .ok_or(ExtractError::MissingAnchor)?;

        let value_line = lines
            .get(anchor + self.offset)
            .ok_or(ExtractError::MissingValueLine)?;

        let content = MARKUP.replace_all(value_line, " ");
        let caps = VALUE_UNIT
            .captures(&content)
            .ok_or_else(|| ExtractError::MalformedValue(content.trim().to_string()))?;

        let value: f64 = caps[1]
            .parse()
            .map_err(|_| ExtractError::MalformedValue(content.trim().to_string()))?;

        to_nanos(value, &caps[2])
    }
}

/// Normalize a time value to nanoseconds. Only `ns` and `us` are accepted.
pub fn to_nanos(value: f64, unit: &str) -> Result<f64, ExtractError> {
    match unit {
        "ns" => Ok(value),
        "us" => Ok(value * 1000.0),
        other => Err(ExtractError::UnknownUnit(other.to_string())),
    }
}
