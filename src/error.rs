use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a collection run.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A directory under a benchmark triple is neither housekeeping nor a size.
    #[error("size directory {name:?} under {} is not a non-negative integer", path.display())]
    MalformedSizeDirectory { path: PathBuf, name: String },

    /// The report's anchor was found but the value line did not match the layout (strict mode).
    #[error("unexpected report layout in {}: {reason}", path.display())]
    LayoutDeviation { path: PathBuf, reason: ExtractError },

    #[error("failed to list {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write the collected table")]
    Output(#[source] io::Error),

    #[error("failed to start extraction workers")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reasons a report artifact yields no statistic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no \"Mean\" row in report")]
    MissingAnchor,

    #[error("report ends before the mean value line")]
    MissingValueLine,

    #[error("mean value line has no `value unit` pair: {0:?}")]
    MalformedValue(String),

    #[error("unrecognized time unit {0:?}")]
    UnknownUnit(String),
}

impl ExtractError {
    /// True when the anchor was located but what follows it breaks the expected layout.
    pub fn is_layout_deviation(&self) -> bool {
        matches!(
            self,
            ExtractError::MissingValueLine | ExtractError::MalformedValue(_)
        )
    }
}
