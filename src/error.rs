use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::Endpoint;

pub type Result<T> = std::result::Result<T, TimelineError>;

/// Failures that stop an operation from producing a value.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid hex color '{value}': expected 6 or 8 hex digits")]
    InvalidColor { value: String },

    #[error("invalid date '{value}'")]
    InvalidDate { value: String },

    #[error("CSV is missing required columns. Found headers: {found:?}. Need columns for: start, end.")]
    MissingColumns { found: Vec<String> },

    #[error("no valid items found in {path} ({skipped} rows skipped)")]
    NoItems { path: PathBuf, skipped: usize },

    #[error("cannot lay out an empty timeline")]
    EmptyTimeline,
}

/// Non-fatal findings reported while laying out a timeline.
///
/// Layout always proceeds past these; they are surfaced through `tracing`
/// and returned alongside the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A month value outside `[0, 12]`. The value is used as given.
    MonthOutOfRange {
        index: usize,
        endpoint: Endpoint,
        month: i32,
    },
    /// An item whose end precedes its start.
    InvertedRange { index: usize, span: i64 },
    /// The level assignment loop hit its iteration cap. Items not yet placed
    /// are dropped from the layout.
    CapacityExceeded {
        iterations: usize,
        placed: usize,
        total: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthOutOfRange {
                index,
                endpoint,
                month,
            } => write!(
                f,
                "item {index}: {endpoint} month {month} is outside [0, 12]"
            ),
            Self::InvertedRange { index, span } => {
                write!(f, "item {index}: end precedes start (span {span} months)")
            }
            Self::CapacityExceeded {
                iterations,
                placed,
                total,
            } => write!(
                f,
                "level assignment gave up after {iterations} iterations; \
                 placed {placed} of {total} items (more items than supported)"
            ),
        }
    }
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}
