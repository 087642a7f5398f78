use thiserror::Error;

use crate::models::frame::Field;

/// Terminal pipeline failure surfaced to the user. Missing cells, absent
/// exchange rates and SMA warm-up rows are never errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Could not retrieve price data for \"{ticker}\". Check that the ticker symbol is correct.")]
    DataUnavailable { ticker: String },
}

/// Raised while flattening a provider frame into the fixed series schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Column {column} has {actual} values but the frame has {expected} dates")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Required field {0} is missing from the frame")]
    MissingField(Field),
}

/// Rejected user selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    #[error("Moving average window {window} is not one of {allowed:?}")]
    WindowNotAllowed { window: usize, allowed: Vec<usize> },

    #[error("Invalid moving average window: {0}")]
    InvalidWindow(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
