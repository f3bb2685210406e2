use thiserror::Error;

/// Result alias for ribbon data operations.
pub type Result<T> = std::result::Result<T, RibbonError>;

/// Errors raised while building or reshaping ribbon data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RibbonError {
    #[error("shape mismatch: {rows}x{cols} needs {expected} values, got {actual}")]
    Shape {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} has {len} values, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("invalid range: high ({high}) must be greater than low ({low})")]
    InvalidRange { low: f64, high: f64 },

    #[error("invalid bin count {0}")]
    InvalidBins(usize),

    #[error("standard deviation must be finite and non-negative, got {0}")]
    InvalidStdDev(f64),

    #[error("{rows}x{cols} matrix is too large")]
    TooLarge { rows: usize, cols: usize },

    #[error("channel count {0} outside 1..={max}", max = crate::settings::MAX_CHANNELS)]
    InvalidChannels(usize),

    #[error("event count {0} outside 1..={max}", max = crate::settings::MAX_EVENTS)]
    InvalidEvents(usize),

    #[error("channel {channel} out of range (0..{channels})")]
    ChannelOutOfRange { channel: usize, channels: usize },
}
