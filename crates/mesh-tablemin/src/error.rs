//! Error types for the binary table stream.

use std::io;
use thiserror::Error;

/// Result type alias for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while reading or writing a table stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Underlying I/O failure.
    #[error("table stream I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended inside a record header.
    #[error("truncated record header: got {got} of 4 bytes")]
    TruncatedHeader {
        /// Header bytes that were available.
        got: usize,
    },

    /// The stream ended inside a record's entries.
    #[error("truncated record for chip ({x}, {y}): expected {expected} entries")]
    TruncatedRecord {
        /// Chip x coordinate from the record header.
        x: u8,
        /// Chip y coordinate from the record header.
        y: u8,
        /// Number of entries the header promised.
        expected: usize,
    },
}
