// THEORY:
// One error type for the whole run. Every variant is terminal: the pipeline never
// retries, never degrades, and never prints a partial report. The variants follow
// the stages of a run so the binary can tell the user which step failed.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, CensusError>;

#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    /// The binary was not given exactly one image path.
    #[error("Missing image argument (expected exactly one path, got {got})")]
    Usage { got: usize },

    /// The input file could not be opened.
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the input stream failed before decoding could finish.
    #[error("failed to read image data: {0}")]
    Read(#[from] io::Error),

    /// No registered signature matched the start of the stream.
    #[error("unsupported image format (leading bytes {head:02X?})")]
    UnsupportedFormat { head: Vec<u8> },

    /// A signature matched but the content did not decode.
    #[error("corrupt {format} data: {source}")]
    CorruptData {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorKeyError {
    #[error("color key must be 6 hex digits, got {0} characters")]
    Length(usize),

    #[error("invalid hex digit {0:?} in color key")]
    Digit(char),
}
