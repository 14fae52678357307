//! Error types for fastautils.
//!
//! This module provides exhaustive, strongly-typed errors for all operations
//! in the library, enabling precise error handling and informative messages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in fastautils operations.
#[derive(Debug, Error)]
pub enum FastaUtilsError {
    /// The input does not start with a FASTA record marker.
    #[error("not a valid FASTA file: expected '>' at byte {offset}, found {}", describe_byte(*.found))]
    InvalidFasta { offset: u64, found: u8 },

    /// Pattern sizes are zero or out of order.
    #[error("invalid pattern sizes {min}..{max}: need 1 <= min <= max")]
    InvalidPatternSize { min: usize, max: usize },

    /// The configured alphabet and sizes would produce too many patterns.
    #[error("pattern universe of {patterns} patterns exceeds the limit of {limit}; lower the maximum size")]
    PatternUniverseTooLarge { patterns: u128, limit: usize },

    /// A custom alphabet was rejected.
    #[error("invalid alphabet: {details}")]
    InvalidAlphabet { details: String },

    /// Failed to open the sequence file.
    #[error("failed to read sequence file '{path}': {source}")]
    SequenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed while reading the input stream.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a delimited row.
    #[error("failed to write table row: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },

    /// The output file exists and overwriting was not requested.
    #[error("output file '{}' already exists; pass --force to overwrite", .path.display())]
    OutputExists { path: PathBuf },

    /// No analysis was selected before running.
    #[error("no analysis selected; call .patterns() or .orfs() first")]
    ModeNotSet,
}

fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}' (0x{byte:02x})", byte as char)
    } else {
        format!("0x{byte:02x}")
    }
}

/// Error for an invalid pattern size range.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("pattern sizes {min}..{max} are out of range: need 1 <= min <= max")]
pub struct PatternSizeError {
    /// The requested minimum size.
    pub min: usize,
    /// The requested maximum size.
    pub max: usize,
}

impl From<std::io::Error> for FastaUtilsError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteError { source }
    }
}

impl From<csv::Error> for FastaUtilsError {
    fn from(source: csv::Error) -> Self {
        Self::Csv { source }
    }
}

impl From<serde_json::Error> for FastaUtilsError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonError { source }
    }
}

impl From<PatternSizeError> for FastaUtilsError {
    fn from(err: PatternSizeError) -> Self {
        Self::InvalidPatternSize {
            min: err.min,
            max: err.max,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = FastaUtilsError> = std::result::Result<T, E>;
