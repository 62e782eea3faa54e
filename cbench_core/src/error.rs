use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single compress or decompress call.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("level {level} outside valid range {min}..={max}")]
    InvalidLevel { level: i32, min: i32, max: i32 },

    #[error("compress failed: {message}")]
    Compress { message: String },

    #[error("decompress failed: {message}")]
    Decompress { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub fn compress<T: std::fmt::Display>(message: T) -> Self {
        Self::Compress {
            message: message.to_string(),
        }
    }

    pub fn decompress<T: std::fmt::Display>(message: T) -> Self {
        Self::Decompress {
            message: message.to_string(),
        }
    }
}

/// Fatal condition that ends one codec's sweep.
///
/// Other codecs keep running; no record is produced for the failing level.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("{codec} level {level}: {source}")]
    Codec {
        codec: String,
        level: i32,
        #[source]
        source: CodecError,
    },

    #[error(
        "{codec} level {level}: round-trip mismatch (expected {expected_len} bytes, got {actual_len}{})",
        difference_suffix(.first_difference)
    )]
    RoundTripMismatch {
        codec: String,
        level: i32,
        expected_len: usize,
        actual_len: usize,
        first_difference: Option<usize>,
    },
}

fn difference_suffix(first_difference: &Option<usize>) -> String {
    match first_difference {
        Some(at) => format!(", first difference at byte {at}"),
        None => String::new(),
    }
}

impl SweepError {
    pub fn codec(&self) -> &str {
        match self {
            Self::Codec { codec, .. } | Self::RoundTripMismatch { codec, .. } => codec,
        }
    }

    pub fn level(&self) -> i32 {
        match self {
            Self::Codec { level, .. } | Self::RoundTripMismatch { level, .. } => *level,
        }
    }
}

/// Failure while writing a report artifact.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing report output: {0}")]
    Output(#[source] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
