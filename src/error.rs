//! error types for parsing results files and evaluating recall

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a results (or ground truth) file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// fewer than the two header lines every results file starts with
    #[error("expected 2 header lines, found {found}")]
    MissingHeader { found: usize },

    #[error("line {line}: field {field:?} does not start with an integer id")]
    InvalidId {
        line: usize,
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("line {line}: expected {expected} ids, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Precondition failures of the recall computation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecallError {
    #[error("score has {score} queries but groundtruth has {groundtruth}")]
    QueryCountMismatch { score: usize, groundtruth: usize },

    #[error("cutoff {cutoff} is outside 1..={num_ranks}")]
    CutoffOutOfRange { cutoff: usize, num_ranks: usize },

    #[error("groundtruth has no neighbor columns")]
    MissingGroundTruth,
}
