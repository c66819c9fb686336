//! Error types for eac2json.

use std::path::PathBuf;

use thiserror::Error;

use crate::history::{Action, Expected, NotFound};

/// Errors that abort a conversion.
///
/// There is no partial output: a page that deviates from the expected layout
/// fails as a whole.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("open {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no history")]
    MissingHistory,

    #[error("{context}: {miss}")]
    Structure {
        context: &'static str,
        miss: NotFound,
    },

    #[error("bad table node {0}")]
    BadTable(String),

    #[error("no header")]
    MissingHeader,

    #[error("header has no {0:?} column")]
    MissingColumn(String),

    #[error("row {row}: unrecognized row")]
    UnrecognizedRow { row: usize },

    #[error("row {row}: no {column:?} value ({width} cells)")]
    ShortRow {
        row: usize,
        column: String,
        width: usize,
    },

    #[error("row {row}: unknown row type {action:?}")]
    UnknownAction { row: usize, action: String },

    #[error("row {row}: {action} details: expected {expected}, got {found}")]
    Cardinality {
        row: usize,
        action: Action,
        expected: Expected,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
