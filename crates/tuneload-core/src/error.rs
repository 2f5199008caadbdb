//! Error taxonomy for the line ingestion pipeline

use std::num::ParseIntError;

use crate::store::Param;

/// Failure to turn one tokenized line into a typed record.
///
/// Always recoverable: the stream processor logs it and moves on.
#[derive(Debug)]
pub enum DecodeError {
    /// Field count after tokenizing differs from the shape's arity.
    Arity { expected: usize, found: usize },
    /// Field is not a strict base-10 integer.
    Int {
        field: &'static str,
        raw: String,
        source: ParseIntError,
    },
    /// Field is not a boolean literal.
    Bool { field: &'static str, raw: String },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arity { expected, found } => {
                write!(f, "expected {expected} fields, counted {found}")
            }
            Self::Int { field, raw, source } => {
                write!(f, "invalid integer for {field} ({raw:?}): {source}")
            }
            Self::Bool { field, raw } => write!(f, "invalid boolean for {field} ({raw:?})"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Error reported by a [`Store`](crate::store::Store) while executing a statement.
#[derive(Debug)]
pub enum StoreError {
    DuckDb(duckdb::Error),
    /// Rejection from a store that is not backed by DuckDB (e.g. a test double).
    Rejected(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuckDb(e) => write!(f, "DuckDB: {e}"),
            Self::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<duckdb::Error> for StoreError {
    fn from(e: duckdb::Error) -> Self {
        Self::DuckDb(e)
    }
}

/// Bulk statement could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A multi-row insert needs at least one value group.
    NoGroups,
    /// A row bound a different number of parameters than the template has columns.
    Width { expected: usize, found: usize },
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoGroups => write!(f, "insert needs at least one value group"),
            Self::Width { expected, found } => {
                write!(f, "row bound {found} parameters, template has {expected} columns")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Failed flush attempt. The batch has already been cleared when this is returned.
#[derive(Debug)]
pub enum FlushError {
    Statement { rows: usize, source: TemplateError },
    Store {
        rows: usize,
        /// Parameters bound by the first row of the rejected batch
        first: Vec<Param>,
        source: StoreError,
    },
}

impl FlushError {
    /// Number of buffered rows that were dropped with this attempt.
    pub fn rows(&self) -> usize {
        match self {
            Self::Statement { rows, .. } | Self::Store { rows, .. } => *rows,
        }
    }
}

impl std::fmt::Display for FlushError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Statement { rows, source } => {
                write!(f, "building insert for {rows} rows: {source}")
            }
            Self::Store {
                rows,
                first,
                source,
            } => write!(f, "inserting {rows} rows (first {first:?}): {source}"),
        }
    }
}

impl std::error::Error for FlushError {}

/// Error from one pipeline run, tagged with the stage that produced it.
///
/// Only `Config` and `Flush` ever end a run; `Read` and `Decode` are
/// formatted into the run log and swallowed.
#[derive(Debug)]
pub enum IngestError {
    /// Batch capacity must be positive.
    Config { capacity: usize },
    Read { line: usize, source: std::io::Error },
    Decode { line: usize, source: DecodeError },
    Flush { line: usize, source: FlushError },
}

impl IngestError {
    /// Pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Read { .. } => "read",
            Self::Decode { .. } => "decode",
            Self::Flush { .. } => "flush",
        }
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config { capacity } => {
                write!(f, "config: batch size ({capacity}) must be positive")
            }
            Self::Read { line, source } => write!(f, "read: line #{line}: {source}"),
            Self::Decode { line, source } => write!(f, "decode: line #{line}: {source}"),
            Self::Flush { line, source } => write!(f, "flush: near line #{line}: {source}"),
        }
    }
}

impl std::error::Error for IngestError {}
