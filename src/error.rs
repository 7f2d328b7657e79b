// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy.
//!
//! | Error            | When                                             |
//! |------------------|--------------------------------------------------|
//! | `InvalidInput`   | bad argument: zero size, `y` larger than A, ...  |
//! | `EmptyTable`     | a table that must have rows has none             |
//! | `Resource`       | stop-word list missing or unreadable             |
//! | `Catalog`        | metadata lookup failed where it must not         |
//! | `Table`          | malformed table, out-of-range position           |
//!
//! Oversized sample requests are *not* errors: they are logged as warnings
//! and the whole of table B is used instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::TableId;

/// Top-level error for sampling operations.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidInput {
        argument: &'static str,
        reason: String,
    },
    #[error("input table `{argument}` is empty")]
    EmptyTable { argument: &'static str },
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Table(#[from] TableError),
}

impl SampleError {
    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        SampleError::InvalidInput {
            argument,
            reason: reason.into(),
        }
    }
}

/// Failure to initialize the stop-word list.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("stop-word list not found at {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read stop-word list at {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Catalog lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0} is not present in the catalog")]
    TableNotFound(TableId),
    #[error("property `{name}` is not set for {table}")]
    PropertyNotFound { table: TableId, name: String },
    #[error("column `{column}` does not exist in {table}")]
    UnknownColumn { table: TableId, column: String },
}

/// Structural problems with a table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("row {position} has {actual} cells, expected {expected}")]
    ArityMismatch {
        position: usize,
        expected: usize,
        actual: usize,
    },
    #[error("row position {position} out of range for table of {len} rows")]
    RowOutOfRange { position: usize, len: usize },
    #[error("declared {declared} column kinds for {columns} columns")]
    KindCountMismatch { declared: usize, columns: usize },
    #[error("cannot infer textual columns of an empty table")]
    NoRowsForInference,
    #[error(
        "unsupported cell in row {position}, column `{column}`: \
         cells must be null, booleans, strings or numbers within the i64 range"
    )]
    UnsupportedCell { position: usize, column: String },
    #[error("invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
