// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a down-sampling run.
//!
//! A `Table` is an ordered sequence of rows over named, typed columns. The
//! sampler never reasons about raw values: it reasons about row *positions*,
//! the zero-based ordinal of a row inside one table instance.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Table**: every row has exactly `columns.len()` cells.
//!   `Table::new` rejects ragged input so nothing downstream re-checks it.
//!
//! - **Position**: `pos < table.len()` for the table it was derived from.
//!   `Table::take` is the only way positions turn back into rows, and it
//!   refuses out-of-range positions instead of panicking.
//!
//! - **TableId**: unique for the lifetime of the process. Two tables with
//!   identical contents still have different ids, which is exactly what the
//!   catalog needs to keep their metadata apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TableError;

// =============================================================================
// TABLE IDENTITY
// =============================================================================

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle identifying one table instance.
///
/// Allocated from a process-wide counter when a `Table` is constructed.
/// Materializing a subset (`Table::take`) or cloning through `Table::new`
/// always allocates a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TableId(pub u64);

impl TableId {
    fn next() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table#{}", self.0)
    }
}

// =============================================================================
// COLUMNS AND VALUES
// =============================================================================

/// Declared kind of a column.
///
/// Only `Textual` columns feed the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Textual,
    Numeric,
    Boolean,
}

/// A named column with its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn textual(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Textual)
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Numeric)
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Key used to compare cells for uniqueness checks.
    ///
    /// Floats compare by bit pattern so the key is hashable.
    pub(crate) fn identity_key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(format!("b:{}", b)),
            Value::Integer(i) => Some(format!("i:{}", i)),
            Value::Float(x) => Some(format!("f:{:x}", x.to_bits())),
            Value::Text(s) => Some(format!("s:{}", s)),
        }
    }
}

/// String form used by the tokenizer. `Null` renders as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A row is a fixed-width slice of cells, aligned with the table's columns.
pub type Row = Vec<Value>;

// =============================================================================
// TABLE
// =============================================================================

/// An ordered collection of rows with named, typed columns.
#[derive(Debug)]
pub struct Table {
    id: TableId,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a table, validating that every row matches the column count.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self, TableError> {
        for (position, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::ArityMismatch {
                    position,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }

        Ok(Self {
            id: TableId::next(),
            columns,
            rows,
        })
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Iterate over the cells of one column in row order.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[column])
    }

    /// Materialize a new table holding the rows at `positions`, in that order.
    ///
    /// The result gets a fresh `TableId`; metadata is not carried over here,
    /// that is the catalog's job.
    pub fn take(&self, positions: &[usize]) -> Result<Table, TableError> {
        let mut rows = Vec::with_capacity(positions.len());
        for &position in positions {
            let row = self.rows.get(position).ok_or(TableError::RowOutOfRange {
                position,
                len: self.rows.len(),
            })?;
            rows.push(row.clone());
        }

        Ok(Table {
            id: TableId::next(),
            columns: self.columns.clone(),
            rows,
        })
    }
}
