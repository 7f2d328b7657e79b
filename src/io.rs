// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON table files.
//!
//! ```json
//! {
//!   "columns": ["id", "name", "city"],
//!   "kinds": ["numeric", "textual", "textual"],
//!   "rows": [[1, "Ada Lovelace", "London"], [2, "Grace Hopper", null]]
//! }
//! ```
//!
//! `kinds` is optional. Without it a column is textual if any cell is a
//! string (or every cell is null), boolean if all non-null cells are
//! booleans, numeric otherwise. Written files always carry `kinds` so a
//! sample reloads with the same column kinds as its source.
//!
//! Integers outside the `i64` range are rejected as unsupported cells.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::TableError;
use crate::types::{Column, ColumnKind, Row, Table, Value};

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kinds: Option<Vec<ColumnKind>>,
    rows: Vec<Vec<JsonValue>>,
}

/// Parse a table from its JSON text.
pub fn parse_table(text: &str) -> Result<Table, TableError> {
    let file: TableFile = serde_json::from_str(text)?;
    from_file(file)
}

/// Read a table from a JSON file.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table, TableError> {
    let text = fs::read_to_string(path)?;
    parse_table(&text)
}

/// Write a table as pretty-printed JSON.
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<(), TableError> {
    let writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(writer, &to_file(table))?;
    Ok(())
}

/// Serialize a table to a JSON string.
pub fn table_to_string(table: &Table) -> Result<String, TableError> {
    Ok(serde_json::to_string_pretty(&to_file(table))?)
}

fn from_file(file: TableFile) -> Result<Table, TableError> {
    let width = file.columns.len();
    let mut rows: Vec<Row> = Vec::with_capacity(file.rows.len());
    for (position, cells) in file.rows.into_iter().enumerate() {
        if cells.len() != width {
            return Err(TableError::ArityMismatch {
                position,
                expected: width,
                actual: cells.len(),
            });
        }
        let row = cells
            .into_iter()
            .enumerate()
            .map(|(column, cell)| {
                cell_from_json(cell).ok_or_else(|| TableError::UnsupportedCell {
                    position,
                    column: file.columns[column].clone(),
                })
            })
            .collect::<Result<Row, _>>()?;
        rows.push(row);
    }

    let kinds = match file.kinds {
        Some(kinds) if kinds.len() != width => {
            return Err(TableError::KindCountMismatch {
                declared: kinds.len(),
                columns: width,
            })
        }
        Some(kinds) => kinds,
        None => (0..width).map(|c| infer_kind(&rows, c)).collect(),
    };

    let columns = file
        .columns
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column::new(name, kind))
        .collect();

    Table::new(columns, rows)
}

fn to_file(table: &Table) -> TableFile {
    TableFile {
        columns: table.columns().iter().map(|c| c.name.clone()).collect(),
        kinds: Some(table.columns().iter().map(|c| c.kind).collect()),
        rows: table
            .rows()
            .iter()
            .map(|row| row.iter().map(cell_to_json).collect())
            .collect(),
    }
}

fn cell_from_json(cell: JsonValue) -> Option<Value> {
    match cell {
        JsonValue::Null => Some(Value::Null),
        JsonValue::Bool(b) => Some(Value::Bool(b)),
        // Integers past i64::MAX are rejected, not widened to floats.
        JsonValue::Number(n) if n.is_u64() && n.as_i64().is_none() => None,
        JsonValue::Number(n) => Some(match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        JsonValue::String(s) => Some(Value::Text(s)),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

fn cell_to_json(cell: &Value) -> JsonValue {
    match cell {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::from(*i),
        // Non-finite floats have no JSON form.
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Text(s) => JsonValue::String(s.clone()),
    }
}

fn infer_kind(rows: &[Row], column: usize) -> ColumnKind {
    let mut saw_bool = false;
    let mut saw_number = false;
    for row in rows {
        match &row[column] {
            Value::Text(_) => return ColumnKind::Textual,
            Value::Bool(_) => saw_bool = true,
            Value::Integer(_) | Value::Float(_) => saw_number = true,
            Value::Null => {}
        }
    }
    match (saw_bool, saw_number) {
        (false, false) => ColumnKind::Textual,
        (true, false) => ColumnKind::Boolean,
        _ => ColumnKind::Numeric,
    }
}
