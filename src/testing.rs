//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical table fixtures to avoid duplication.

#![doc(hidden)]

use crate::types::{Column, Table, Value};

/// A table with a numeric `id` column and one textual `text` column.
///
/// Row `i` has id `i` and the given text.
pub fn text_table(texts: &[&str]) -> Table {
    Table::new(
        vec![Column::numeric("id"), Column::textual("text")],
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| vec![Value::Integer(i as i64), Value::from(*text)])
            .collect(),
    )
    .expect("fixture rows match columns")
}

/// A keyword-tagged table: row `i` carries the token `kw{i % modulus}`.
///
/// The extra `row{i}` token makes every row distinguishable.
pub fn keyword_table(rows: usize, modulus: usize) -> Table {
    Table::new(
        vec![
            Column::numeric("id"),
            Column::textual("tag"),
            Column::textual("label"),
        ],
        (0..rows)
            .map(|i| {
                vec![
                    Value::Integer(i as i64),
                    Value::Text(format!("kw{}", i % modulus)),
                    Value::Text(format!("row{}", i)),
                ]
            })
            .collect(),
    )
    .expect("fixture rows match columns")
}

/// A table with only numeric columns: nothing to tokenize.
pub fn numeric_table(rows: usize) -> Table {
    Table::new(
        vec![Column::numeric("id"), Column::numeric("score")],
        (0..rows)
            .map(|i| vec![Value::Integer(i as i64), Value::Float(i as f64 / 2.0)])
            .collect(),
    )
    .expect("fixture rows match columns")
}

/// An empty table with a textual column.
pub fn empty_table() -> Table {
    Table::new(vec![Column::textual("text")], Vec::new()).expect("no rows to validate")
}
