// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Row tokenization.
//!
//! A row's tokens are the lower-cased, whitespace-delimited words of its
//! textual cells, joined with single spaces, minus stop words. Tokens form a
//! set: order is irrelevant and duplicates within a row collapse.
//!
//! Non-textual columns never contribute. A row with no textual columns, or
//! whose textual cells are all empty, yields the empty set. That is valid and
//! simply means the row has no postings.

use std::collections::HashSet;

use crate::error::TableError;
use crate::stop_words::StopWords;
use crate::types::{ColumnKind, Table, Value};

/// A normalized token set for one row.
pub type TokenSet = HashSet<String>;

/// Positions of the textual columns of `table`.
///
/// Requires at least one row: the kinds of an empty table are considered
/// unknown, the same way a loader could not have inferred them.
pub fn textual_columns(table: &Table) -> Result<Vec<usize>, TableError> {
    if table.is_empty() {
        return Err(TableError::NoRowsForInference);
    }

    Ok(table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind == ColumnKind::Textual)
        .map(|(i, _)| i)
        .collect())
}

/// Tokenize one row.
pub fn tokenize(row: &[Value], textual: &[usize], stop_words: &StopWords) -> TokenSet {
    let mut joined = String::new();
    for &column in textual {
        joined.push_str(&row[column].to_string().to_lowercase());
        joined.push(' ');
    }

    joined
        .split_whitespace()
        .filter(|token| !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

/// Binds a table's textual columns to a stop-word list.
///
/// Built once per table so column inference is not repeated for every row.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    textual: Vec<usize>,
    stop_words: &'a StopWords,
}

impl<'a> Tokenizer<'a> {
    pub fn for_table(table: &Table, stop_words: &'a StopWords) -> Result<Self, TableError> {
        Ok(Self {
            textual: textual_columns(table)?,
            stop_words,
        })
    }

    pub fn tokenize(&self, row: &[Value]) -> TokenSet {
        tokenize(row, &self.textual, self.stop_words)
    }
}
