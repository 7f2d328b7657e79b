//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::HashSet;

use downsample::{Column, Table, Value};

// Re-export canonical fixtures from downsample::testing
pub use downsample::testing::{empty_table, keyword_table, numeric_table, text_table};

// ============================================================================
// TABLE FIXTURES
// ============================================================================

/// People table shaped like a typical entity-matching input.
pub fn people(names: &[(&str, &str)]) -> Table {
    Table::new(
        vec![
            Column::numeric("id"),
            Column::textual("name"),
            Column::textual("city"),
        ],
        names
            .iter()
            .enumerate()
            .map(|(i, (name, city))| {
                vec![Value::Integer(i as i64), Value::from(*name), Value::from(*city)]
            })
            .collect(),
    )
    .expect("fixture rows match columns")
}

/// The `kw{i % modulus}` token carried by a row of a keyword table.
pub fn keyword_of(table: &Table, position: usize) -> String {
    table.rows()[position][1].to_string()
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Positions are strictly ascending (so distinct) and below `len`.
pub fn assert_ascending_in_range(positions: &[usize], len: usize) {
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1], "positions not ascending: {:?}", pair);
    }
    if let Some(&last) = positions.last() {
        assert!(last < len, "position {} out of range for {} rows", last, len);
    }
}

/// Positions are pairwise distinct and below `len`.
pub fn assert_distinct_in_range(positions: &[usize], len: usize) {
    let unique: HashSet<usize> = positions.iter().copied().collect();
    assert_eq!(unique.len(), positions.len(), "duplicate positions");
    assert!(positions.iter().all(|&p| p < len), "position out of range");
}

/// Every row of `sample` equals the row of `source` at the same position.
pub fn assert_rows_taken_from(sample: &Table, source: &Table, positions: &[usize]) {
    assert_eq!(sample.len(), positions.len());
    assert_eq!(sample.columns(), source.columns());
    for (row, &pos) in sample.rows().iter().zip(positions) {
        assert_eq!(row, &source.rows()[pos]);
    }
}
