// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Table file parsing under adversarial input.
//!
//! A malformed table file should produce an error, never a panic. Parsed
//! tables must be rectangular and tokenizable.

#![no_main]

use libfuzzer_sys::fuzz_target;
use downsample::io::{parse_table, table_to_string};
use downsample::{textual_columns, tokenize, StopWords};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(table) = parse_table(text) else {
        return;
    };

    let width = table.columns().len();
    assert!(table.rows().iter().all(|row| row.len() == width));

    if let Ok(textual) = textual_columns(&table) {
        for row in table.rows() {
            for token in tokenize(row, &textual, StopWords::bundled()) {
                assert!(!token.is_empty());
            }
        }
    }

    // Anything that parsed serializes and parses again with the same shape.
    let written = table_to_string(&table).expect("parsed tables serialize");
    let back = parse_table(&written).expect("serialized tables parse");
    assert_eq!(back.columns(), table.columns());
    assert_eq!(back.len(), table.len());
});
