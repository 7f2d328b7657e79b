// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-probe selection over arbitrary corpora and budgets.
//!
//! Whatever the tokens and budgets, `probe_and_select` either rejects the
//! budgets or returns exactly `total_budget` distinct in-range positions.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

use downsample::testing::text_table;
use downsample::{build_inverted_index, probe_and_select, StopWords, TokenSet};

#[derive(Debug, Arbitrary)]
struct Input {
    corpus: Vec<String>,
    probe: Vec<String>,
    match_budget: u8,
    total_budget: u8,
    seed: u64,
}

fuzz_target!(|input: Input| {
    if input.corpus.is_empty() || input.corpus.len() > 512 {
        return;
    }
    let refs: Vec<&str> = input.corpus.iter().map(String::as_str).collect();
    let table = text_table(&refs);
    let Ok(index) = build_inverted_index(&table, StopWords::bundled()) else {
        return;
    };

    let tokens: TokenSet = input.probe.iter().map(|t| t.to_lowercase()).collect();
    let total = input.total_budget as usize;
    let mut rng = StdRng::seed_from_u64(input.seed);

    match probe_and_select(
        &tokens,
        &index,
        input.match_budget as usize,
        total,
        table.len(),
        &mut rng,
    ) {
        Ok(selection) => {
            assert_eq!(selection.len(), total);
            assert!(selection.iter().all(|&p| p < table.len()));
        }
        Err(_) => {
            assert!(input.match_budget as usize > total || table.len() < total);
        }
    }
});
