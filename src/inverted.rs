// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! Maps each token to the positions of the rows of one table that contain it.
//! The index is built in a single scan and is read-only afterwards.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SCAN_ORDER**: Each posting list is in row-scan order, which makes it
//!    strictly ascending (a row contributes a token *set*, so no repeats).
//! 2. **IN_RANGE**: Every posting is `< row_count`.
//! 3. **NON_EMPTY**: Every token present has at least one posting.
//!
//! The parallel builder tokenizes rows concurrently but merges in row order,
//! so it produces exactly the same posting lists as the sequential one.

use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::contracts::check_index_well_formed;
use crate::error::SampleError;
use crate::stop_words::StopWords;
use crate::tokenizer::{TokenSet, Tokenizer};
use crate::types::Table;

/// Token → ordered row positions.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<usize>>,
    row_count: usize,
}

impl InvertedIndex {
    /// Posting list for `token`; empty if no row contains it.
    pub fn postings(&self, token: &str) -> &[usize] {
        self.postings.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Number of rows in the indexed table.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of distinct tokens.
    pub fn vocabulary_len(&self) -> usize {
        self.postings.len()
    }

    /// Total number of postings across all tokens.
    pub fn total_postings(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> + '_ {
        self.postings
            .iter()
            .map(|(token, list)| (token.as_str(), list.as_slice()))
    }

    /// The `n` longest posting lists, longest first, ties by token.
    pub fn largest(&self, n: usize) -> Vec<(&str, &[usize])> {
        let mut lists: Vec<_> = self.iter().collect();
        lists.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
        lists.truncate(n);
        lists
    }

    /// Union of the posting lists of `tokens`.
    ///
    /// Ascending order keeps seeded draws from this pool reproducible.
    pub fn candidates(&self, tokens: &TokenSet) -> BTreeSet<usize> {
        let mut matched = BTreeSet::new();
        for token in tokens {
            matched.extend(self.postings(token).iter().copied());
        }
        matched
    }

    /// Number of shared tokens per candidate position.
    pub fn overlap_counts(&self, tokens: &TokenSet) -> HashMap<usize, usize> {
        let mut counts = HashMap::new();
        for token in tokens {
            for &pos in self.postings(token) {
                *counts.entry(pos).or_insert(0) += 1;
            }
        }
        counts
    }

    fn from_token_sets(rows: impl IntoIterator<Item = TokenSet>, row_count: usize) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, tokens) in rows.into_iter().enumerate() {
            for token in tokens {
                postings.entry(token).or_default().push(pos);
            }
        }

        let index = InvertedIndex {
            postings,
            row_count,
        };
        check_index_well_formed(&index);
        index
    }
}

fn require_rows(table: &Table) -> Result<(), SampleError> {
    if table.is_empty() {
        return Err(SampleError::EmptyTable { argument: "table" });
    }
    Ok(())
}

/// Build an inverted index over every row of `table`.
pub fn build_inverted_index(
    table: &Table,
    stop_words: &StopWords,
) -> Result<InvertedIndex, SampleError> {
    require_rows(table)?;
    let tokenizer = Tokenizer::for_table(table, stop_words)?;

    let index = InvertedIndex::from_token_sets(
        table.rows().iter().map(|row| tokenizer.tokenize(row)),
        table.len(),
    );

    log::debug!(
        "indexed {} rows of {}: {} tokens, {} postings",
        index.row_count(),
        table.id(),
        index.vocabulary_len(),
        index.total_postings()
    );
    Ok(index)
}

/// Build an inverted index using parallel map-reduce.
///
/// 1. **Map phase**: tokenize rows in parallel (one task per row)
/// 2. **Reduce phase**: append positions in row order
///
/// Worth it for large tables; for a few hundred rows the sequential build is
/// just as fast.
#[cfg(feature = "parallel")]
pub fn build_inverted_index_parallel(
    table: &Table,
    stop_words: &StopWords,
) -> Result<InvertedIndex, SampleError> {
    require_rows(table)?;
    let tokenizer = Tokenizer::for_table(table, stop_words)?;

    // MAP PHASE: collect preserves row order
    let per_row: Vec<TokenSet> = table
        .rows()
        .par_iter()
        .map(|row| tokenizer.tokenize(row))
        .collect();

    // REDUCE PHASE
    let index = InvertedIndex::from_token_sets(per_row, table.len());

    log::debug!(
        "indexed {} rows of {} in parallel: {} tokens, {} postings",
        index.row_count(),
        table.id(),
        index.vocabulary_len(),
        index.total_postings()
    );
    Ok(index)
}
