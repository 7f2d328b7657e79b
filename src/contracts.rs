// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index and the sampler.
//!
//! These are debug-mode assertions. They:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fail **at the point of violation** instead of as a wrong sample later
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Property                                   |
//! |------------------------------|--------------------------------------------|
//! | `check_index_well_formed`    | postings ascending, in range, non-empty    |
//! | `check_positions_in_range`   | every position `< len`                     |
//! | `check_distinct`             | no position drawn twice                    |
//! | `check_selection`            | probe returns exactly `total_budget` rows  |
//!
//! # Usage
//!
//! ```ignore
//! use downsample::contracts::*;
//!
//! // In debug builds, this panics if the invariant is violated
//! check_positions_in_range(&b_positions, table_b.len());
//! ```

use std::collections::{BTreeSet, HashSet};

use crate::inverted::InvertedIndex;

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Check the structural invariants of a freshly built index.
///
/// # Panics (debug builds only)
/// Panics if a posting list is empty, out of range, or not strictly ascending.
#[inline]
pub fn check_index_well_formed(index: &InvertedIndex) {
    if !cfg!(debug_assertions) {
        return;
    }

    for (token, list) in index.iter() {
        debug_assert!(
            !list.is_empty(),
            "Contract violation: NON_EMPTY - posting list for '{}' is empty",
            token
        );
        for window in list.windows(2) {
            debug_assert!(
                window[0] < window[1],
                "Contract violation: SCAN_ORDER - posting list for '{}' has {} before {}",
                token,
                window[0],
                window[1]
            );
        }
        if let Some(&last) = list.last() {
            debug_assert!(
                last < index.row_count(),
                "Contract violation: IN_RANGE - posting {} for '{}' >= row_count {}",
                last,
                token,
                index.row_count()
            );
        }
    }
}

// ============================================================================
// SAMPLE CONTRACTS
// ============================================================================

/// Check that every position lies in `[0, len)`.
#[inline]
pub fn check_positions_in_range<'a>(positions: impl IntoIterator<Item = &'a usize>, len: usize) {
    if !cfg!(debug_assertions) {
        return;
    }

    for &pos in positions {
        debug_assert!(
            pos < len,
            "Contract violation: position {} out of range for {} rows",
            pos,
            len
        );
    }
}

/// Check that a drawn sequence contains no repeats.
#[inline]
pub fn check_distinct(positions: &[usize]) {
    if !cfg!(debug_assertions) {
        return;
    }

    let unique: HashSet<&usize> = positions.iter().collect();
    debug_assert_eq!(
        unique.len(),
        positions.len(),
        "Contract violation: sample without replacement drew a position twice"
    );
}

/// Check a per-probe selection: exact size, all positions in range.
#[inline]
pub fn check_selection(selection: &BTreeSet<usize>, total_budget: usize, universe_size: usize) {
    debug_assert_eq!(
        selection.len(),
        total_budget,
        "Contract violation: probe selected {} positions, expected {}",
        selection.len(),
        total_budget
    );
    check_positions_in_range(selection, universe_size);
}
