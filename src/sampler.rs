// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Coverage-aware probing.
//!
//! For every probe row drawn from table B we pick `total_budget` distinct rows
//! of table A in two steps:
//!
//! 1. **Match half**: up to `match_budget` rows from the union of the posting
//!    lists of the probe's tokens. These are the rows most likely to be true
//!    matches of the probe.
//! 2. **Random fill**: uniform draws from the rest of A until the selection
//!    holds exactly `total_budget` rows. These keep A' representative of A
//!    rather than only of B's lexical neighbours.
//!
//! Each probe's selection is unioned into a [`CoverageAccumulator`]. Overlaps
//! between probes collapse, so |A'| can be well below `size * y`.
//!
//! All draws are without replacement and guaranteed to terminate: the match
//! half never asks for more than the pool holds, and the fill switches from
//! rejection to an explicit complement draw when the universe is tight.
//!
//! # RNG consumption order
//!
//! Per probe: the match-half draw (skipped for `Ranked`), then the fill.

use std::collections::BTreeSet;

use rand::seq::index::sample as sample_indices;
use rand::Rng;

use crate::config::ProbeStrategy;
use crate::contracts::{check_positions_in_range, check_selection};
use crate::error::SampleError;
use crate::inverted::InvertedIndex;
use crate::tokenizer::TokenSet;

/// Rejection sampling is used for the fill while the universe holds at least
/// this many times the budget. Below that the complement is materialized.
const REJECTION_FACTOR: usize = 2;

/// Per-probe selection with the numbers needed for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Exactly `total_budget` distinct positions of table A.
    pub selection: BTreeSet<usize>,
    /// Size of the candidate pool (union of matching postings).
    pub candidates: usize,
    /// How many of `selection` came from the candidate pool.
    pub matched: usize,
}

/// Probes one token set against the index of table A.
#[derive(Debug, Clone, Copy)]
pub struct CoverageSampler<'a> {
    index: &'a InvertedIndex,
    match_budget: usize,
    total_budget: usize,
    strategy: ProbeStrategy,
}

impl<'a> CoverageSampler<'a> {
    /// Budget `total_budget` rows per probe, half of them (rounded down)
    /// reserved for index matches.
    ///
    /// Fails if the indexed table has fewer rows than `total_budget`: the
    /// fill could never complete.
    pub fn new(
        index: &'a InvertedIndex,
        total_budget: usize,
        strategy: ProbeStrategy,
    ) -> Result<Self, SampleError> {
        validate_budgets(total_budget / 2, total_budget, index.row_count(), index)?;
        Ok(Self {
            index,
            match_budget: total_budget / 2,
            total_budget,
            strategy,
        })
    }

    /// Select `total_budget` positions of table A for one probe row.
    pub fn probe<R: Rng + ?Sized>(&self, tokens: &TokenSet, rng: &mut R) -> Probe {
        let universe = self.index.row_count();
        let (mut selection, candidates) =
            select_matches(tokens, self.index, self.match_budget, self.strategy, rng);
        let matched = selection.len();

        fill_uniform(&mut selection, self.total_budget, universe, rng);
        check_selection(&selection, self.total_budget, universe);

        log::trace!(
            "probe: {} tokens, {} candidates, {} matched, {} filled",
            tokens.len(),
            candidates,
            matched,
            self.total_budget - matched
        );

        Probe {
            selection,
            candidates,
            matched,
        }
    }
}

/// Select `total_budget` distinct positions in `[0, universe_size)` for one
/// probe: up to `match_budget` from the index candidates of `tokens`, the
/// rest uniformly at random.
///
/// # Preconditions (checked)
/// - `match_budget <= total_budget`
/// - `universe_size == index.row_count()`
/// - `universe_size >= total_budget`
pub fn probe_and_select<R: Rng + ?Sized>(
    tokens: &TokenSet,
    index: &InvertedIndex,
    match_budget: usize,
    total_budget: usize,
    universe_size: usize,
    rng: &mut R,
) -> Result<BTreeSet<usize>, SampleError> {
    validate_budgets(match_budget, total_budget, universe_size, index)?;

    let (mut selection, _) =
        select_matches(tokens, index, match_budget, ProbeStrategy::Uniform, rng);
    check_positions_in_range(&selection, universe_size);

    fill_uniform(&mut selection, total_budget, universe_size, rng);
    check_selection(&selection, total_budget, universe_size);
    Ok(selection)
}

fn validate_budgets(
    match_budget: usize,
    total_budget: usize,
    universe_size: usize,
    index: &InvertedIndex,
) -> Result<(), SampleError> {
    if match_budget > total_budget {
        return Err(SampleError::invalid(
            "match_budget",
            format!(
                "match budget {} exceeds total budget {}",
                match_budget, total_budget
            ),
        ));
    }
    // Postings and fill draws are both positions of the indexed table.
    if universe_size != index.row_count() {
        return Err(SampleError::invalid(
            "universe_size",
            format!(
                "universe of {} rows does not match the {} rows of the indexed table",
                universe_size,
                index.row_count()
            ),
        ));
    }
    if universe_size < total_budget {
        return Err(SampleError::invalid(
            "y_param",
            format!(
                "cannot select {} distinct rows per probe from a table of {} rows",
                total_budget, universe_size
            ),
        ));
    }
    Ok(())
}

/// Choose `min(match_budget, |candidates|)` candidates.
///
/// Returns the chosen positions and the pool size.
fn select_matches<R: Rng + ?Sized>(
    tokens: &TokenSet,
    index: &InvertedIndex,
    match_budget: usize,
    strategy: ProbeStrategy,
    rng: &mut R,
) -> (BTreeSet<usize>, usize) {
    match strategy {
        ProbeStrategy::Uniform => {
            let pool: Vec<usize> = index.candidates(tokens).into_iter().collect();
            let k = match_budget.min(pool.len());
            if k == 0 {
                return (BTreeSet::new(), pool.len());
            }
            let chosen = sample_indices(rng, pool.len(), k)
                .into_iter()
                .map(|i| pool[i])
                .collect();
            (chosen, pool.len())
        }
        ProbeStrategy::Ranked => {
            let mut scored: Vec<(usize, usize)> =
                index.overlap_counts(tokens).into_iter().collect();
            let pool_len = scored.len();
            // Most shared tokens first, lower position breaks ties.
            scored.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            let chosen = scored
                .into_iter()
                .take(match_budget)
                .map(|(pos, _)| pos)
                .collect();
            (chosen, pool_len)
        }
    }
}

/// Grow `selection` with uniform draws from `[0, universe_size)` until
/// it holds `total_budget` distinct positions.
///
/// Requires `universe_size >= total_budget` and `selection` within range.
fn fill_uniform<R: Rng + ?Sized>(
    selection: &mut BTreeSet<usize>,
    total_budget: usize,
    universe_size: usize,
    rng: &mut R,
) {
    if selection.len() >= total_budget {
        return;
    }

    if universe_size >= total_budget.saturating_mul(REJECTION_FACTOR) {
        // At least half the universe is always free, so each draw succeeds
        // with probability >= 1/2.
        while selection.len() < total_budget {
            selection.insert(rng.random_range(0..universe_size));
        }
        return;
    }

    let free: Vec<usize> = (0..universe_size)
        .filter(|pos| !selection.contains(pos))
        .collect();
    let need = total_budget - selection.len();
    for i in sample_indices(rng, free.len(), need) {
        selection.insert(free[i]);
    }
}

/// The growing set of table-A positions selected across all probes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageAccumulator {
    positions: BTreeSet<usize>,
}

impl CoverageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union a probe's selection in. Already-present positions are a no-op.
    pub fn absorb(&mut self, selection: &BTreeSet<usize>) {
        self.positions.extend(selection.iter().copied());
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    /// Positions in ascending order, ready for `Table::take`.
    pub fn into_positions(self) -> Vec<usize> {
        self.positions.into_iter().collect()
    }
}
