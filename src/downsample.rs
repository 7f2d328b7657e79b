// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Down-sampling of a table pair.
//!
//! Given tables A and B, produce A' ⊆ A and B' ⊆ B small enough for
//! interactive work that still share many likely matches:
//!
//! ```text
//!   table A ──▶ build_inverted_index ──▶ InvertedIndex ─┐
//!                                                       ▼
//!   table B ──▶ uniform draw of `size` rows ──▶ tokenize ──▶ probe ──▶ accumulator
//!                      │                                                  │
//!                      ▼                                                  ▼
//!                      B'                                                 A'
//! ```
//!
//! Every probe row contributes `y` rows of A: half (rounded down) from its
//! lexical neighbours in the index, the rest uniformly at random. Finally the
//! catalog properties of A and B are copied onto A' and B'.
//!
//! A run either returns both samples with their metadata copied, or fails
//! before touching the catalog.
//!
//! # RNG consumption order
//!
//! 1. B' positions (skipped when `size > len(B)`: all of B is used, in order)
//! 2. For each B' row, in draw order: the probe's match draw, then its fill

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::index::sample as sample_indices;
use rand::Rng;

use crate::catalog::Catalog;
use crate::config::SamplerConfig;
use crate::contracts::{check_distinct, check_positions_in_range};
use crate::error::SampleError;
use crate::inverted::{build_inverted_index, InvertedIndex};
use crate::sampler::{CoverageAccumulator, CoverageSampler};
use crate::stop_words::StopWords;
use crate::tokenizer::Tokenizer;
use crate::types::Table;

/// Counters describing one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Number of probe rows (= |B'|).
    pub probes: usize,
    /// Distinct tokens in the index over A.
    pub index_tokens: usize,
    /// Sum of candidate-pool sizes over all probes.
    pub candidates: usize,
    /// Rows contributed by index matches, summed over probes.
    pub matched: usize,
    /// Rows contributed by the random fill, summed over probes.
    pub filled: usize,
    /// Probes whose tokens matched nothing in the index.
    pub empty_probes: usize,
    /// Whether `size` exceeded |B| and all of B was used.
    pub used_all_of_b: bool,
}

/// Output of a run.
#[derive(Debug)]
pub struct SampleResult {
    /// A': rows of A at `a_positions`.
    pub table_a: Table,
    /// B': rows of B at `b_positions`.
    pub table_b: Table,
    /// Positions in A, ascending.
    pub a_positions: Vec<usize>,
    /// Positions in B, in draw order.
    pub b_positions: Vec<usize>,
    pub stats: SampleStats,
}

impl SampleResult {
    pub fn into_tables(self) -> (Table, Table) {
        (self.table_a, self.table_b)
    }
}

/// Runs down-sampling with a fixed configuration and stop-word list.
#[derive(Debug, Clone)]
pub struct DownSampler<'a> {
    config: SamplerConfig,
    stop_words: &'a StopWords,
}

impl Default for DownSampler<'static> {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

impl DownSampler<'static> {
    /// A sampler using the bundled stop-word list.
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            stop_words: StopWords::bundled(),
        }
    }
}

impl<'a> DownSampler<'a> {
    pub fn with_stop_words<'b>(self, stop_words: &'b StopWords) -> DownSampler<'b> {
        DownSampler {
            config: self.config,
            stop_words,
        }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Down-sample with an RNG built from the configuration.
    pub fn down_sample<C: Catalog + ?Sized>(
        &self,
        table_a: &Table,
        table_b: &Table,
        size: usize,
        y_param: usize,
        catalog: &C,
    ) -> Result<SampleResult, SampleError> {
        let mut rng = self.config.rng();
        self.down_sample_with_rng(table_a, table_b, size, y_param, catalog, &mut rng)
    }

    /// Down-sample drawing from `rng`.
    pub fn down_sample_with_rng<C, R>(
        &self,
        table_a: &Table,
        table_b: &Table,
        size: usize,
        y_param: usize,
        catalog: &C,
        rng: &mut R,
    ) -> Result<SampleResult, SampleError>
    where
        C: Catalog + ?Sized,
        R: Rng + ?Sized,
    {
        validate(table_a, table_b, size, y_param)?;

        let used_all_of_b = size > table_b.len();
        if used_all_of_b {
            log::warn!(
                "sample size {} exceeds the {} rows of table B; using entire table B",
                size,
                table_b.len()
            );
        }

        let index = self.build_index(table_a)?;
        let sampler = CoverageSampler::new(&index, y_param, self.config.strategy)?;
        let tokenizer = Tokenizer::for_table(table_b, self.stop_words)?;

        let b_positions: Vec<usize> = if used_all_of_b {
            (0..table_b.len()).collect()
        } else {
            sample_indices(rng, table_b.len(), size).into_vec()
        };
        check_distinct(&b_positions);
        check_positions_in_range(&b_positions, table_b.len());

        let mut stats = SampleStats {
            probes: b_positions.len(),
            index_tokens: index.vocabulary_len(),
            used_all_of_b,
            ..SampleStats::default()
        };

        #[cfg(feature = "parallel")]
        let progress = self.progress_bar(b_positions.len());
        #[cfg(not(feature = "parallel"))]
        if self.config.show_progress {
            log::warn!("progress bars need the `parallel` feature; ignoring show_progress");
        }

        let mut accumulator = CoverageAccumulator::new();
        for &pos in &b_positions {
            let tokens = tokenizer.tokenize(&table_b.rows()[pos]);
            let probe = sampler.probe(&tokens, rng);

            stats.candidates += probe.candidates;
            stats.matched += probe.matched;
            stats.filled += probe.selection.len() - probe.matched;
            if probe.candidates == 0 {
                stats.empty_probes += 1;
            }
            accumulator.absorb(&probe.selection);

            #[cfg(feature = "parallel")]
            progress.inc(1);
        }

        #[cfg(feature = "parallel")]
        progress.finish_and_clear();

        let a_positions = accumulator.into_positions();
        check_positions_in_range(&a_positions, table_a.len());

        let sampled_a = table_a.take(&a_positions)?;
        let sampled_b = table_b.take(&b_positions)?;

        catalog.copy_properties(table_a.id(), sampled_a.id(), true);
        catalog.copy_properties(table_b.id(), sampled_b.id(), true);

        log::debug!(
            "down-sampled {} x {} rows to {} x {} ({} matched, {} filled, {} empty probes)",
            table_a.len(),
            table_b.len(),
            sampled_a.len(),
            sampled_b.len(),
            stats.matched,
            stats.filled,
            stats.empty_probes
        );

        Ok(SampleResult {
            table_a: sampled_a,
            table_b: sampled_b,
            a_positions,
            b_positions,
            stats,
        })
    }

    fn build_index(&self, table_a: &Table) -> Result<InvertedIndex, SampleError> {
        #[cfg(feature = "parallel")]
        if self.config.parallel_index {
            return crate::inverted::build_inverted_index_parallel(table_a, self.stop_words);
        }
        build_inverted_index(table_a, self.stop_words)
    }

    #[cfg(feature = "parallel")]
    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
        )
        .map(|style| style.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());

        let bar = ProgressBar::new(len as u64);
        bar.set_style(style);
        bar.set_prefix("Probing");
        bar.set_message("rows of B...");
        bar
    }
}

/// Check every precondition before any work is done.
fn validate(
    table_a: &Table,
    table_b: &Table,
    size: usize,
    y_param: usize,
) -> Result<(), SampleError> {
    if table_a.is_empty() {
        return Err(SampleError::EmptyTable { argument: "table_a" });
    }
    if table_b.is_empty() {
        return Err(SampleError::EmptyTable { argument: "table_b" });
    }
    if size == 0 {
        return Err(SampleError::invalid("size", "must be greater than zero"));
    }
    if y_param == 0 {
        return Err(SampleError::invalid("y_param", "must be greater than zero"));
    }
    if table_a.len() < y_param {
        return Err(SampleError::invalid(
            "y_param",
            format!(
                "{} exceeds the {} rows of table A; each probe needs that many distinct rows",
                y_param,
                table_a.len()
            ),
        ));
    }
    Ok(())
}

/// Down-sample with the default configuration and bundled stop words.
///
/// Returns `(A', B')`.
pub fn down_sample<C: Catalog + ?Sized>(
    table_a: &Table,
    table_b: &Table,
    size: usize,
    y_param: usize,
    catalog: &C,
) -> Result<(Table, Table), SampleError> {
    DownSampler::default()
        .down_sample(table_a, table_b, size, y_param, catalog)
        .map(SampleResult::into_tables)
}
