// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sampler configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// How the index-matched half of a probe's budget is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStrategy {
    /// Uniform draw from the union of matching posting lists.
    ///
    /// How many tokens a candidate shares with the probe row does not
    /// matter once it is a candidate.
    #[default]
    Uniform,
    /// Take the candidates sharing the most tokens with the probe row.
    ///
    /// Ties go to the lower position. Deterministic given the index.
    Ranked,
}

/// Knobs for a down-sampling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub strategy: ProbeStrategy,
    /// Show a progress bar while probing (needs the `parallel` feature).
    pub show_progress: bool,
    /// Tokenize table A with rayon (needs the `parallel` feature).
    pub parallel_index: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            strategy: ProbeStrategy::Uniform,
            show_progress: false,
            parallel_index: cfg!(feature = "parallel"),
        }
    }
}

impl SamplerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_parallel_index(mut self, parallel: bool) -> Self {
        self.parallel_index = parallel;
        self
    }

    /// The RNG a run draws from.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
