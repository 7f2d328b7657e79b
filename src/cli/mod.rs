// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the downsample command-line interface.
//!
//! Two subcommands: `sample` to down-sample a pair of JSON tables, and
//! `inspect` to look at the token index a table would produce.

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use downsample::ProbeStrategy;

#[derive(Parser)]
#[command(
    name = "downsample",
    about = "Coverage-aware down-sampling of table pairs for entity matching",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Down-sample tables A and B
    Sample {
        /// Table A (indexed side) as JSON
        #[arg(long, short = 'a')]
        table_a: PathBuf,

        /// Table B (probed side) as JSON
        #[arg(long, short = 'b')]
        table_b: PathBuf,

        /// Number of rows to sample from B
        #[arg(long, short = 'n')]
        size: usize,

        /// Rows of A selected per sampled row of B (half from index matches)
        #[arg(long, short = 'y')]
        y: usize,

        /// Where to write A'
        #[arg(long)]
        out_a: PathBuf,

        /// Where to write B'
        #[arg(long)]
        out_b: PathBuf,

        /// RNG seed for reproducible samples
        #[arg(long)]
        seed: Option<u64>,

        /// How index matches are chosen for each probe
        #[arg(long, value_enum, default_value_t = ProbeStrategy::Uniform)]
        strategy: ProbeStrategy,

        /// Newline-delimited stop-word list (defaults to the bundled list)
        #[arg(long)]
        stop_words: Option<PathBuf>,

        /// Key column of A, recorded in the catalog and carried to A'
        #[arg(long)]
        key_a: Option<String>,

        /// Key column of B, recorded in the catalog and carried to B'
        #[arg(long)]
        key_b: Option<String>,

        /// Show a progress bar while probing
        #[arg(long)]
        progress: bool,
    },

    /// Show the token index built over a table
    Inspect {
        /// Table as JSON
        file: PathBuf,

        /// Number of largest posting lists to show
        #[arg(long, default_value = "10")]
        top: usize,

        /// Newline-delimited stop-word list (defaults to the bundled list)
        #[arg(long)]
        stop_words: Option<PathBuf>,
    },
}
