// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use downsample::catalog::{set_key, Catalog, MemoryCatalog};
use downsample::io::{read_table, write_table};
use downsample::{
    build_inverted_index, textual_columns, DownSampler, ProbeStrategy, SampleResult,
    SamplerConfig, StopWords, Table,
};

mod cli;
use cli::display::{
    format_count, section_bot, section_mid, section_top, share_colored, stat, themed, title,
    truncate, CYAN, GRAY, GREEN, YELLOW,
};
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Sample {
            table_a,
            table_b,
            size,
            y,
            out_a,
            out_b,
            seed,
            strategy,
            stop_words,
            key_a,
            key_b,
            progress,
        } => run_sample(SampleArgs {
            table_a: &table_a,
            table_b: &table_b,
            size,
            y,
            out_a: &out_a,
            out_b: &out_b,
            seed,
            strategy,
            stop_words: stop_words.as_deref(),
            key_a: key_a.as_deref(),
            key_b: key_b.as_deref(),
            progress,
        }),
        Commands::Inspect {
            file,
            top,
            stop_words,
        } => run_inspect(&file, top, stop_words.as_deref()),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Warnings by default; each `-v` raises the level. `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

struct SampleArgs<'p> {
    table_a: &'p Path,
    table_b: &'p Path,
    size: usize,
    y: usize,
    out_a: &'p Path,
    out_b: &'p Path,
    seed: Option<u64>,
    strategy: ProbeStrategy,
    stop_words: Option<&'p Path>,
    key_a: Option<&'p str>,
    key_b: Option<&'p str>,
    progress: bool,
}

fn load_stop_words(path: Option<&Path>) -> Result<StopWords> {
    match path {
        Some(path) => StopWords::from_file(path)
            .with_context(|| format!("Failed to load stop words from {}", path.display())),
        None => Ok(StopWords::bundled().clone()),
    }
}

fn load_table(path: &Path) -> Result<Table> {
    read_table(path).with_context(|| format!("Failed to read table {}", path.display()))
}

fn register_key(catalog: &MemoryCatalog, table: &Table, column: &str, side: &str) -> Result<()> {
    let accepted = set_key(catalog, table, column)
        .with_context(|| format!("Cannot set key of table {}", side))?;
    if !accepted {
        bail!(
            "column `{}` of table {} has nulls or duplicates and cannot be its key",
            column,
            side
        );
    }
    Ok(())
}

fn run_sample(args: SampleArgs<'_>) -> Result<()> {
    let table_a = load_table(args.table_a)?;
    let table_b = load_table(args.table_b)?;
    log::info!(
        "loaded A ({} rows) from {} and B ({} rows) from {}",
        table_a.len(),
        args.table_a.display(),
        table_b.len(),
        args.table_b.display()
    );

    let catalog = MemoryCatalog::new();
    if let Some(column) = args.key_a {
        register_key(&catalog, &table_a, column, "A")?;
    }
    if let Some(column) = args.key_b {
        register_key(&catalog, &table_b, column, "B")?;
    }

    let stop_words = load_stop_words(args.stop_words)?;

    let mut config = SamplerConfig::default()
        .with_strategy(args.strategy)
        .with_progress(args.progress);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let result = DownSampler::new(config)
        .with_stop_words(&stop_words)
        .down_sample(&table_a, &table_b, args.size, args.y, &catalog)
        .context("Down-sampling failed")?;

    write_table(&result.table_a, args.out_a)
        .with_context(|| format!("Failed to write {}", args.out_a.display()))?;
    write_table(&result.table_b, args.out_b)
        .with_context(|| format!("Failed to write {}", args.out_b.display()))?;

    print_sample_summary(&args, &table_a, &table_b, &result, &catalog);
    Ok(())
}

fn print_sample_summary(
    args: &SampleArgs<'_>,
    table_a: &Table,
    table_b: &Table,
    result: &SampleResult,
    catalog: &MemoryCatalog,
) {
    let stats = &result.stats;
    let strategy = match args.strategy {
        ProbeStrategy::Uniform => "uniform",
        ProbeStrategy::Ranked => "ranked",
    };

    title("DOWN-SAMPLE");
    section_top("TABLES");
    stat(
        "A  → A'",
        &format!(
            "{} → {}  ({})",
            format_count(table_a.len()),
            themed(GREEN, &[], &format_count(result.table_a.len())),
            share_colored(result.table_a.len(), table_a.len())
        ),
    );
    stat(
        "B  → B'",
        &format!(
            "{} → {}  ({})",
            format_count(table_b.len()),
            themed(GREEN, &[], &format_count(result.table_b.len())),
            share_colored(result.table_b.len(), table_b.len())
        ),
    );
    if stats.used_all_of_b {
        stat("", &themed(YELLOW, &[], "size exceeded |B|; all of B used"));
    }

    section_mid("PROBES");
    stat("probes", &format_count(stats.probes));
    stat("y per probe", &format!("{} ({})", args.y, strategy));
    stat("index tokens", &format_count(stats.index_tokens));
    stat("candidates", &format_count(stats.candidates));
    let drawn = stats.matched + stats.filled;
    stat(
        "matched",
        &format!("{}  ({})", format_count(stats.matched), share_colored(stats.matched, drawn)),
    );
    stat("filled", &format_count(stats.filled));
    stat("empty probes", &format_count(stats.empty_probes));

    section_mid("OUTPUT");
    stat("A'", &themed(CYAN, &[], &args.out_a.display().to_string()));
    stat("B'", &themed(CYAN, &[], &args.out_b.display().to_string()));
    for (label, table) in [("A' props", &result.table_a), ("B' props", &result.table_b)] {
        let props = catalog.get_all_properties(table.id()).unwrap_or_default();
        let rendered = if props.is_empty() {
            themed(GRAY, &[], "none")
        } else {
            props
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join(", ")
        };
        stat(label, &rendered);
    }
    section_bot();
}

fn run_inspect(path: &Path, top: usize, stop_words: Option<&Path>) -> Result<()> {
    let table = load_table(path)?;
    let stop_words = load_stop_words(stop_words)?;

    let textual = textual_columns(&table).context("Cannot inspect an empty table")?;
    let index = build_inverted_index(&table, &stop_words).context("Failed to build index")?;

    title(&truncate(&path.display().to_string(), 60));
    section_top("TABLE");
    stat("rows", &format_count(table.len()));
    stat("columns", &format_count(table.columns().len()));
    let names = textual
        .iter()
        .map(|&c| table.columns()[c].name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    stat(
        "textual",
        &if names.is_empty() {
            themed(GRAY, &[], "none")
        } else {
            truncate(&names, 48)
        },
    );

    section_mid("INDEX");
    stat("stop words", &format_count(stop_words.len()));
    stat("vocabulary", &format_count(index.vocabulary_len()));
    stat("postings", &format_count(index.total_postings()));

    if top > 0 && index.vocabulary_len() > 0 {
        section_mid("LARGEST POSTINGS");
        for (token, postings) in index.largest(top) {
            stat(
                &themed(CYAN, &[], &truncate(token, 40)),
                &format!(
                    "{}  ({})",
                    format_count(postings.len()),
                    share_colored(postings.len(), table.len())
                ),
            );
        }
    }
    section_bot();
    Ok(())
}
