//! Coverage of the sampled pair: probed rows of B keep their likely matches in A'.

use std::collections::HashSet;

use downsample::catalog::MemoryCatalog;
use downsample::{DownSampler, ProbeStrategy, SamplerConfig};

use crate::common::{
    assert_ascending_in_range, assert_distinct_in_range, assert_rows_taken_from, keyword_of,
    keyword_table, numeric_table, people,
};

fn sampler(seed: u64) -> DownSampler<'static> {
    DownSampler::new(SamplerConfig::default().with_seed(seed))
}

#[test]
fn test_every_probe_keeps_matches_for_its_keyword() {
    let a = keyword_table(100, 10);
    let b = keyword_table(50, 10);
    let catalog = MemoryCatalog::new();

    for seed in 0..20 {
        let result = sampler(seed).down_sample(&a, &b, 10, 4, &catalog).unwrap();

        assert_eq!(result.table_b.len(), 10);
        assert!(result.table_a.len() >= 4 && result.table_a.len() <= 40);
        assert_distinct_in_range(&result.b_positions, b.len());
        assert_ascending_in_range(&result.a_positions, a.len());
        assert_rows_taken_from(&result.table_a, &a, &result.a_positions);
        assert_rows_taken_from(&result.table_b, &b, &result.b_positions);

        let a_keywords: Vec<String> = result
            .a_positions
            .iter()
            .map(|&pos| keyword_of(&a, pos))
            .collect();
        for &pos in &result.b_positions {
            let keyword = keyword_of(&b, pos);
            let sharing = a_keywords.iter().filter(|k| **k == keyword).count();
            assert!(
                sharing >= 2,
                "seed {}: probe {} ({}) has only {} matching rows in A'",
                seed,
                pos,
                keyword,
                sharing
            );
        }
    }
}

#[test]
fn test_stats_split_between_matches_and_fill() {
    let a = keyword_table(100, 10);
    let b = keyword_table(50, 10);
    let result = sampler(3)
        .down_sample(&a, &b, 10, 4, &MemoryCatalog::new())
        .unwrap();

    let stats = &result.stats;
    assert_eq!(stats.probes, 10);
    assert_eq!(stats.matched, 20);
    assert_eq!(stats.filled, 20);
    assert_eq!(stats.empty_probes, 0);
    assert!(!stats.used_all_of_b);
    // 10 keywords plus one `row{i}` token per row of A
    assert_eq!(stats.index_tokens, 110);
}

#[test]
fn test_ranked_keeps_the_twin_row() {
    let a = keyword_table(100, 10);
    let b = keyword_table(50, 10);
    let result = DownSampler::new(
        SamplerConfig::default()
            .with_seed(11)
            .with_strategy(ProbeStrategy::Ranked),
    )
    .down_sample(&a, &b, 10, 4, &MemoryCatalog::new())
    .unwrap();

    // B row j shares both `kw{j % 10}` and `row{j}` with A row j only.
    let kept: HashSet<usize> = result.a_positions.iter().copied().collect();
    for &pos in &result.b_positions {
        assert!(kept.contains(&pos), "twin of B row {} missing from A'", pos);
    }
}

#[test]
fn test_people_tables_keep_namesakes() {
    let a = people(&[
        ("Ada Lovelace", "London"),
        ("Grace Hopper", "Arlington"),
        ("Alan Turing", "Manchester"),
        ("Edsger Dijkstra", "Austin"),
        ("Barbara Liskov", "Boston"),
        ("Donald Knuth", "Stanford"),
        ("John McCarthy", "Stanford"),
        ("Frances Allen", "Yorktown"),
    ]);
    let b = people(&[("lovelace, ada", "LONDON")]);

    let result = sampler(5)
        .down_sample(&a, &b, 1, 2, &MemoryCatalog::new())
        .unwrap();

    // Ada's row is the only candidate and the match budget is one.
    assert_eq!(result.stats.candidates, 1);
    assert!(result.a_positions.contains(&0));
    assert_eq!(result.table_a.len(), 2);
}

#[test]
fn test_numeric_probe_side_is_pure_fill() {
    let a = keyword_table(30, 3);
    let b = numeric_table(12);
    let result = sampler(9)
        .down_sample(&a, &b, 6, 5, &MemoryCatalog::new())
        .unwrap();

    assert_eq!(result.stats.matched, 0);
    assert_eq!(result.stats.filled, 30);
    assert_eq!(result.stats.empty_probes, 6);
    assert!(result.table_a.len() >= 5);
}

#[test]
fn test_same_seed_same_sample() {
    let a = keyword_table(200, 17);
    let b = keyword_table(80, 13);
    let catalog = MemoryCatalog::new();

    let first = sampler(42).down_sample(&a, &b, 15, 6, &catalog).unwrap();
    let second = sampler(42).down_sample(&a, &b, 15, 6, &catalog).unwrap();

    assert_eq!(first.a_positions, second.a_positions);
    assert_eq!(first.b_positions, second.b_positions);
    assert_eq!(first.stats, second.stats);
    assert_ne!(first.table_a.id(), second.table_a.id());
}
