//! Per-probe selection and accumulation properties.

use std::collections::BTreeSet;

use downsample::{
    build_inverted_index, probe_and_select, CoverageAccumulator, CoverageSampler, ProbeStrategy,
    StopWords, TokenSet,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{keyword_table, text_table};

fn tokens(list: &[&str]) -> TokenSet {
    list.iter().map(|s| s.to_string()).collect()
}

/// `hits` rows carrying the token "hit", the rest unique filler.
fn table_with_hits(hits: usize, rows: usize) -> downsample::Table {
    let texts: Vec<String> = (0..rows)
        .map(|i| {
            if i < hits {
                format!("hit r{}", i)
            } else {
                format!("miss r{}", i)
            }
        })
        .collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    text_table(&refs)
}

fn position_set() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0usize..200, 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Exactly `y` distinct in-range positions, for any budget the table allows.
    #[test]
    fn prop_selection_exact_size(
        rows in 1usize..120,
        modulus in 1usize..15,
        y_frac in 0.0f64..=1.0,
        key in 0usize..20,
        seed in any::<u64>(),
    ) {
        let table = keyword_table(rows, modulus);
        let index = build_inverted_index(&table, StopWords::bundled()).unwrap();
        let y = ((rows as f64 * y_frac) as usize).max(1);
        let mut rng = StdRng::seed_from_u64(seed);

        let probe_tokens = tokens(&[format!("kw{}", key % modulus).as_str()]);
        let selection = probe_and_select(&probe_tokens, &index, y / 2, y, rows, &mut rng).unwrap();

        prop_assert_eq!(selection.len(), y);
        prop_assert!(selection.iter().all(|&p| p < rows));
    }

    /// A token set with no postings reduces the probe to a pure uniform fill.
    #[test]
    fn prop_no_match_is_pure_fill(
        rows in 1usize..100,
        y_frac in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let table = keyword_table(rows, 4);
        let index = build_inverted_index(&table, StopWords::bundled()).unwrap();
        let y = ((rows as f64 * y_frac) as usize).max(1);
        let sampler = CoverageSampler::new(&index, y, ProbeStrategy::Uniform).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        let probe = sampler.probe(&tokens(&["absent", "nowhere"]), &mut rng);
        prop_assert_eq!(probe.candidates, 0);
        prop_assert_eq!(probe.matched, 0);
        prop_assert_eq!(probe.selection.len(), y);

        let empty = sampler.probe(&TokenSet::new(), &mut rng);
        prop_assert_eq!(empty.matched, 0);
        prop_assert_eq!(empty.selection.len(), y);
    }

    /// With fewer than `y / 2` candidates, all of them are kept and the fill
    /// supplies the remaining `y - M` rows.
    #[test]
    fn prop_small_pool_kept_whole(
        hits in 0usize..10,
        extra in 0usize..40,
        y_extra in 1usize..10,
        seed in any::<u64>(),
    ) {
        let y = 2 * hits + 2 * y_extra;
        let rows = y + extra;
        let table = table_with_hits(hits, rows);
        let index = build_inverted_index(&table, StopWords::bundled()).unwrap();

        for strategy in [ProbeStrategy::Uniform, ProbeStrategy::Ranked] {
            let sampler = CoverageSampler::new(&index, y, strategy).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let probe = sampler.probe(&tokens(&["hit"]), &mut rng);

            prop_assert_eq!(probe.candidates, hits);
            prop_assert_eq!(probe.matched, hits);
            prop_assert!((0..hits).all(|p| probe.selection.contains(&p)));
            prop_assert_eq!(probe.selection.len(), y);
        }
    }

    /// Absorbing a selection twice changes nothing; order of absorption does not matter.
    #[test]
    fn prop_accumulator_idempotent_and_commutative(a in position_set(), b in position_set()) {
        let mut once = CoverageAccumulator::new();
        once.absorb(&a);
        let mut twice = once.clone();
        twice.absorb(&a);
        prop_assert_eq!(&once, &twice);

        let mut ab = CoverageAccumulator::new();
        ab.absorb(&a);
        ab.absorb(&b);
        let mut ba = CoverageAccumulator::new();
        ba.absorb(&b);
        ba.absorb(&a);
        prop_assert_eq!(&ab, &ba);

        let union: BTreeSet<usize> = a.union(&b).copied().collect();
        prop_assert_eq!(ab.len(), union.len());
        prop_assert_eq!(ab.into_positions(), union.into_iter().collect::<Vec<_>>());
    }

    /// Budgets the table cannot satisfy are rejected, never looped on.
    #[test]
    fn prop_oversized_budget_rejected(
        rows in 1usize..50,
        over in 1usize..10,
        seed in any::<u64>(),
    ) {
        let table = keyword_table(rows, 3);
        let index = build_inverted_index(&table, StopWords::bundled()).unwrap();
        let y = rows + over;
        let mut rng = StdRng::seed_from_u64(seed);

        let probe = tokens(&["kw0"]);
        prop_assert!(probe_and_select(&probe, &index, y / 2, y, rows, &mut rng).is_err());
        prop_assert!(probe_and_select(&probe, &index, y + 1, y, rows + over, &mut rng).is_err());
        prop_assert!(CoverageSampler::new(&index, y, ProbeStrategy::Uniform).is_err());
    }
}
