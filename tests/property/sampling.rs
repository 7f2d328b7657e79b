//! Whole-run properties of `DownSampler`.

use downsample::catalog::{Catalog, MemoryCatalog, PropertyValue};
use downsample::{DownSampler, ProbeStrategy, SamplerConfig};
use proptest::prelude::*;

use crate::common::{assert_ascending_in_range, assert_distinct_in_range, keyword_table};

fn strategy_strategy() -> impl Strategy<Value = ProbeStrategy> {
    prop_oneof![Just(ProbeStrategy::Uniform), Just(ProbeStrategy::Ranked)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// |B'| = min(size, |B|) and y <= |A'| <= min(|A|, |B'| * y).
    #[test]
    fn prop_sample_sizes(
        a_rows in 1usize..150,
        b_rows in 1usize..60,
        modulus in 1usize..12,
        size in 1usize..80,
        y_frac in 0.0f64..=1.0,
        seed in any::<u64>(),
        strategy in strategy_strategy(),
    ) {
        let a = keyword_table(a_rows, modulus);
        let b = keyword_table(b_rows, modulus);
        let y = ((a_rows as f64 * y_frac) as usize).clamp(1, a_rows);
        let sampler = DownSampler::new(
            SamplerConfig::default().with_seed(seed).with_strategy(strategy),
        );

        let result = sampler.down_sample(&a, &b, size, y, &MemoryCatalog::new()).unwrap();

        let probes = size.min(b_rows);
        prop_assert_eq!(result.table_b.len(), probes);
        prop_assert_eq!(result.stats.used_all_of_b, size > b_rows);
        prop_assert!(result.table_a.len() >= y);
        prop_assert!(result.table_a.len() <= a_rows.min(probes * y));
        prop_assert_eq!(result.stats.matched + result.stats.filled, probes * y);

        assert_distinct_in_range(&result.b_positions, b_rows);
        assert_ascending_in_range(&result.a_positions, a_rows);
    }

    /// The same seed gives the same sample; properties are copied every time.
    #[test]
    fn prop_seeded_runs_agree(seed in any::<u64>(), size in 1usize..30, y in 1usize..10) {
        let a = keyword_table(60, 7);
        let b = keyword_table(30, 5);
        let catalog = MemoryCatalog::new();
        catalog.set_property(a.id(), "key", PropertyValue::from("id"));
        let sampler = DownSampler::new(SamplerConfig::default().with_seed(seed));

        let first = sampler.down_sample(&a, &b, size, y, &catalog).unwrap();
        let second = sampler.down_sample(&a, &b, size, y, &catalog).unwrap();

        prop_assert_eq!(&first.a_positions, &second.a_positions);
        prop_assert_eq!(&first.b_positions, &second.b_positions);
        for sample in [&first.table_a, &second.table_a] {
            prop_assert_eq!(
                catalog.get_property(sample.id(), "key").unwrap(),
                PropertyValue::from("id")
            );
        }
    }
}
