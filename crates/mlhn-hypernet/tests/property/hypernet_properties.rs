use mlhn_core::{CorrelationType, ProcessedRecord, ReplacementPolicy};
use mlhn_hypernet::edge::{HyperEdge, ValueType};
use mlhn_hypernet::fitness::LabelImbalance;
use mlhn_hypernet::pipeline::phase1_initialization::initialize;
use mlhn_hypernet::pipeline::phase2_refinement::{refine, RefinementSettings};
use mlhn_hypernet::pipeline::phase4_weight_training::{train, WeightTrainingSettings};
use mlhn_hypernet::pipeline::MatchIndex;
use mlhn_hypernet::sampler_for;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_fixtures::noisy_processed_records;

fn arb_correlation() -> impl Strategy<Value = CorrelationType> {
    prop_oneof![
        Just(CorrelationType::Global),
        Just(CorrelationType::Local),
        Just(CorrelationType::GlobalLocal),
    ]
}

// ── Matching predicate ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn threshold_match_iff_within_tolerance(
        stored in 0.0f64..1.0,
        value in 0.0f64..1.0,
        tolerance in 0.0f64..0.5,
    ) {
        let edge = HyperEdge::new(
            vec![1],
            vec![ValueType::Threshold],
            vec![stored],
            0,
            vec![true],
        ).unwrap();
        let record = ProcessedRecord::new(&[true], &[value], None).unwrap();
        prop_assert_eq!(
            edge.is_match(&record, tolerance),
            (stored - value).abs() <= tolerance
        );
    }

    #[test]
    fn exact_match_iff_all_vertices_equal(
        predicted in prop::collection::vec(any::<bool>(), 4),
        stored in prop::collection::vec(any::<bool>(), 2),
    ) {
        let edge = HyperEdge::new(
            vec![0, 3],
            vec![ValueType::Exact; 2],
            stored.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
            0,
            vec![false; 4],
        ).unwrap();
        let record = ProcessedRecord::new(&predicted, &[0.5; 4], None).unwrap();
        prop_assert_eq!(
            edge.is_match(&record, 1.0),
            predicted[0] == stored[0] && predicted[3] == stored[1]
        );
    }
}

// ── Population search ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn refinement_keeps_size_and_elitist_fitness_never_drops(
        seed in 0u64..1000,
        correlation in arb_correlation(),
        rate in 0.0f64..1.0,
    ) {
        let records = noisy_processed_records(15, 4, seed);
        let imbalance = LabelImbalance::from_records(&records, 4);
        let sampler = sampler_for(correlation);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut population = initialize(&records, 3, 2, sampler.as_ref(), &mut rng).unwrap();
        let trace = refine(
            &mut population,
            &records,
            &imbalance,
            sampler.as_ref(),
            &RefinementSettings {
                iterations: 6,
                initial_replace_rate: rate,
                order: 2,
                match_threshold: 0.1,
                policy: ReplacementPolicy::Elitist,
                parallel: false,
            },
            &mut rng,
        ).unwrap();

        prop_assert_eq!(population.len(), 45);
        for pair in trace.mean_fitness.windows(2) {
            prop_assert!(pair[1] >= pair[0] - 1e-12);
        }
    }

    #[test]
    fn weight_training_only_changes_weights(
        seed in 0u64..1000,
        correlation in arb_correlation(),
        learn_rate in 0.001f64..1.0,
        alpha in 0.0f64..=1.0,
    ) {
        let records = noisy_processed_records(12, 3, seed);
        let sampler = sampler_for(correlation);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut population = initialize(&records, 2, 2, sampler.as_ref(), &mut rng).unwrap();
        let index = MatchIndex::build(&population, &records, 0.1, false);
        let before = population.clone();

        train(
            &mut population,
            &records,
            &index,
            &[0.5; 3],
            &WeightTrainingSettings { iterations: 3, learn_rate, alpha, parallel: false },
        ).unwrap();

        prop_assert_eq!(before.len(), population.len());
        for (a, b) in before.iter().zip(population.iter()) {
            prop_assert_eq!(a.label(), b.label());
            prop_assert_eq!(a.vertices(), b.vertices());
            prop_assert_eq!(a.value_types(), b.value_types());
            prop_assert_eq!(a.stored_values(), b.stored_values());
            prop_assert_eq!(a.source_index(), b.source_index());
            for (wa, wb) in a.weight().iter().zip(b.weight()) {
                prop_assert!(wb >= wa);
            }
        }
    }

    #[test]
    fn sampled_vertices_respect_invariants(
        seed in 0u64..1000,
        correlation in arb_correlation(),
        order in 1usize..5,
    ) {
        let records = noisy_processed_records(4, 5, seed);
        let sampler = sampler_for(correlation);
        let mut rng = StdRng::seed_from_u64(seed);
        let population = initialize(&records, 2, order, sampler.as_ref(), &mut rng).unwrap();
        for edge in population.iter() {
            prop_assert_eq!(edge.order(), order);
            prop_assert_eq!(edge.value_types().len(), order);
            prop_assert_eq!(edge.stored_values().len(), order);
            prop_assert_eq!(edge.weight().len(), 5);
            let mut vs = edge.vertices().to_vec();
            vs.sort_unstable();
            vs.dedup();
            prop_assert_eq!(vs.len(), order);
            prop_assert!(edge.vertices().iter().all(|&v| v < 10));
        }
    }
}
