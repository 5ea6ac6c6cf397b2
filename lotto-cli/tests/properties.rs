use lotto_cli::analysis::combination::TripletCounter;
use lotto_cli::analysis::frequency::FrequencyTable;
use lotto_cli::analysis::recency::RecencyTable;
use lotto_cli::analysis::sampler::{rng_from_seed, suggest_from_pool};
use lotto_cli::analysis::trend::{TrendAnalysis, windowed_occurrences};
use lotto_db::models::Draw;
use proptest::prelude::*;

fn draw_strategy() -> impl Strategy<Value = Draw> {
    proptest::sample::subsequence((1u8..=49).collect::<Vec<_>>(), 6)
        .prop_shuffle()
        .prop_map(|numbers| Draw::new(&numbers).unwrap())
}

fn history_strategy() -> impl Strategy<Value = Vec<Draw>> {
    proptest::collection::vec(draw_strategy(), 0..60)
}

proptest! {
    #[test]
    fn frequency_total_is_six_per_draw(history in history_strategy()) {
        let table = FrequencyTable::from_history(&history);
        prop_assert_eq!(table.total() as usize, 6 * history.len());
    }

    #[test]
    fn probability_matches_frequency(history in history_strategy()) {
        let table = FrequencyTable::from_history(&history);
        let probs = table.probabilities();
        if history.is_empty() {
            prop_assert!(probs.is_empty());
        }
        for (n, p) in probs {
            let expected = table.count(n) as f64 / history.len() as f64;
            prop_assert!((p - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn recency_bounded_by_history(history in history_strategy()) {
        let table = RecencyTable::from_history(&history);
        prop_assert_eq!(table.iter().count(), 49);
        for (n, r) in table.iter() {
            prop_assert!(r as usize <= history.len());
            if (r as usize) < history.len() {
                prop_assert!(history[history.len() - 1 - r as usize].contains(n));
            }
        }
    }

    #[test]
    fn even_history_deltas_sum_to_zero(history in history_strategy()) {
        let even = &history[..history.len() / 2 * 2];
        let trend = TrendAnalysis::from_history(even);
        let sum: i64 = trend.entries().iter().map(|e| e.delta).sum();
        prop_assert_eq!(sum, 0);
    }

    #[test]
    fn windowed_covers_truncated_prefix(
        history in history_strategy(),
        number in 1u8..=49,
        windows in 1usize..10,
    ) {
        let series = windowed_occurrences(&history, number, windows).unwrap();
        prop_assert_eq!(series.len(), windows);
        let covered = windows * (history.len() / windows);
        let expected = history[..covered].iter().filter(|d| d.contains(number)).count() as u32;
        prop_assert_eq!(series.iter().sum::<u32>(), expected);
    }

    #[test]
    fn triplets_twenty_per_draw(history in history_strategy()) {
        let counter = TripletCounter::from_history(&history);
        prop_assert_eq!(counter.total() as usize, 20 * history.len());
    }

    #[test]
    fn suggestion_comes_from_pool(seed in any::<u64>(), pool in proptest::sample::subsequence((1u8..=49).collect::<Vec<_>>(), 6..20)) {
        let mut rng = rng_from_seed(Some(seed));
        let picked = suggest_from_pool(&pool, &mut rng).unwrap();
        prop_assert!(picked.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(picked.iter().all(|n| pool.contains(n)));
    }

    #[test]
    fn arbitrary_bytes_never_break_the_counters(rows in proptest::collection::vec(proptest::collection::vec(0u8..=60, 6), 0..40)) {
        let history: Vec<Draw> = rows.iter().filter_map(|r| Draw::new(r).ok()).collect();
        let freq = FrequencyTable::from_history(&history);
        prop_assert_eq!(freq.total() as usize, 6 * history.len());
        let triplets = TripletCounter::from_history(&history);
        prop_assert_eq!(triplets.total() as usize, 20 * history.len());
        let recency = RecencyTable::from_history(&history);
        prop_assert_eq!(recency.iter().count(), 49);
    }
}
