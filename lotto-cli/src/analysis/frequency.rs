use std::collections::BTreeMap;

use lotto_db::models::{Draw, MAX_NUMBER};

/// Probabilité d'apparition par numéro, seulement pour les numéros sortis.
pub type ProbabilityTable = BTreeMap<u8, f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    counts: [u32; MAX_NUMBER as usize + 1],
    /// Numéros dans l'ordre de première apparition.
    first_seen: Vec<u8>,
    history_len: usize,
}

impl FrequencyTable {
    pub fn from_history(draws: &[Draw]) -> Self {
        let mut counts = [0u32; MAX_NUMBER as usize + 1];
        let mut first_seen = Vec::new();

        for draw in draws {
            for &n in draw.numbers() {
                let idx = n as usize;
                if counts[idx] == 0 {
                    first_seen.push(n);
                }
                counts[idx] += 1;
            }
        }

        Self {
            counts,
            first_seen,
            history_len: draws.len(),
        }
    }

    pub fn count(&self, number: u8) -> u32 {
        self.counts.get(number as usize).copied().unwrap_or(0)
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Numéros sortis au moins une fois, par ordre croissant.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        (1..=MAX_NUMBER)
            .map(|n| (n, self.counts[n as usize]))
            .filter(|&(_, c)| c > 0)
    }

    pub fn probability(&self, number: u8) -> f64 {
        if self.history_len == 0 {
            return 0.0;
        }
        self.count(number) as f64 / self.history_len as f64
    }

    pub fn probabilities(&self) -> ProbabilityTable {
        self.iter()
            .map(|(n, c)| (n, c as f64 / self.history_len as f64))
            .collect()
    }

    /// Les `k` numéros les plus fréquents. À égalité, le premier rencontré
    /// dans l'historique passe devant.
    pub fn top_k(&self, k: usize) -> Vec<(u8, u32)> {
        let mut ranked: Vec<(u8, u32)> = self
            .first_seen
            .iter()
            .map(|&n| (n, self.counts[n as usize]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rows: &[[u8; 6]]) -> Vec<Draw> {
        rows.iter().map(|r| Draw::new(r).unwrap()).collect()
    }

    #[test]
    fn test_counts_and_total() {
        let history = draws(&[[1, 2, 3, 4, 5, 6], [1, 2, 3, 7, 8, 9], [1, 10, 11, 12, 13, 14]]);
        let table = FrequencyTable::from_history(&history);
        assert_eq!(table.count(1), 3);
        assert_eq!(table.count(2), 2);
        assert_eq!(table.count(14), 1);
        assert_eq!(table.count(49), 0);
        assert_eq!(table.total(), 18);
    }

    #[test]
    fn test_probabilities() {
        let history = draws(&[[1, 2, 3, 4, 5, 6], [1, 7, 8, 9, 10, 11]]);
        let table = FrequencyTable::from_history(&history);
        let probs = table.probabilities();
        assert_eq!(probs.len(), 11);
        assert!((probs[&1] - 1.0).abs() < 1e-12);
        assert!((probs[&2] - 0.5).abs() < 1e-12);
        assert!(!probs.contains_key(&12));
        assert_eq!(table.probability(12), 0.0);
    }

    #[test]
    fn test_empty_history() {
        let table = FrequencyTable::from_history(&[]);
        assert!(table.is_empty());
        assert!(table.probabilities().is_empty());
        assert!(table.top_k(10).is_empty());
        assert_eq!(table.probability(1), 0.0);
    }

    #[test]
    fn test_top_k_ties_by_first_encounter() {
        let history = draws(&[[9, 4, 30, 31, 32, 33], [4, 9, 40, 41, 42, 43], [44, 45, 46, 47, 48, 49]]);
        let table = FrequencyTable::from_history(&history);
        let top = table.top_k(4);
        assert_eq!(top, vec![(9, 2), (4, 2), (30, 1), (31, 1)]);
    }
}
