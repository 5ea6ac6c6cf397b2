use std::collections::BTreeMap;

use itertools::Itertools;
use lotto_db::models::Draw;

/// Trois numéros sortis ensemble, triés par ordre croissant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triplet(pub [u8; 3]);

impl std::fmt::Display for Triplet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{:2} - {:2} - {:2}", a, b, c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripletCounter {
    counts: BTreeMap<Triplet, u32>,
}

impl TripletCounter {
    pub fn from_history(draws: &[Draw]) -> Self {
        let mut counts = BTreeMap::new();
        for draw in draws {
            for combo in draw.sorted().into_iter().combinations(3) {
                *counts.entry(Triplet([combo[0], combo[1], combo[2]])).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn count(&self, triplet: &Triplet) -> u32 {
        self.counts.get(triplet).copied().unwrap_or(0)
    }

    /// Nombre de triplets distincts observés.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn top_k_frequent(&self, k: usize) -> Vec<(Triplet, u32)> {
        let mut ranked: Vec<(Triplet, u32)> = self.counts.iter().map(|(t, &c)| (*t, c)).collect();
        // L'itération du BTreeMap est déjà lexicographique : le tri stable la conserve.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// Les moins fréquents parmi les triplets effectivement sortis.
    pub fn bottom_k_nonzero(&self, k: usize) -> Vec<(Triplet, u32)> {
        let mut ranked: Vec<(Triplet, u32)> = self
            .counts
            .iter()
            .filter(|&(_, &c)| c > 0)
            .map(|(t, &c)| (*t, c))
            .collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1));
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
    fn test_single_draw_twenty_triplets() {
        let counter = TripletCounter::from_history(&draws(&[[6, 5, 4, 3, 2, 1]]));
        assert_eq!(counter.len(), 20);
        assert_eq!(counter.total(), 20);
        assert_eq!(counter.count(&Triplet([1, 2, 3])), 1);
        assert_eq!(counter.count(&Triplet([4, 5, 6])), 1);
        assert_eq!(counter.count(&Triplet([3, 2, 1])), 0);

        let top = counter.top_k_frequent(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0], (Triplet([1, 2, 3]), 1));
    }

    #[test]
    fn test_ranking() {
        let counter = TripletCounter::from_history(&draws(&[
            [1, 2, 3, 10, 11, 12],
            [1, 2, 3, 20, 21, 22],
            [1, 2, 4, 30, 31, 32],
        ]));
        let top = counter.top_k_frequent(2);
        assert_eq!(top[0], (Triplet([1, 2, 3]), 2));
        assert_eq!(top[1], (Triplet([1, 2, 4]), 1));

        let bottom = counter.bottom_k_nonzero(2);
        assert_eq!(bottom[0], (Triplet([1, 2, 4]), 1));
        assert_eq!(bottom[1], (Triplet([1, 2, 10]), 1));
        assert!(bottom.iter().all(|&(_, c)| c > 0));
    }

    #[test]
    fn test_empty_history() {
        let counter = TripletCounter::from_history(&[]);
        assert!(counter.is_empty());
        assert!(counter.top_k_frequent(10).is_empty());
        assert!(counter.bottom_k_nonzero(10).is_empty());
    }
}
