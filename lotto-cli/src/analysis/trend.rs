use lotto_db::models::{Draw, MAX_NUMBER, is_valid_number};

use super::AnalysisError;

/// Borne haute de `window_count` pour `windowed_occurrences`.
pub const MAX_WINDOW_COUNT: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendEntry {
    pub number: u8,
    /// Apparitions dans la seconde moitié moins apparitions dans la première.
    pub delta: i64,
}

/// Comparaison « avant / maintenant » : l'historique est coupé en `len / 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendAnalysis {
    entries: Vec<TrendEntry>,
    earlier_len: usize,
    later_len: usize,
}

impl TrendAnalysis {
    pub fn from_history(draws: &[Draw]) -> Self {
        let split = draws.len() / 2;
        let (earlier, later) = draws.split_at(split);
        let earlier_counts = counts(earlier);
        let later_counts = counts(later);

        let entries = (1..=MAX_NUMBER)
            .map(|n| TrendEntry {
                number: n,
                delta: later_counts[n as usize] as i64 - earlier_counts[n as usize] as i64,
            })
            .collect();

        Self {
            entries,
            earlier_len: earlier.len(),
            later_len: later.len(),
        }
    }

    /// 0 pour un numéro hors [1, 49].
    pub fn delta(&self, number: u8) -> i64 {
        if !is_valid_number(number) {
            return 0;
        }
        // `entries[i]` porte le numéro `i + 1`.
        self.entries[number as usize - 1].delta
    }

    /// Une entrée par numéro, 1 à 49.
    pub fn entries(&self) -> &[TrendEntry] {
        &self.entries
    }

    pub fn earlier_len(&self) -> usize {
        self.earlier_len
    }

    pub fn later_len(&self) -> usize {
        self.later_len
    }

    /// Plus fortes hausses d'abord, départagées par numéro croissant.
    pub fn risers(&self, k: usize) -> Vec<TrendEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.delta.cmp(&a.delta).then(a.number.cmp(&b.number)));
        ranked.truncate(k);
        ranked
    }

    /// Plus fortes baisses d'abord, départagées par numéro croissant.
    pub fn fallers(&self, k: usize) -> Vec<TrendEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| a.delta.cmp(&b.delta).then(a.number.cmp(&b.number)));
        ranked.truncate(k);
        ranked
    }
}

fn counts(draws: &[Draw]) -> [u32; MAX_NUMBER as usize + 1] {
    let mut counts = [0u32; MAX_NUMBER as usize + 1];
    for draw in draws {
        for &n in draw.numbers() {
            counts[n as usize] += 1;
        }
    }
    counts
}

/// Nombre de tirages contenant `number` dans chacun des `window_count` blocs
/// consécutifs de même taille, du plus ancien au plus récent.
///
/// La taille de bloc est `len / window_count` : les tirages du reste, en fin
/// d'historique, ne sont comptés dans aucun bloc.
pub fn windowed_occurrences(
    draws: &[Draw],
    number: u8,
    window_count: usize,
) -> Result<Vec<u32>, AnalysisError> {
    if window_count == 0 {
        return Err(AnalysisError::InvalidArgument(
            "le nombre de blocs doit être strictement positif".to_string(),
        ));
    }
    if window_count > MAX_WINDOW_COUNT {
        return Err(AnalysisError::InvalidArgument(format!(
            "{} blocs demandés, maximum {}",
            window_count, MAX_WINDOW_COUNT
        )));
    }
    if !is_valid_number(number) {
        return Err(AnalysisError::InvalidArgument(format!(
            "numéro {} hors limites (1-{})",
            number, MAX_NUMBER
        )));
    }

    let block_len = draws.len() / window_count;
    let series = (0..window_count)
        .map(|i| {
            let start = i * block_len;
            draws[start..start + block_len]
                .iter()
                .filter(|d| d.contains(number))
                .count() as u32
        })
        .collect();
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rows: &[[u8; 6]]) -> Vec<Draw> {
        rows.iter().map(|r| Draw::new(r).unwrap()).collect()
    }

    fn four_draws() -> Vec<Draw> {
        draws(&[
            [1, 2, 3, 4, 5, 6],
            [1, 7, 8, 9, 10, 11],
            [1, 2, 12, 13, 14, 15],
            [2, 16, 17, 18, 19, 20],
        ])
    }

    #[test]
    fn test_split_and_deltas() {
        let trend = TrendAnalysis::from_history(&four_draws());
        assert_eq!(trend.earlier_len(), 2);
        assert_eq!(trend.later_len(), 2);
        assert_eq!(trend.delta(1), -1);
        assert_eq!(trend.delta(2), 1);
        assert_eq!(trend.delta(7), -1);
        assert_eq!(trend.delta(20), 1);
        assert_eq!(trend.delta(49), 0);
        let sum: i64 = trend.entries().iter().map(|e| e.delta).sum();
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_risers_and_fallers() {
        let trend = TrendAnalysis::from_history(&four_draws());
        let risers = trend.risers(3);
        assert_eq!(risers[0], TrendEntry { number: 2, delta: 1 });
        assert_eq!(risers[1], TrendEntry { number: 12, delta: 1 });
        let fallers = trend.fallers(2);
        assert_eq!(fallers[0], TrendEntry { number: 1, delta: -1 });
        assert_eq!(fallers[1], TrendEntry { number: 3, delta: -1 });
    }

    #[test]
    fn test_degenerate_histories() {
        let empty = TrendAnalysis::from_history(&[]);
        assert_eq!(empty.entries().len(), 49);
        assert!(empty.entries().iter().all(|e| e.delta == 0));

        let single = TrendAnalysis::from_history(&draws(&[[1, 2, 3, 4, 5, 6]]));
        assert_eq!(single.earlier_len(), 0);
        assert_eq!(single.later_len(), 1);
        assert_eq!(single.delta(1), 1);
    }

    #[test]
    fn test_delta_matches_entries() {
        let trend = TrendAnalysis::from_history(&four_draws());
        for entry in trend.entries() {
            assert_eq!(trend.delta(entry.number), entry.delta);
        }
        assert_eq!(trend.delta(0), 0);
        assert_eq!(trend.delta(50), 0);
        assert_eq!(trend.delta(u8::MAX), 0);
    }

    #[test]
    fn test_windowed_truncates_remainder() {
        let mut rows = Vec::new();
        for i in 0..23u8 {
            let base = (i % 7) * 6 + 1;
            rows.push([base, base + 1, base + 2, base + 3, base + 4, base + 5]);
        }
        let history = draws(&rows);
        let series = windowed_occurrences(&history, 1, 5).unwrap();
        assert_eq!(series.len(), 5);
        // 1 sort aux indices 0, 7, 14, 21 ; le 21 tombe dans le reste ignoré.
        assert_eq!(series, vec![1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_windowed_short_history() {
        let history = draws(&[[1, 2, 3, 4, 5, 6], [1, 7, 8, 9, 10, 11]]);
        let series = windowed_occurrences(&history, 1, 5).unwrap();
        assert_eq!(series, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_windowed_invalid_arguments() {
        let history = four_draws();
        assert!(matches!(
            windowed_occurrences(&history, 1, 0),
            Err(AnalysisError::InvalidArgument(_))
        ));
        assert!(matches!(
            windowed_occurrences(&history, 0, 2),
            Err(AnalysisError::InvalidArgument(_))
        ));
        assert!(matches!(
            windowed_occurrences(&history, 50, 2),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_windowed_rejects_absurd_window_count() {
        let history = four_draws();
        assert!(matches!(
            windowed_occurrences(&history, 1, usize::MAX),
            Err(AnalysisError::InvalidArgument(_))
        ));
        assert!(matches!(
            windowed_occurrences(&history, 1, MAX_WINDOW_COUNT + 1),
            Err(AnalysisError::InvalidArgument(_))
        ));
        let series = windowed_occurrences(&history, 1, MAX_WINDOW_COUNT).unwrap();
        assert_eq!(series.len(), MAX_WINDOW_COUNT);
        assert!(series.iter().all(|&c| c == 0));
    }
}
