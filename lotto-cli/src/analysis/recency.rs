use lotto_db::models::{Draw, MAX_NUMBER};

/// Nombre de tirages écoulés depuis la dernière sortie de chaque numéro.
/// 0 = sorti au dernier tirage ; jamais sorti = longueur de l'historique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyTable {
    recency: [u32; MAX_NUMBER as usize + 1],
    history_len: usize,
}

impl RecencyTable {
    pub fn from_history(draws: &[Draw]) -> Self {
        let len = draws.len() as u32;
        let mut recency = [len; MAX_NUMBER as usize + 1];
        let mut seen = [false; MAX_NUMBER as usize + 1];

        for (distance, draw) in draws.iter().rev().enumerate() {
            for &n in draw.numbers() {
                let idx = n as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    recency[idx] = distance as u32;
                }
            }
        }

        Self {
            recency,
            history_len: draws.len(),
        }
    }

    pub fn recency(&self, number: u8) -> u32 {
        self.recency
            .get(number as usize)
            .copied()
            .unwrap_or(self.history_len as u32)
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        (1..=MAX_NUMBER).map(|n| (n, self.recency[n as usize]))
    }

    /// Les `k` numéros les plus « froids », départagés par numéro croissant.
    pub fn top_k_coldest(&self, k: usize) -> Vec<(u8, u32)> {
        let mut ranked: Vec<(u8, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }
}
