use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use lotto_db::models::PICK_COUNT;

use super::AnalysisError;
use super::frequency::FrequencyTable;
use super::recency::RecencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    /// Tirée parmi les numéros les plus fréquents.
    pub frequent: [u8; PICK_COUNT],
    /// Tirée parmi les numéros les plus froids.
    pub cold: [u8; PICK_COUNT],
}

pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Six numéros distincts tirés uniformément dans `pool`, triés.
pub fn suggest_from_pool<R: Rng + ?Sized>(
    pool: &[u8],
    rng: &mut R,
) -> Result<[u8; PICK_COUNT], AnalysisError> {
    let mut distinct = pool.to_vec();
    distinct.sort();
    distinct.dedup();

    if distinct.len() < PICK_COUNT {
        return Err(AnalysisError::InsufficientData {
            needed: PICK_COUNT,
            available: distinct.len(),
        });
    }

    let mut picked = [0u8; PICK_COUNT];
    for (slot, &n) in picked
        .iter_mut()
        .zip(distinct.choose_multiple(rng, PICK_COUNT))
    {
        *slot = n;
    }
    picked.sort();
    Ok(picked)
}

pub fn generate_suggestions<R: Rng + ?Sized>(
    frequency: &FrequencyTable,
    recency: &RecencyTable,
    pool_size: usize,
    rng: &mut R,
) -> Result<Suggestions, AnalysisError> {
    let hot_pool: Vec<u8> = frequency.top_k(pool_size).into_iter().map(|(n, _)| n).collect();
    let cold_pool: Vec<u8> = recency
        .top_k_coldest(pool_size)
        .into_iter()
        .map(|(n, _)| n)
        .collect();

    let frequent = suggest_from_pool(&hot_pool, rng)?;
    let cold = suggest_from_pool(&cold_pool, rng)?;
    Ok(Suggestions { frequent, cold })
}
