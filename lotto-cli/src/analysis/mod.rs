pub mod combination;
pub mod frequency;
pub mod recency;
pub mod sampler;
pub mod trend;

use rand::Rng;
use thiserror::Error;

use lotto_db::models::Draw;

use crate::config::AnalysisConfig;
use combination::{Triplet, TripletCounter};
use frequency::{FrequencyTable, ProbabilityTable};
use recency::RecencyTable;
use sampler::{Suggestions, generate_suggestions};
use trend::{TrendAnalysis, TrendEntry, windowed_occurrences};

/// Échec local à une section du rapport ; les autres sections restent valides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("paramètre invalide : {0}")]
    InvalidArgument(String),
    #[error("données insuffisantes : {needed} numéros requis, {available} disponibles")]
    InsufficientData { needed: usize, available: usize },
}

#[derive(Debug, Clone)]
pub struct StatisticsReport {
    pub draw_count: usize,
    pub frequency: FrequencyTable,
    pub top_numbers: Vec<(u8, u32)>,
    pub probabilities: ProbabilityTable,
    pub recency: RecencyTable,
    pub coldest: Vec<(u8, u32)>,
    pub trend: TrendAnalysis,
    pub risers: Vec<TrendEntry>,
    pub fallers: Vec<TrendEntry>,
    pub selected_number: u8,
    pub windowed: Result<Vec<u32>, AnalysisError>,
    pub top_triplets: Vec<(Triplet, u32)>,
    pub bottom_triplets: Vec<(Triplet, u32)>,
    pub suggestions: Result<Suggestions, AnalysisError>,
}

/// Historique analysé et rapport associé, transmis explicitement à l'affichage.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub history: Vec<Draw>,
    pub report: StatisticsReport,
}

impl AnalysisSession {
    pub fn new<R: Rng + ?Sized>(history: Vec<Draw>, config: &AnalysisConfig, rng: &mut R) -> Self {
        let report = analyze(&history, config, rng);
        Self { history, report }
    }
}

/// Passe complète sur `draws` (le plus ancien d'abord). Ne renvoie jamais
/// d'erreur globale : les sections faillibles portent leur propre `Result`.
pub fn analyze<R: Rng + ?Sized>(
    draws: &[Draw],
    config: &AnalysisConfig,
    rng: &mut R,
) -> StatisticsReport {
    let frequency = FrequencyTable::from_history(draws);
    let top_numbers = frequency.top_k(config.top_k);
    let probabilities = frequency.probabilities();
    let recency = RecencyTable::from_history(draws);
    let coldest = recency.top_k_coldest(config.top_k);

    let trend = TrendAnalysis::from_history(draws);
    let risers = trend.risers(config.trend_count);
    let fallers = trend.fallers(config.trend_count);

    let windowed = windowed_occurrences(draws, config.selected_number, config.window_count);
    if let Err(e) = &windowed {
        log::debug!("série par blocs indisponible : {}", e);
    }

    let triplets = TripletCounter::from_history(draws);
    let top_triplets = triplets.top_k_frequent(config.top_k);
    let bottom_triplets = triplets.bottom_k_nonzero(config.top_k);

    let suggestions = generate_suggestions(&frequency, &recency, config.pool_size, rng);
    if let Err(e) = &suggestions {
        log::debug!("suggestions indisponibles : {}", e);
    }

    log::debug!(
        "analyse terminée : {} tirages, {} triplets distincts",
        draws.len(),
        triplets.len()
    );

    StatisticsReport {
        draw_count: draws.len(),
        frequency,
        top_numbers,
        probabilities,
        recency,
        coldest,
        trend,
        risers,
        fallers,
        selected_number: config.selected_number,
        windowed,
        top_triplets,
        bottom_triplets,
        suggestions,
    }
}
