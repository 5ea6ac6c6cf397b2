use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Paramètres d'une passe d'analyse. Chargeables depuis un fichier JSON ;
/// les champs absents prennent la valeur par défaut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Nombre de lignes pour les classements (fréquences, froids, triplets).
    pub top_k: usize,
    /// Nombre de hausses / baisses affichées.
    pub trend_count: usize,
    /// Nombre de blocs pour la série d'apparitions.
    pub window_count: usize,
    /// Numéro suivi dans la série d'apparitions.
    pub selected_number: u8,
    /// Taille des viviers de suggestion.
    pub pool_size: usize,
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            trend_count: 10,
            window_count: 5,
            selected_number: 6,
            pool_size: 20,
            seed: None,
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {:?}", path))?;
        let config: AnalysisConfig = serde_json::from_str(&json)
            .with_context(|| format!("Configuration invalide dans {:?}", path))?;
        Ok(config)
    }
}
