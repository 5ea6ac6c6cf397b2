//! Sources distantes : CSV publié en ligne et API officielle des résultats.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::import::{DrawBatch, load_csv};
use lotto_db::models::validate_numbers;

/// CSV public mis à jour après chaque tirage.
pub const DEFAULT_CSV_URL: &str = "https://www.wynikilotto.net.pl/download/lotto.csv";
pub const API_BASE: &str = "https://developers.lotto.pl/api/open/v1/";
pub const DEFAULT_GAME: &str = "Lotto";
pub const DEFAULT_API_LIMIT: u32 = 200;

const TIMEOUT: Duration = Duration::from_secs(10);

fn client() -> Result<Client> {
    Client::builder()
        .timeout(TIMEOUT)
        .build()
        .context("Impossible de créer le client HTTP")
}

/// Télécharge un CSV et l'analyse comme un fichier local.
pub fn fetch_csv(url: &str, delimiter: u8) -> Result<DrawBatch> {
    log::info!("téléchargement de {}", url);
    let body = client()?
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Téléchargement de {} impossible", url))?
        .bytes()
        .with_context(|| format!("Réponse illisible depuis {}", url))?;
    load_csv(body.as_ref(), delimiter).with_context(|| format!("CSV invalide à {}", url))
}

/// Entrée renvoyée par l'API ; seuls les numéros nous intéressent.
#[derive(Debug, Deserialize)]
pub struct ApiDraw {
    #[serde(default)]
    numbers: Option<Vec<i64>>,
}

pub fn api_url(base: &str, game: &str, limit: u32) -> String {
    format!("{base}lotteries/draws/latest?gameType={game}&cnt={limit}")
}

/// Les `limit` derniers tirages de `game`. Sans clé, la requête part quand
/// même et l'API répond en général 401.
pub fn fetch_api(secret: Option<&str>, game: &str, limit: u32) -> Result<DrawBatch> {
    if limit == 0 {
        bail!("Le nombre de tirages demandés doit être strictement positif");
    }
    let url = api_url(API_BASE, game, limit);
    log::info!("interrogation de l'API : {}", url);

    let mut request = client()?.get(&url).header("accept", "application/json");
    match secret {
        Some(secret) => request = request.header("secret", secret),
        None => log::warn!("aucune clé API fournie (--secret ou LOTTO_API_KEY)"),
    }

    let entries: Vec<ApiDraw> = request
        .send()
        .and_then(|r| r.error_for_status())
        .context("API des résultats indisponible")?
        .json()
        .context("Réponse JSON de l'API inattendue")?;
    batch_from_api(entries)
}

/// Garde les entrées portant 6 numéros distincts dans [1, 49]. L'API ne
/// fournit pas de date exploitable : `dates` reste vide.
pub fn batch_from_api(entries: Vec<ApiDraw>) -> Result<DrawBatch> {
    let total_records = entries.len() as u32;
    let mut rows = Vec::with_capacity(entries.len());
    let mut rejected = 0u32;

    for (i, entry) in entries.into_iter().enumerate() {
        let row = entry.numbers.and_then(|numbers| {
            numbers
                .into_iter()
                .map(|n| u8::try_from(n).ok())
                .collect::<Option<Vec<u8>>>()
        });
        match row {
            Some(row) if validate_numbers(&row).is_ok() => rows.push(row),
            _ => {
                log::debug!("entrée {} de l'API rejetée", i + 1);
                rejected += 1;
            }
        }
    }

    if rows.is_empty() {
        bail!("L'API n'a renvoyé aucun tirage valide");
    }
    Ok(DrawBatch {
        rows,
        dates: None,
        total_records,
        rejected,
    })
}
