use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use lotto_db::models::{MAX_NUMBER, PICK_COUNT};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

/// Tirages extraits d'une source (CSV ou API), prêts pour `replace_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    pub rows: Vec<Vec<u8>>,
    /// Présentes seulement si chaque ligne retenue en avait une.
    pub dates: Option<Vec<String>>,
    pub total_records: u32,
    pub rejected: u32,
}

pub fn parse_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
}

fn parse_number(field: &str) -> Option<u8> {
    let n: u8 = field.trim().parse().ok()?;
    (1..=MAX_NUMBER).contains(&n).then_some(n)
}

/// Garde les 6 dernières colonnes ; `None` si l'une n'est pas un numéro 1-49.
fn parse_record(record: &csv::StringRecord) -> Option<Vec<u8>> {
    if record.len() < PICK_COUNT {
        return None;
    }
    record
        .iter()
        .skip(record.len() - PICK_COUNT)
        .map(parse_number)
        .collect()
}

pub fn load_csv<R: Read>(reader: R, delimiter: u8) -> Result<DrawBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let columns = reader.headers().context("En-tête CSV illisible")?.len();
    if columns < PICK_COUNT {
        bail!("Le CSV doit contenir au moins {} colonnes, {} trouvées", PICK_COUNT, columns);
    }

    let mut rows = Vec::new();
    let mut dates = Vec::new();
    let mut total_records = 0u32;
    let mut rejected = 0u32;

    for record_result in reader.records() {
        total_records += 1;
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("ligne {} illisible : {}", total_records, e);
                rejected += 1;
                continue;
            }
        };
        match parse_record(&record) {
            Some(numbers) => {
                // La date n'est cherchée que hors des 6 colonnes de numéros.
                let date = if record.len() > PICK_COUNT {
                    record.get(0).and_then(parse_date)
                } else {
                    None
                };
                dates.push(date);
                rows.push(numbers);
            }
            None => {
                log::debug!("ligne {} rejetée : {:?}", total_records, record);
                rejected += 1;
            }
        }
    }

    if rows.is_empty() {
        bail!("Aucun ensemble valide de 6 numéros (1-{}) trouvé", MAX_NUMBER);
    }

    let dates = dates.into_iter().collect::<Option<Vec<String>>>();
    Ok(DrawBatch {
        rows,
        dates,
        total_records,
        rejected,
    })
}

pub fn load_csv_file(path: &Path, delimiter: u8) -> Result<DrawBatch> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    load_csv(file, delimiter).with_context(|| format!("Échec de lecture de {:?}", path))
}
