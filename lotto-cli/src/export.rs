use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use lotto_db::models::Draw;

const HEADER: [&str; 6] = ["L1", "L2", "L3", "L4", "L5", "L6"];

/// Historique normalisé : une ligne par tirage, 6 colonnes entières.
pub fn write_history<W: Write>(writer: W, draws: &[Draw]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for draw in draws {
        writer.write_record(draw.numbers().iter().map(|n| n.to_string()))?;
    }
    writer.flush().context("Échec d'écriture du CSV")?;
    Ok(())
}

pub fn export_history(path: &Path, draws: &[Draw]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Impossible de créer {:?}", path))?;
    write_history(file, draws)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_history() {
        let draws = vec![
            Draw::new(&[5, 1, 2, 3, 4, 6]).unwrap(),
            Draw::new(&[44, 45, 46, 47, 48, 49]).unwrap(),
        ];
        let mut out = Vec::new();
        write_history(&mut out, &draws).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "L1,L2,L3,L4,L5,L6\n5,1,2,3,4,6\n44,45,46,47,48,49\n");
    }

    #[test]
    fn test_empty_history_header_only() {
        let mut out = Vec::new();
        write_history(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "L1,L2,L3,L4,L5,L6\n");
    }

    #[test]
    fn test_roundtrip_through_loader() {
        let draws = vec![Draw::new(&[1, 2, 3, 4, 5, 6]).unwrap()];
        let mut out = Vec::new();
        write_history(&mut out, &draws).unwrap();
        let load = crate::import::load_csv(out.as_slice(), b',').unwrap();
        assert_eq!(load.rows, vec![vec![1, 2, 3, 4, 5, 6]]);
    }
}
