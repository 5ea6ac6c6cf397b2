use rusqlite::{Connection, Row};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::{Draw, PICK_COUNT};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    date  TEXT NOT NULL,
    l1    INTEGER NOT NULL,
    l2    INTEGER NOT NULL,
    l3    INTEGER NOT NULL,
    l4    INTEGER NOT NULL,
    l5    INTEGER NOT NULL,
    l6    INTEGER NOT NULL
);
";

const SELECT_COLUMNS: &str = "id, date, l1, l2, l3, l4, l5, l6";

/// Bilan d'un `replace_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaceSummary {
    pub inserted: u32,
    pub skipped: u32,
}

pub fn db_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotto.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let conn = Connection::open(path)?;
    Ok(conn)
}

pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Remplace tout l'historique par `rows` dans une seule transaction.
///
/// Les lignes qui ne forment pas un tirage valide sont ignorées, pas fatales.
/// Sans `dates`, chaque ligne reçoit la date du jour. En cas d'échec SQL la
/// transaction est annulée et le contenu précédent reste en place.
pub fn replace_all<R: AsRef<[u8]>>(
    conn: &Connection,
    rows: &[R],
    dates: Option<&[String]>,
) -> Result<ReplaceSummary, StoreError> {
    if let Some(dates) = dates {
        if dates.len() != rows.len() {
            return Err(StoreError::DateCountMismatch {
                rows: rows.len(),
                dates: dates.len(),
            });
        }
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM draws", [])?;

    let mut summary = ReplaceSummary::default();
    {
        let mut stmt = tx.prepare(
            "INSERT INTO draws (date, l1, l2, l3, l4, l5, l6)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for (i, row) in rows.iter().enumerate() {
            let draw = match Draw::new(row.as_ref()) {
                Ok(draw) => draw,
                Err(e) => {
                    log::warn!("ligne {} ignorée : {}", i + 1, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            let date = dates.map_or(today.as_str(), |d| d[i].as_str());
            let n = draw.numbers();
            stmt.execute(rusqlite::params![date, n[0], n[1], n[2], n[3], n[4], n[5]])?;
            summary.inserted += 1;
        }
    }

    tx.commit()?;
    log::info!(
        "historique remplacé : {} tirages insérés, {} ignorés",
        summary.inserted,
        summary.skipped
    );
    Ok(summary)
}

/// Tout l'historique, dans l'ordre d'insertion (le plus ancien d'abord).
pub fn read_all(conn: &Connection) -> Result<Vec<Draw>, StoreError> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM draws ORDER BY id");
    query_draws(conn, &sql, [])
}

/// Les `limit` derniers tirages, rendus du plus ancien au plus récent.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>, StoreError> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM (SELECT {SELECT_COLUMNS} FROM draws ORDER BY id DESC LIMIT ?1) ORDER BY id"
    );
    query_draws(conn, &sql, [limit])
}

pub fn count_draws(conn: &Connection) -> Result<u32, StoreError> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

struct RawRow {
    id: i64,
    date: String,
    numbers: [i64; PICK_COUNT],
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        date: row.get(1)?,
        numbers: [
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
        ],
    })
}

fn query_draws<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Draw>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, raw_row)?
        .collect::<Result<Vec<_>, _>>()?;

    // La table peut être écrite par d'autres outils : on revalide chaque ligne.
    let mut draws = Vec::with_capacity(rows.len());
    for raw in rows {
        let numbers: Vec<u8> = raw
            .numbers
            .iter()
            .map(|&v| u8::try_from(v).unwrap_or(0))
            .collect();
        match Draw::with_date(&numbers, raw.date) {
            Ok(draw) => draws.push(draw),
            Err(e) => log::warn!("ligne id={} ignorée à la lecture : {}", raw.id, e),
        }
    }
    Ok(draws)
}
