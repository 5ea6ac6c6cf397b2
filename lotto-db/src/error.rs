use std::path::PathBuf;

use thiserror::Error;

/// Raison du rejet d'un tirage à la frontière de validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("un tirage doit contenir 6 numéros, reçu {0}")]
    WrongLength(usize),
    #[error("numéro {0} hors limites (1-49)")]
    OutOfRange(u8),
    #[error("numéro en double : {0}")]
    Duplicate(u8),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("erreur SQLite : {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("impossible d'accéder à {path:?} : {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{dates} dates fournies pour {rows} tirages")]
    DateCountMismatch { rows: usize, dates: usize },
}
