use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser, Subcommand};

use lotto_cli::analysis::AnalysisSession;
use lotto_cli::analysis::sampler::rng_from_seed;
use lotto_cli::config::AnalysisConfig;
use lotto_cli::display::{display_draws, display_import_summary, display_report};
use lotto_cli::export::export_history;
use lotto_cli::fetch::{DEFAULT_API_LIMIT, DEFAULT_CSV_URL, DEFAULT_GAME, fetch_api, fetch_csv};
use lotto_cli::import::load_csv_file;
use lotto_db::db::{count_draws, db_path, ensure_schema, fetch_last_draws, open_db, read_all, replace_all};
use lotto_db::rusqlite::Connection;

#[derive(Parser)]
#[command(name = "lotto", about = "Analyse statistique des résultats du Lotto 6/49")]
struct Cli {
    /// Chemin de la base SQLite (défaut : ./data/lotto.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Fichier JSON de configuration d'analyse
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer des tirages (CSV local, CSV en ligne ou API) et remplacer l'historique
    #[command(group(ArgGroup::new("source").required(true).args(["file", "url", "api"])))]
    Import {
        /// Chemin vers un fichier CSV (6 dernières colonnes)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// URL d'un CSV ; sans valeur, le CSV public des résultats
        #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_CSV_URL)]
        url: Option<String>,

        /// Interroger l'API officielle des résultats
        #[arg(long)]
        api: bool,

        /// Nombre de tirages demandés à l'API
        #[arg(long, default_value_t = DEFAULT_API_LIMIT)]
        limit: u32,

        /// Jeu demandé à l'API
        #[arg(long, default_value = DEFAULT_GAME)]
        game: String,

        /// Clé de l'API
        #[arg(long, env = "LOTTO_API_KEY", hide_env_values = true)]
        secret: Option<String>,

        /// Séparateur de colonnes (CSV)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Analyser tout l'historique
    Stats {
        /// Numéro suivi bloc par bloc (1-49)
        #[arg(short, long)]
        number: Option<u8>,

        /// Nombre de blocs pour la série d'apparitions
        #[arg(short, long)]
        windows: Option<usize>,

        /// Taille des classements
        #[arg(short, long)]
        top: Option<usize>,

        /// Taille des viviers de suggestion
        #[arg(short, long)]
        pool: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Exporter l'historique normalisé en CSV (L1..L6)
    Export {
        #[arg(short, long, default_value = "wyniki_lotto.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let path = cli.db.clone().unwrap_or_else(db_path);
    let conn = open_db(&path)?;
    ensure_schema(&conn)?;

    let mut config = match &cli.config {
        Some(file) => AnalysisConfig::load(file)?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Command::Import {
            file,
            url,
            api,
            limit,
            game,
            secret,
            delimiter,
        } => {
            let source = if api {
                Source::Api {
                    secret: secret.as_deref(),
                    game: &game,
                    limit,
                }
            } else if let Some(url) = url.as_deref() {
                Source::Url(url)
            } else if let Some(file) = file.as_deref() {
                Source::File(file)
            } else {
                bail!("Indiquez une source : --file, --url ou --api");
            };
            cmd_import(&conn, source, delimiter)
        }
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats {
            number,
            windows,
            top,
            pool,
            seed,
        } => {
            if let Some(n) = number {
                config.selected_number = n;
            }
            if let Some(w) = windows {
                config.window_count = w;
            }
            if let Some(t) = top {
                config.top_k = t;
                config.trend_count = t;
            }
            if let Some(p) = pool {
                config.pool_size = p;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            cmd_stats(&conn, &config)
        }
        Command::Export { output } => cmd_export(&conn, &output),
    }
}

enum Source<'a> {
    File(&'a Path),
    Url(&'a str),
    Api {
        secret: Option<&'a str>,
        game: &'a str,
        limit: u32,
    },
}

fn cmd_import(conn: &Connection, source: Source<'_>, delimiter: char) -> Result<()> {
    let delimiter = u8::try_from(delimiter).context("Le séparateur doit être un caractère ASCII")?;
    let batch = match source {
        Source::File(file) => load_csv_file(file, delimiter)?,
        Source::Url(url) => fetch_csv(url, delimiter)?,
        Source::Api { secret, game, limit } => fetch_api(secret, game, limit)?,
    };
    let summary = replace_all(conn, &batch.rows, batch.dates.as_deref())
        .context("Échec de l'enregistrement des tirages")?;
    display_import_summary(&batch, &summary);
    Ok(())
}

fn cmd_list(conn: &Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lotto import --file <csv>");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(conn: &Connection, config: &AnalysisConfig) -> Result<()> {
    let history = read_all(conn)?;
    if history.is_empty() {
        println!("Base vide. Lancez d'abord : lotto import --file <csv>");
        return Ok(());
    }

    let mut rng = rng_from_seed(config.seed);
    let session = AnalysisSession::new(history, config, &mut rng);
    display_report(&session);
    Ok(())
}

fn cmd_export(conn: &Connection, output: &Path) -> Result<()> {
    let history = read_all(conn)?;
    export_history(output, &history)?;
    println!("{} tirages exportés vers {}", history.len(), output.display());
    Ok(())
}
