use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use crate::analysis::combination::Triplet;
use crate::analysis::sampler::Suggestions;
use crate::analysis::trend::TrendEntry;
use crate::analysis::{AnalysisError, AnalysisSession, StatisticsReport};
use crate::import::DrawBatch;
use lotto_db::db::ReplaceSummary;
use lotto_db::models::{Draw, MAX_NUMBER};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Date", "Numéros", "Triés"]);
    for draw in draws {
        table.add_row(vec![
            draw.date().unwrap_or("—").to_string(),
            format_numbers(draw.numbers()),
            format_numbers(&draw.sorted()),
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(load: &DrawBatch, summary: &ReplaceSummary) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", load.total_records);
    println!("  Lignes rejetées   : {}", load.rejected);
    println!("  Insérés           : {}", summary.inserted);
    if summary.skipped > 0 {
        println!("  Tirages invalides : {}", summary.skipped);
    }
    if load.dates.is_none() {
        println!("  (pas de dates dans la source : date du jour utilisée)");
    }
}

pub fn display_report(session: &AnalysisSession) {
    let report = &session.report;
    println!("\n📊 Analyse de {} tirages\n", report.draw_count);

    display_frequencies(report);
    display_probabilities(report);
    display_trends(&report.risers, &report.fallers);
    display_windowed(report.selected_number, &report.windowed);
    display_coldest(&report.coldest);
    display_triplets("🔺 Triplets les plus fréquents", &report.top_triplets);
    display_triplets("🔻 Triplets les plus rares (sortis au moins une fois)", &report.bottom_triplets);
    display_suggestions(&report.suggestions);
}

fn display_frequencies(report: &StatisticsReport) {
    println!("── Numéros les plus fréquents ──");
    let top = &report.top_numbers;
    if top.is_empty() {
        println!("  (Pas de données)");
        return;
    }
    let mut table = new_table(vec!["Numéro", "Fréquence"]);
    for (n, count) in top {
        table.add_row(vec![format!("{:2}", n), count.to_string()]);
    }
    println!("{table}");

    let points: Vec<(f32, f32)> = report
        .frequency
        .iter()
        .map(|(n, c)| (n as f32, c as f32))
        .collect();
    println!("Histogramme des fréquences (1-{}) :", MAX_NUMBER);
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new(120, 40, 1.0, MAX_NUMBER as f32);
    println!("{}", chart.lineplot(&shape));
}

fn display_probabilities(report: &StatisticsReport) {
    if report.probabilities.is_empty() {
        return;
    }
    println!("\n── Probabilité estimée d'apparition ──");
    let points: Vec<(f32, f32)> = report
        .probabilities
        .iter()
        .map(|(&n, &p)| (n as f32, p as f32))
        .collect();
    let shape = textplots::Shape::Lines(&points);
    let mut chart = textplots::Chart::new(120, 40, 1.0, MAX_NUMBER as f32);
    println!("{}", chart.lineplot(&shape));
}

fn display_trends(risers: &[TrendEntry], fallers: &[TrendEntry]) {
    println!("\n── Tendances (première moitié vs seconde moitié) ──");
    let mut table = new_table(vec!["Hausse", "Δ", "Baisse", "Δ"]);
    for i in 0..risers.len().max(fallers.len()) {
        let (rn, rd) = risers
            .get(i)
            .map_or((String::new(), String::new()), |e| (format!("{:2}", e.number), format!("{:+}", e.delta)));
        let (fn_, fd) = fallers
            .get(i)
            .map_or((String::new(), String::new()), |e| (format!("{:2}", e.number), format!("{:+}", e.delta)));
        table.add_row(vec![
            Cell::new(rn),
            Cell::new(rd).fg(Color::Green),
            Cell::new(fn_),
            Cell::new(fd).fg(Color::Red),
        ]);
    }
    println!("{table}");
}

fn display_windowed(number: u8, windowed: &Result<Vec<u32>, AnalysisError>) {
    println!("\n── Apparitions du numéro {} par bloc (ancien → récent) ──", number);
    let series = match windowed {
        Ok(series) => series,
        Err(e) => {
            println!("  Indisponible : {e}");
            return;
        }
    };

    let mut table = new_table(vec!["Bloc", "Apparitions"]);
    for (i, count) in series.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), count.to_string()]);
    }
    println!("{table}");

    if series.len() > 1 {
        let points: Vec<(f32, f32)> = series
            .iter()
            .enumerate()
            .map(|(i, &c)| ((i + 1) as f32, c as f32))
            .collect();
        let shape = textplots::Shape::Lines(&points);
        let mut chart = textplots::Chart::new(120, 40, 1.0, series.len() as f32);
        println!("{}", chart.lineplot(&shape));
    }
}

fn display_coldest(coldest: &[(u8, u32)]) {
    println!("\n🧊 Numéros froids (sortis il y a le plus longtemps)");
    let mut table = new_table(vec!["Numéro", "Tirages depuis la dernière sortie"]);
    for (n, recency) in coldest {
        table.add_row(vec![format!("{:2}", n), recency.to_string()]);
    }
    println!("{table}");
}

fn display_triplets(title: &str, triplets: &[(Triplet, u32)]) {
    println!("\n{title}");
    if triplets.is_empty() {
        println!("  (Pas de données)");
        return;
    }
    let mut table = new_table(vec!["Triplet", "Occurrences"]);
    for (triplet, count) in triplets {
        table.add_row(vec![triplet.to_string(), count.to_string()]);
    }
    println!("{table}");
}

fn display_suggestions(suggestions: &Result<Suggestions, AnalysisError>) {
    println!("\n🎯 Propositions de 6 numéros\n");
    match suggestions {
        Ok(s) => {
            let mut table = new_table(vec!["Vivier", "Numéros"]);
            table.add_row(vec!["🔥 Fréquents".to_string(), format_numbers(&s.frequent)]);
            table.add_row(vec!["❄️ Froids".to_string(), format_numbers(&s.cold)]);
            println!("{table}");
        }
        Err(e) => println!("  Indisponible : {e}"),
    }
}
