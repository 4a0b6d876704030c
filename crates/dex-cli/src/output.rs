//! Plain-text, JSON and CSV renderings of catalog entries and detail reports.

use std::fmt::Write as _;

use clap::ValueEnum;
use dex_client::{DetailReport, StageFailure};
use dex_core::{BaseStats, EvolutionStage, PokemonProfile, PokemonSummary};
use serde::Serialize;

/// Output format for commands that print catalog entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for humans.
    #[default]
    Table,
    /// Pretty-printed JSON array.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

const NAME_WIDTH: usize = 16;
const TYPES_WIDTH: usize = 18;

/// Renders `entries` in `format`. `is_favorite` marks rows in the table
/// format with a star.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_entries(
    entries: &[&PokemonSummary],
    format: OutputFormat,
    is_favorite: impl Fn(u32) -> bool,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(entries, is_favorite)),
        OutputFormat::Json => serde_json::to_string_pretty(entries),
        OutputFormat::Csv => Ok(render_csv(entries)),
    }
}

fn render_table(entries: &[&PokemonSummary], is_favorite: impl Fn(u32) -> bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<NAME_WIDTH$} {:<TYPES_WIDTH$} {:>5}",
        "ID", "NAME", "TYPES", "TOTAL"
    );

    for summary in entries {
        let mut marker = String::new();
        if is_favorite(summary.id) {
            marker.push_str(" ★");
        }
        if summary.is_legendary {
            marker.push_str(" ◆");
        }
        let _ = writeln!(
            out,
            "{:<5} {:<NAME_WIDTH$} {:<TYPES_WIDTH$} {:>5}{marker}",
            format!("#{:03}", summary.id),
            summary.name,
            summary.type_labels(),
            summary.total(),
        );
    }
    out
}

fn render_csv(entries: &[&PokemonSummary]) -> String {
    let mut out = String::from(
        "id,name,types,hp,attack,defense,special_attack,special_defense,speed,total,legendary\n",
    );
    for summary in entries {
        let stats = summary
            .stats
            .values()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(
            out,
            "{},{},{},{stats},{},{}",
            summary.id,
            escape_csv(&summary.name),
            escape_csv(&summary.type_labels()),
            summary.total(),
            summary.is_legendary,
        );
    }
    out
}

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// JSON shape of a detail report. Failed stages appear as error strings.
#[derive(Debug, Serialize)]
pub struct DetailJson<'a> {
    #[serde(flatten)]
    profile: &'a PokemonProfile,
    favorite: bool,
    description: StageJson<Option<&'a str>>,
    evolution: StageJson<&'a [EvolutionStage]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum StageJson<T> {
    Value(T),
    Error(String),
}

impl<T> StageJson<T> {
    fn new<'a, U>(result: &'a Result<U, StageFailure>, value: impl FnOnce(&'a U) -> T) -> Self {
        match result {
            Ok(inner) => Self::Value(value(inner)),
            Err(failure) => Self::Error(failure.to_string()),
        }
    }
}

impl<'a> DetailJson<'a> {
    /// Borrows the parts of `report` worth printing.
    #[must_use]
    pub fn new(report: &'a DetailReport, favorite: bool) -> Self {
        Self {
            profile: &report.profile,
            favorite,
            description: StageJson::new(&report.species, |info| info.description.as_deref()),
            evolution: StageJson::new(&report.evolution, Vec::as_slice),
        }
    }
}

/// Renders a detail report as labelled sections. Failed species or
/// evolution stages are reported in place of their section.
#[must_use]
pub fn render_detail(report: &DetailReport, favorite: bool) -> String {
    let profile = &report.profile;
    let summary = &profile.summary;
    let mut out = String::new();

    let star = if favorite { " ★" } else { "" };
    let _ = writeln!(out, "#{:03} {}{star}", summary.id, summary.name);
    let _ = writeln!(out, "Types:      {}", summary.type_labels());
    let _ = writeln!(out, "Height:     {:.1} m", profile.height_m());
    let _ = writeln!(out, "Weight:     {:.1} kg", profile.weight_kg());
    let _ = writeln!(out, "Abilities:  {}", profile.abilities.join(", "));
    let _ = writeln!(
        out,
        "Legendary:  {}",
        if summary.is_legendary { "yes" } else { "no" }
    );

    out.push_str("\nBase stats\n");
    for (label, value) in BaseStats::LABELS.iter().zip(summary.stats.values()) {
        let _ = writeln!(out, "  {label:<10}{value:>4}");
    }
    let _ = writeln!(out, "  {:<10}{:>4}", "Total", summary.total());

    out.push_str("\nDescription\n");
    match &report.species {
        Ok(info) => {
            let text = info.description.as_deref().unwrap_or("No description available");
            let _ = writeln!(out, "  {text}");
        }
        Err(failure) => {
            let _ = writeln!(out, "  unavailable: {failure}");
        }
    }

    out.push_str("\nEvolution\n");
    match &report.evolution {
        Ok(chain) => {
            for stage in chain {
                let current = if stage.id == summary.id { "  <" } else { "" };
                let _ = writeln!(out, "  #{:03} {}{current}", stage.id, stage.name);
            }
        }
        Err(failure) => {
            let _ = writeln!(out, "  unavailable: {failure}");
        }
    }
    out
}
