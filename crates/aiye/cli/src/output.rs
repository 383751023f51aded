//! Output formatting utilities

use aiye_types::{
    format_currency, format_percentage, FundingThresholds, HealthThresholds, OrganRecord, Rgb,
    SymptomState, VialRecord,
};
use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => print_json(&data),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Cannot render output: {}", e)),
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Paint text in a display color.
pub fn paint(text: &str, color: Rgb) -> ColoredString {
    let hex = color.to_hex();
    text.truecolor((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

pub fn colorize_state(state: SymptomState) -> ColoredString {
    let label = state.to_string();
    match state {
        SymptomState::Healthy => label.green(),
        SymptomState::Healing => label.yellow(),
        SymptomState::Inflamed => label.red(),
    }
}

/// Table row for organ display
#[derive(Debug, Serialize, Tabled)]
pub struct OrganRow {
    /// Organ ID
    id: String,
    /// Organ name
    name: String,
    /// Organ type
    #[tabled(rename = "type")]
    organ_type: String,
    /// Ecosystem the organ stands for
    ecosystem: String,
    /// Health score
    health: String,
    /// Reported symptom state
    state: String,
    /// Raised / target
    funding: String,
    /// Funding label
    #[tabled(rename = "funding status")]
    funding_status: String,
}

impl OrganRow {
    pub fn new(organ: &OrganRecord, funding: &FundingThresholds) -> Self {
        Self {
            id: organ.id.clone(),
            name: organ.name.clone(),
            organ_type: organ.organ_type.to_string(),
            ecosystem: organ.organ_type.ecosystem().to_string(),
            health: format_percentage(organ.health_score, 0),
            state: organ.symptom_state.to_string(),
            funding: format!(
                "{} / {} ({})",
                format_currency(organ.current_funding_usd, "USD"),
                format_currency(organ.target_funding_usd, "USD"),
                format_percentage(organ.funding_percentage, 1)
            ),
            funding_status: funding.status(organ.funding_percentage).to_string(),
        }
    }
}

/// Table row for vial history display
#[derive(Debug, Serialize, Tabled)]
pub struct VialRow {
    id: String,
    amount: String,
    status: String,
    created: String,
}

impl From<&VialRecord> for VialRow {
    fn from(vial: &VialRecord) -> Self {
        let dash = || "-".to_string();
        Self {
            id: vial.id.clone().unwrap_or_else(dash),
            amount: vial
                .amount
                .map(|a| format_currency(a, vial.currency.as_deref().unwrap_or("USD")))
                .unwrap_or_else(dash),
            status: vial.status.clone().unwrap_or_else(dash),
            created: vial.created_at.clone().unwrap_or_else(dash),
        }
    }
}

/// Print the detail view of a single organ.
pub fn print_organ_detail(
    organ: &OrganRecord,
    health: &HealthThresholds,
    funding: &FundingThresholds,
) {
    let score = format_percentage(organ.health_score, 1);
    println!("{} ({})", organ.name.bold(), organ.id.dimmed());
    println!(
        "  Type:     {} - {}",
        organ.organ_type,
        organ.organ_type.ecosystem()
    );
    println!(
        "  Source:   {} ({})",
        organ.organ_type.data_source(),
        organ.organ_type.trigger_event()
    );
    println!(
        "  Health:   {} {}",
        paint(&score, health.health_color(organ.health_score)),
        colorize_state(organ.symptom_state)
    );
    println!(
        "  Funding:  {} of {} ({}, {})",
        format_currency(organ.current_funding_usd, "USD"),
        format_currency(organ.target_funding_usd, "USD"),
        format_percentage(organ.funding_percentage, 1),
        funding.status(organ.funding_percentage)
    );
}
