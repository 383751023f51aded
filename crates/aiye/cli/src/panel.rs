//! Terminal implementation of the status/action panel.

use aiye_runtime::{Notification, Panel, PanelAction, Severity};
use aiye_types::{
    FundingThresholds, HealthThresholds, OrganRecord, PaymentLink, QuotaStatus,
    VerificationOutcome, VialRecord,
};
use colored::*;
use serde_json::Value;

use crate::output::{
    self, print_error, print_info, print_json, print_success, print_warning, OrganRow,
    OutputFormat, VialRow,
};

/// Prints whatever the synchronizer publishes.
pub struct TerminalPanel {
    format: OutputFormat,
    health: HealthThresholds,
    funding: FundingThresholds,
}

impl TerminalPanel {
    pub fn new(format: OutputFormat, health: HealthThresholds, funding: FundingThresholds) -> Self {
        Self {
            format,
            health,
            funding,
        }
    }
}

impl Panel for TerminalPanel {
    fn update_organs(&self, organs: &[OrganRecord]) {
        let rows = organs
            .iter()
            .map(|organ| OrganRow::new(organ, &self.funding))
            .collect();
        output::print_output::<OrganRow>(rows, self.format);
    }

    fn update_quota(&self, quota: &QuotaStatus) {
        match self.format {
            OutputFormat::Json => print_json(quota),
            OutputFormat::Table => match quota.calls_remaining() {
                _ if quota.is_exceeded() => print_warning("Diagnostic quota exhausted"),
                Some(remaining) => print_info(&format!("{} diagnostic calls remaining", remaining)),
                None => print_info(&format!("Quota: {}", quota.raw())),
            },
        }
    }

    fn show_selection(&self, organ: &OrganRecord) {
        if self.format == OutputFormat::Table {
            output::print_organ_detail(organ, &self.health, &self.funding);
        }
    }

    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => print_success(&notification.message),
            Severity::Error => print_error(&notification.message),
            Severity::Info => print_info(&notification.message),
        }
    }

    fn set_busy(&self, action: PanelAction, busy: bool) {
        if !busy {
            return;
        }
        let label = match action {
            PanelAction::DiagnoseAll => "Running diagnostic scan...",
            PanelAction::Diagnose => "Diagnosing organ...",
            PanelAction::Pay => "Initializing payment...",
            PanelAction::Verify => "Verifying restoration...",
        };
        println!("{}", label.dimmed());
    }

    fn open_payment_link(&self, organ_id: &str, link: &PaymentLink) {
        match self.format {
            OutputFormat::Json => print_json(link),
            OutputFormat::Table => {
                println!("Complete the payment for {} at:", organ_id);
                println!("  {}", link.payment_link.underline());
            }
        }
    }

    fn show_verification(&self, _organ_id: &str, outcome: &VerificationOutcome) {
        if self.format == OutputFormat::Json {
            print_json(outcome);
            return;
        }

        let verdict = &outcome.verification;
        let headline = if verdict.verified {
            "VERIFIED".green().bold()
        } else {
            "REJECTED".red().bold()
        };
        println!("{}", headline);
        if !verdict.analysis.is_empty() {
            println!("  {}", verdict.analysis);
        }
        let transition = match (outcome.previous_state, outcome.new_state) {
            (Some(from), Some(to)) => format!(" | {} -> {}", from, to),
            _ => String::new(),
        };
        println!(
            "  {}",
            format!("Confidence: {}%{}", verdict.confidence, transition).dimmed()
        );
    }

    fn show_vial_history(&self, _organ_id: &str, vials: &[VialRecord]) {
        match self.format {
            OutputFormat::Json => print_json(vials),
            OutputFormat::Table => {
                output::print_output(vials.iter().map(VialRow::from).collect(), self.format)
            }
        }
    }

    fn show_diagnosis(&self, _organ_id: Option<&str>, report: &Value) {
        if !report.is_null() {
            print_json(report);
        }
    }
}
