//! Read-only gateway commands

use std::process::ExitCode;

use aiye_gateway::Gateway;
use anyhow::Result;
use colored::*;

use super::Context;
use crate::output::{
    self, print_error, print_info, print_json, print_organ_detail, print_success, print_warning,
    OrganRow, OutputFormat, VialRow,
};

/// Check gateway connectivity
pub async fn status(ctx: &Context) -> Result<ExitCode> {
    match ctx.gateway.health_check().await {
        Ok(health) => {
            if ctx.format == OutputFormat::Json {
                print_json(&health);
            } else {
                print_success("Aiye gateway is healthy");
                println!("  Endpoint: {}", ctx.gateway.base_url());
                println!(
                    "  Status: {}",
                    health.status.as_deref().unwrap_or("unknown").green()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_error(&format!("Cannot reach Aiye gateway: {}", e));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// List every organ
pub async fn list(ctx: &Context) -> Result<ExitCode> {
    let organs = ctx.gateway.list_organs().await?;
    let rows = organs
        .iter()
        .map(|organ| OrganRow::new(organ, &ctx.config.funding_thresholds))
        .collect();
    output::print_output::<OrganRow>(rows, ctx.format);
    Ok(ExitCode::SUCCESS)
}

/// Show one organ
pub async fn get(ctx: &Context, organ_id: &str) -> Result<ExitCode> {
    let organ = ctx.gateway.get_organ(organ_id).await?;
    match ctx.format {
        OutputFormat::Json => print_json(&organ),
        OutputFormat::Table => print_organ_detail(
            &organ,
            &ctx.config.health_thresholds,
            &ctx.config.funding_thresholds,
        ),
    }
    Ok(ExitCode::SUCCESS)
}

/// Show the diagnostic quota
pub async fn quota(ctx: &Context) -> Result<ExitCode> {
    let quota = ctx.gateway.quota_status().await?;
    match ctx.format {
        OutputFormat::Json => print_json(&quota),
        OutputFormat::Table => {
            if quota.is_exceeded() {
                print_warning("Diagnostic quota exhausted");
            } else if let Some(remaining) = quota.calls_remaining() {
                print_info(&format!("{} diagnostic calls remaining", remaining));
            }
            print_json(quota.raw());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Show payment history for an organ
pub async fn vials(ctx: &Context, organ_id: &str) -> Result<ExitCode> {
    let vials = ctx.gateway.vials_for_organ(organ_id).await?;
    match ctx.format {
        OutputFormat::Json => print_json(&vials),
        OutputFormat::Table => {
            output::print_output(vials.iter().map(VialRow::from).collect(), ctx.format)
        }
    }
    Ok(ExitCode::SUCCESS)
}
