//! Commands that act on an organ through the synchronizer

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use aiye_runtime::{ImageUpload, PaymentForm, Synchronizer, UserIntent, VerificationForm};
use anyhow::{bail, Result};

use super::{exit_code, Context};

/// Load the organ set and select `organ_id`, the way a click would.
async fn select(sync: &Arc<Synchronizer>, organ_id: &str) -> Result<Option<ExitCode>> {
    if sync.load_organs().await.is_err() {
        return Ok(Some(ExitCode::FAILURE));
    }
    if sync.select_organ(organ_id).is_none() {
        bail!("Organ '{}' not found", organ_id);
    }
    Ok(None)
}

/// Run a diagnostic scan over every organ, or one of them
pub async fn diagnose(ctx: &Context, organ_id: Option<String>) -> Result<ExitCode> {
    let sync = ctx.synchronizer();
    let intent = match organ_id {
        Some(id) => {
            if let Some(code) = select(&sync, &id).await? {
                return Ok(code);
            }
            UserIntent::Diagnose(id)
        }
        None => UserIntent::DiagnoseAll,
    };
    Ok(exit_code(sync.dispatch(intent).await))
}

pub async fn pay(
    ctx: &Context,
    organ_id: &str,
    amount: Option<f64>,
    currency: Option<String>,
    email: String,
    name: String,
) -> Result<ExitCode> {
    let sync = ctx.synchronizer();
    if let Some(code) = select(&sync, organ_id).await? {
        return Ok(code);
    }

    let form = PaymentForm {
        amount: amount.unwrap_or(ctx.config.payment.default_amount),
        currency,
        email,
        name,
    };
    Ok(exit_code(sync.dispatch(UserIntent::Pay(form)).await))
}

pub async fn verify(
    ctx: &Context,
    organ_id: &str,
    image: &Path,
    ngo_name: String,
    description: String,
) -> Result<ExitCode> {
    let image = ImageUpload::from_path(image, ctx.config.verification.max_image_bytes)?;
    let sync = ctx.synchronizer();
    if let Some(code) = select(&sync, organ_id).await? {
        return Ok(code);
    }

    let form = VerificationForm {
        image,
        ngo_name,
        description,
    };
    Ok(exit_code(sync.dispatch(UserIntent::Verify(form)).await))
}
