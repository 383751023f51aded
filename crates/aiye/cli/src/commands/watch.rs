//! Live monitoring: keep polling the gateway and animating the scene
//! until interrupted.

use std::process::ExitCode;
use std::time::Duration;

use aiye_runtime::UserIntent;
use anyhow::Result;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::Context;
use crate::output::print_info;

const FRAME: Duration = Duration::from_millis(100);

pub async fn run(ctx: &Context, interval_ms: Option<u64>, select: Option<String>) -> Result<ExitCode> {
    let mut config = ctx.config.clone();
    config.auto_update.enabled = true;
    config.auto_update.on_startup = true;
    if let Some(ms) = interval_ms {
        config.auto_update.interval_ms = ms;
    }
    let period = config.auto_update.interval();

    let sync = ctx.synchronizer_with(config);
    sync.init().await;
    if let Some(id) = select {
        sync.dispatch(UserIntent::Select(id)).await?;
    }
    print_info(&format!(
        "Watching {} every {:?} (Ctrl+C to stop)",
        ctx.gateway.base_url(),
        period
    ));

    let started = Instant::now();
    let mut frames = time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = frames.tick() => sync.advance(started.elapsed().as_secs_f32()),
            signal = &mut shutdown => {
                signal?;
                break;
            }
        }
    }

    sync.stop_polling();
    print_info("Stopped watching");
    Ok(ExitCode::SUCCESS)
}
