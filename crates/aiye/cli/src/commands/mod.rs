//! CLI command implementations

pub mod actions;
pub mod organs;
pub mod watch;

use std::process::ExitCode;
use std::sync::Arc;

use aiye_gateway::HttpGateway;
use aiye_runtime::{AiyeConfig, RuntimeResult, Synchronizer};
use aiye_scene::{OrganModels, SceneRenderer};

use crate::output::OutputFormat;
use crate::panel::TerminalPanel;

/// Everything a command needs.
pub struct Context {
    pub config: AiyeConfig,
    pub gateway: Arc<HttpGateway>,
    pub format: OutputFormat,
}

impl Context {
    /// A synchronizer printing to the terminal, over a placeholder scene.
    pub fn synchronizer(&self) -> Arc<Synchronizer> {
        self.synchronizer_with(self.config.clone())
    }

    pub fn synchronizer_with(&self, config: AiyeConfig) -> Arc<Synchronizer> {
        let renderer = Arc::new(SceneRenderer::with_selection_scale(
            OrganModels::placeholders(),
            config.visuals.selection_scale,
        ));
        let panel = Arc::new(TerminalPanel::new(
            self.format,
            config.health_thresholds,
            config.funding_thresholds,
        ));
        Synchronizer::new(self.gateway.clone(), renderer, panel, config)
    }
}

/// Failures from the synchronizer have already been shown by the panel;
/// only the exit status is left to report.
pub fn exit_code<T>(result: RuntimeResult<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
