//! Configuration for the Aiye runtime

use std::time::Duration;

use aiye_gateway::{GatewayOptions, DEFAULT_BASE_URL};
use aiye_types::{FundingThresholds, HealthThresholds};
use serde::{Deserialize, Serialize};

/// Main runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiyeConfig {
    /// Gateway connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Background organ refresh
    #[serde(default)]
    pub auto_update: AutoUpdateConfig,

    /// Score boundaries between symptom states
    #[serde(default)]
    pub health_thresholds: HealthThresholds,

    /// Funding percentage boundaries
    #[serde(default)]
    pub funding_thresholds: FundingThresholds,

    /// Vial payment form limits
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Restoration photo limits
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Scene presentation
    #[serde(default)]
    pub visuals: VisualsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gateway connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Total attempts for reads that fail at the network level
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Linear backoff step between attempts, in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl ApiConfig {
    pub fn gateway_options(&self) -> GatewayOptions {
        GatewayOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            retry_attempts: self.retry_attempts,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }
}

/// Auto update configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoUpdateConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Poll interval in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Start polling as part of `init`
    #[serde(default = "default_true")]
    pub on_startup: bool,
}

impl Default for AutoUpdateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
            on_startup: true,
        }
    }
}

impl AutoUpdateConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Payment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    #[serde(default = "default_currency")]
    pub default_currency: String,

    #[serde(default = "default_min_amount")]
    pub min_amount: f64,

    #[serde(default = "default_max_amount")]
    pub max_amount: f64,

    #[serde(default = "default_amount")]
    pub default_amount: f64,

    /// Delay before organs are reloaded after a checkout link is opened
    #[serde(default = "default_reload_delay_ms")]
    pub reload_delay_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            min_amount: default_min_amount(),
            max_amount: default_max_amount(),
            default_amount: default_amount(),
            reload_delay_ms: default_reload_delay_ms(),
        }
    }
}

impl PaymentConfig {
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

/// Verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Maximum image size in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Accepted MIME types
    #[serde(default = "default_accepted_formats")]
    pub accepted_formats: Vec<String>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            accepted_formats: default_accepted_formats(),
        }
    }
}

/// Visuals configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualsConfig {
    /// Scale factor applied to the selected organ
    #[serde(default = "default_selection_scale")]
    pub selection_scale: f32,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            selection_scale: default_selection_scale(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_interval_ms() -> u64 {
    300_000
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_min_amount() -> f64 {
    1.0
}

fn default_max_amount() -> f64 {
    1_000_000.0
}

fn default_amount() -> f64 {
    100.0
}

fn default_reload_delay_ms() -> u64 {
    10_000
}

fn default_max_image_bytes() -> usize {
    50 * 1024 * 1024 // 50MB
}

fn default_accepted_formats() -> Vec<String> {
    ["image/jpeg", "image/png", "image/webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_selection_scale() -> f32 {
    1.1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AiyeConfig {
    /// Load configuration: defaults, then the optional file, then `AIYE_`
    /// environment variables (`AIYE_API__BASE_URL`, ...).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&AiyeConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with AIYE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("AIYE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("verification.accepted_formats")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
