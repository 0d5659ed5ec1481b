//! Configuration management
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! then `MOVIE_PREDICTOR__SECTION__KEY` environment variables.

use crate::error::Result;
use serde::Deserialize;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MOVIE_PREDICTOR";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

/// Heuristic estimator settings
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Standard deviation of the revenue perturbation around 1.0
    #[serde(default = "default_variation_std_dev")]
    pub variation_std_dev: f64,
    /// Fixed seed for reproducible draws
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            variation_std_dev: default_variation_std_dev(),
            seed: None,
        }
    }
}

fn default_variation_std_dev() -> f64 {
    0.15
}

/// Web dashboard settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Predictions kept in memory for the history view
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_history_limit() -> usize {
    100
}

/// Trained-model settings
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// CSV dataset; `~` is expanded
    #[serde(default)]
    pub dataset_path: Option<String>,
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            n_estimators: default_n_estimators(),
            learning_rate: default_learning_rate(),
            max_depth: default_max_depth(),
            min_samples_leaf: default_min_samples_leaf(),
        }
    }
}

impl ModelConfig {
    /// Dataset path with `~` and environment variables expanded
    pub fn resolved_dataset_path(&self) -> Option<String> {
        self.dataset_path.as_deref().map(expand_path)
    }
}

fn default_n_estimators() -> usize {
    200
}

fn default_learning_rate() -> f64 {
    0.05
}

fn default_max_depth() -> usize {
    4
}

fn default_min_samples_leaf() -> usize {
    5
}

/// Expand `~` and `$VARS` in a user-supplied path, leaving it untouched on failure
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(path: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
