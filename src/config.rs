use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use ragchat_core::search::SearchParams;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            score_threshold: default_score_threshold(),
        }
    }
}

fn default_top_k() -> usize {
    6
}
fn default_score_threshold() -> f64 {
    0.2
}

impl RetrievalConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            k: self.top_k,
            score_threshold: self.score_threshold,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Simulated document lookup latency.
    #[serde(default = "default_retrieval_delay_ms")]
    pub retrieval_delay_ms: u64,
    /// Simulated answer generation latency.
    #[serde(default = "default_generation_delay_ms")]
    pub generation_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            retrieval_delay_ms: default_retrieval_delay_ms(),
            generation_delay_ms: default_generation_delay_ms(),
        }
    }
}

fn default_retrieval_delay_ms() -> u64 {
    800
}
fn default_generation_delay_ms() -> u64 {
    1200
}

impl ChatConfig {
    pub fn retrieval_delay(&self) -> Duration {
        Duration::from_millis(self.retrieval_delay_ms)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Defaults for every section; used when no config file is given.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.retrieval.top_k < 1 {
            anyhow::bail!("retrieval.top_k must be >= 1");
        }

        let threshold = self.retrieval.score_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            anyhow::bail!("retrieval.score_threshold must be a finite number >= 0.0");
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Unknown logging.level: '{}'. Must be one of {}.",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}
