//! Engine configuration.

use mindscape_analysis::{AnalyzerConfig, DimensionWeights};
use mindscape_layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::STORAGE_KEY;

/// Environment variable prefix (`MINDSCAPE_REMOTE__MODEL=...`)
pub const ENV_PREFIX: &str = "MINDSCAPE";

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule-based analyzer weights
    pub analyzer: AnalyzerConfig,

    /// Persona dimension weights
    pub dimensions: DimensionWeights,

    /// Layout constants
    pub layout: LayoutConfig,

    /// Batch ingestion limits
    pub ingestion: IngestionConfig,

    /// Remote chat-completions analyzer
    pub remote: RemoteConfig,

    /// Post persistence
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Maximum lines analyzed per batch
    pub max_batch: usize,

    /// Try the remote analyzer before the rule-based one
    pub use_remote: bool,

    /// Remote analyzer deadline (milliseconds)
    pub remote_timeout_ms: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_batch: 50,
            use_remote: true,
            remote_timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Full chat-completions URL
    pub endpoint: String,

    /// Model name sent with each request
    pub model: String,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Name of the environment variable holding the bearer token
    pub api_key_env: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 2000,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the JSON file store
    pub directory: PathBuf,

    /// Blob key; the file is `<directory>/<key>.json`
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            key: STORAGE_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from file, overridden by `MINDSCAPE_*` variables
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.ingestion.max_batch, 50);
        assert_eq!(config.remote.model, "gpt-4o");
        assert_eq!(config.remote.max_tokens, 2000);
        assert_eq!(config.storage.key, "inside_out_memories");
    }

    #[test]
    fn test_from_file_fills_missing_sections() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[ingestion]
max_batch = 10

[dimensions]
confidence_hedging = 0.8
confidence_achievement = 0.2

[layout]
tower_radius = 20.0
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = EngineConfig::from_file(&path).unwrap();

        assert_eq!(config.ingestion.max_batch, 10);
        assert_eq!(config.ingestion.remote_timeout_ms, 30_000);
        assert_eq!(config.dimensions.confidence_hedging, 0.8);
        assert_eq!(config.dimensions.warmth_relationship, 0.6);
        assert_eq!(config.layout.tower_radius, 20.0);
        assert_eq!(config.analyzer, AnalyzerConfig::default());
        assert_eq!(config.remote, RemoteConfig::default());
    }

    #[test]
    fn test_from_env_reads_nested_keys() {
        std::env::set_var("MINDSCAPE_STORAGE__KEY", "env_memories");
        let config = EngineConfig::from_env();
        std::env::remove_var("MINDSCAPE_STORAGE__KEY");

        let config = config.unwrap();
        assert_eq!(config.storage.key, "env_memories");
        assert_eq!(config.storage.directory, PathBuf::from("data"));
    }
}
