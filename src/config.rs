use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub conceptnet: ConceptNetConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relation API (ConceptNet) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptNetConfig {
    /// Concept lookup root; the concept is appended as the last path segment.
    #[serde(default = "default_conceptnet_base_url")]
    pub base_url: String,
    /// Prefix prepended to API ids (`/c/en/dog`) to mint IRIs.
    #[serde(default = "default_conceptnet_namespace")]
    pub namespace: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Upper bound on pages requested for a single concept.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConceptNetConfig {
    fn default() -> Self {
        Self {
            base_url: default_conceptnet_base_url(),
            namespace: default_conceptnet_namespace(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Triple store (Fuseki) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// IRI bound to the `cn:` prefix in the expansion query.
    #[serde(default = "default_concept_prefix")]
    pub concept_prefix: String,
    #[serde(default = "default_query_limit")]
    pub query_limit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_store_endpoint(),
            dataset: default_dataset(),
            concept_prefix: default_concept_prefix(),
            query_limit: default_query_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Object detector configuration
///
/// The detector is an external program invoked as `command args... <image>`
/// that prints one label per line on stdout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionConfig {
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_conceptnet_base_url() -> String {
    "https://api.conceptnet.io/c/en".to_string()
}

fn default_conceptnet_namespace() -> String {
    "http://conceptnet.io".to_string()
}

fn default_page_size() -> usize {
    2000
}

fn default_max_pages() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_store_endpoint() -> String {
    "http://localhost:3030".to_string()
}

fn default_dataset() -> String {
    "yolo".to_string()
}

fn default_concept_prefix() -> String {
    "http://conceptnet.io/c/en/".to_string()
}

fn default_query_limit() -> usize {
    1000
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in CONCEPTKG_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory (defaults are used when absent)
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config = match std::env::var("CONCEPTKG_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let path = PathBuf::from("config.toml");
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Config::default()
                }
            }
        };

        config.validate()?;

        Ok(config)
    }

    /// Read and parse a TOML config file without validating it
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.conceptnet.base_url)
            .with_context(|| format!("conceptnet.base_url is not a valid URL: {}", self.conceptnet.base_url))?;

        url::Url::parse(&self.store.endpoint)
            .with_context(|| format!("store.endpoint is not a valid URL: {}", self.store.endpoint))?;

        if self.conceptnet.page_size == 0 {
            anyhow::bail!("conceptnet.page_size must be greater than 0");
        }

        if self.conceptnet.max_pages == 0 {
            anyhow::bail!("conceptnet.max_pages must be greater than 0");
        }

        if self.conceptnet.timeout_secs == 0 || self.store.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0 (requests must not hang indefinitely)");
        }

        if self.store.query_limit == 0 {
            anyhow::bail!("store.query_limit must be greater than 0");
        }

        let dataset = self.store.dataset.trim();
        if dataset.is_empty() || dataset.contains('/') {
            anyhow::bail!(
                "store.dataset must be a single path segment, got: {:?}",
                self.store.dataset
            );
        }

        if let Some(command) = &self.detection.command {
            if command.trim().is_empty() {
                anyhow::bail!("detection.command must not be empty when set");
            }
        }

        Ok(())
    }
}
