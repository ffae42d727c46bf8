//! AWS provider configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Errors loading provider configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Tag keys the provider should never surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IgnoreTagsConfig {
    /// Exact tag keys to ignore
    #[serde(default)]
    pub keys: Vec<String>,
    /// Tag key prefixes to ignore
    #[serde(default)]
    pub key_prefixes: Vec<String>,
}

impl IgnoreTagsConfig {
    pub fn is_ignored(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
            || self.key_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

/// Configuration of the AWS provider
///
/// ```json
/// {
///   "region": "aws.Region.ap_northeast_1",
///   "ignore_tags": { "keys": ["CostCenter"], "key_prefixes": ["kubernetes.io/"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsProviderConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override (e.g., LocalStack)
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub ignore_tags: IgnoreTagsConfig,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for AwsProviderConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            ignore_tags: IgnoreTagsConfig::default(),
        }
    }
}

impl AwsProviderConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_ignore_tags(mut self, ignore_tags: IgnoreTagsConfig) -> Self {
        self.ignore_tags = ignore_tags;
        self
    }

    /// Region in AWS format
    pub fn aws_region(&self) -> String {
        normalize_region(&self.region)
    }
}

/// Normalize region string to AWS format (hyphens)
/// - "aws.Region.ap_northeast_1" -> "ap-northeast-1"
/// - "ap_northeast_1" -> "ap-northeast-1"
/// - "ap-northeast-1" -> "ap-northeast-1"
pub fn normalize_region(s: &str) -> String {
    let region_part = if s.contains('.') {
        s.split('.').next_back().unwrap_or(s)
    } else {
        s
    };
    region_part.replace('_', "-")
}
