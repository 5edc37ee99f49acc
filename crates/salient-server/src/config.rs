//! Server configuration

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf};

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding address
    pub bind: SocketAddr,

    /// Artifact locations loaded once at startup
    pub artifacts: ArtifactConfig,

    /// Explanation cache sizing
    pub cache: CacheConfig,

    /// Performance comparison defaults
    pub performance: PerformanceConfig,
}

/// Locations of the serialized model, explainer and training schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub explainer_path: PathBuf,
    pub columns_path: PathBuf,
}

/// Explanation cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Upper bound on cached explanation vectors. The oldest entry is
    /// evicted first once the bound is reached.
    pub max_entries: usize,
}

/// Performance comparison configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Iterations per mode when the request does not specify a count
    pub default_requests: u32,

    /// Where the text report of the last comparison is written
    pub results_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".parse().unwrap(),
            artifacts: ArtifactConfig::default(),
            cache: CacheConfig::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./artifacts/model.json"),
            explainer_path: PathBuf::from("./artifacts/explainer.json"),
            columns_path: PathBuf::from("./artifacts/columns.json"),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: salient_core::cache::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            default_requests: salient_core::perf::DEFAULT_REQUESTS,
            results_path: PathBuf::from("results.txt"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file, with a `SALIENT_`-prefixed
    /// environment overlay.
    pub fn from_file(path: &PathBuf) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_path()))
            .add_source(config::Environment::with_prefix("SALIENT"))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salient.toml");

        let config = ServerConfig::default();
        config.to_file(&path).unwrap();

        let loaded = ServerConfig::from_file(&path).unwrap();
        assert_eq!(loaded.bind, config.bind);
        assert_eq!(loaded.cache.max_entries, config.cache.max_entries);
        assert_eq!(
            loaded.performance.default_requests,
            config.performance.default_requests
        );
    }
}
