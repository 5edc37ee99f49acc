//! Configuration management for the Salient CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of a running Salient server
    pub server_url: String,

    /// Default artifact directory for offline commands
    pub artifacts_dir: PathBuf,

    /// Benchmark defaults
    pub benchmark: BenchmarkConfig,

    /// Dataset generation defaults
    pub generate: GenerateConfig,
}

/// Benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Requests per endpoint
    pub requests: u32,

    /// Output file for the text report
    pub output: PathBuf,
}

/// Dataset generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Number of distinct products in the catalog
    pub products: u32,

    /// Number of sales rows to generate
    pub rows: u32,

    /// Output CSV path
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            artifacts_dir: PathBuf::from("./artifacts"),
            benchmark: BenchmarkConfig::default(),
            generate: GenerateConfig::default(),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            requests: 100,
            output: PathBuf::from("results.txt"),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            products: 1000,
            rows: 200,
            output: PathBuf::from("sales.csv"),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, the first default
    /// location that exists, or fall back to defaults. A `SALIENT_`
    /// environment overlay applies in every case; fields absent from
    /// every source keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(explicit) => {
                builder = builder.add_source(config::File::from(explicit));
            }
            None => {
                for candidate in Self::default_paths() {
                    if candidate.exists() {
                        builder = builder.add_source(config::File::from(candidate.as_path()));
                        break;
                    }
                }
            }
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SALIENT"))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration file")
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./salient.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("salient").join("config.toml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.benchmark.requests, 100);
        assert_eq!(config.generate.products, 1000);
        assert_eq!(config.generate.rows, 200);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = \"http://example:9000\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server_url, "http://example:9000");
        assert_eq!(config.benchmark.requests, 100);
    }
}
