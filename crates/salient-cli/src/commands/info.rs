//! Artifact inspection

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use serde_json::json;
use tracing::debug;

use salient_model::ArtifactBundle;

use crate::commands::Command;
use crate::config::Config;
use crate::utils::print_output;

#[derive(Args, Debug)]
pub struct InfoCommand {
    /// Artifact directory containing model.json, explainer.json and
    /// columns.json (overrides config)
    #[arg(short, long)]
    pub artifacts: Option<PathBuf>,
}

#[async_trait]
impl Command for InfoCommand {
    async fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing info command: {:?}", self);

        let dir = self
            .artifacts
            .clone()
            .unwrap_or_else(|| config.artifacts_dir.clone());

        let bundle = ArtifactBundle::load(
            &dir.join("model.json"),
            &dir.join("explainer.json"),
            &dir.join("columns.json"),
        )
        .with_context(|| format!("Failed to load artifacts from {}", dir.display()))?;

        let schema_head: Vec<&String> = bundle.schema.columns().iter().take(8).collect();
        let info = json!({
            "artifacts_dir": dir.display().to_string(),
            "model_kind": bundle.model.kind(),
            "features": bundle.schema.len(),
            "intercept": bundle.model.intercept(),
            "expected_value": bundle.explainer.expected_value(),
            "schema_head": schema_head,
        });

        print_output(&info, json_output)?;
        Ok(())
    }
}
