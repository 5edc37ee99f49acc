//! HTTP benchmark client
//!
//! Drives a running Salient server over HTTP, issuing repeated requests
//! against the plain and the cached-explanation endpoints and averaging
//! the server-reported execution time and peak memory per mode.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use serde::Deserialize;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::{debug, warn};

use crate::commands::Command;
use crate::config::Config;
use crate::utils::{create_progress_bar, format_bytes, print_output, print_success};

#[derive(Args, Debug)]
pub struct BenchmarkCommand {
    /// Base URL of the server (overrides config)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Product name sent with every request
    #[arg(long, default_value = "Produto_1")]
    pub product: String,

    /// Month sent with every request
    #[arg(long, default_value = "1")]
    pub month: i64,

    /// Number of requests per endpoint
    #[arg(short, long)]
    pub requests: Option<u32>,

    /// Output file for the text report
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Averages for one endpoint, computed from server-reported figures.
#[derive(Debug)]
struct EndpointStats {
    requests: u32,
    failures: u32,
    avg_time: f64,
    avg_memory: f64,
}

/// The server-reported fields every prediction endpoint returns.
#[derive(Debug, Deserialize)]
struct ServerTimings {
    execution_time: f64,
    memory_usage: f64,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Without SHAP")]
    without_shap: String,
    #[tabled(rename = "With SHAP (cache)")]
    with_shap: String,
}

#[async_trait]
impl Command for BenchmarkCommand {
    async fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing benchmark command: {:?}", self);

        let base_url = self
            .url
            .clone()
            .unwrap_or_else(|| config.server_url.clone());
        let requests = self.requests.unwrap_or(config.benchmark.requests).max(1);
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.benchmark.output.clone());

        let body = json!({ "produto": self.product, "mes": self.month });
        let client = reqwest::Client::new();

        let plain = self
            .measure_endpoint(&client, &base_url, "/predict", &body, requests)
            .await?;
        let explained = self
            .measure_endpoint(&client, &base_url, "/predict_with_shap", &body, requests)
            .await?;

        let time_gain = plain.avg_time - explained.avg_time;
        let memory_savings = plain.avg_memory - explained.avg_memory;
        let memory_savings_percentage = if plain.avg_memory > 0.0 {
            100.0 * memory_savings / plain.avg_memory
        } else {
            0.0
        };

        let report = render_report(&plain, &explained, time_gain, memory_savings, memory_savings_percentage);
        std::fs::write(&output, &report)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;

        if json_output {
            let results = json!({
                "requests_per_endpoint": requests,
                "average_time_without_shap": plain.avg_time,
                "average_time_with_shap": explained.avg_time,
                "average_memory_without_shap": plain.avg_memory,
                "average_memory_with_shap": explained.avg_memory,
                "time_gain_with_shap": time_gain,
                "memory_savings_with_shap": memory_savings,
                "memory_savings_percentage_with_shap": memory_savings_percentage,
                "failures_without_shap": plain.failures,
                "failures_with_shap": explained.failures,
                "report_path": output.display().to_string(),
            });
            print_output(&results, true)?;
        } else {
            self.print_results(&plain, &explained, time_gain);
            print_success(&format!("Report written to {}", output.display()));
        }

        Ok(())
    }
}

impl BenchmarkCommand {
    /// Issue `requests` POSTs against one endpoint and average the
    /// server-reported figures over the successful responses. Failed
    /// requests are counted and reported, never retried.
    async fn measure_endpoint(
        &self,
        client: &reqwest::Client,
        base_url: &str,
        endpoint: &'static str,
        body: &serde_json::Value,
        requests: u32,
    ) -> Result<EndpointStats> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), endpoint);
        let pb = create_progress_bar(requests as u64, endpoint);

        let mut total_time = 0.0;
        let mut total_memory = 0.0;
        let mut failures = 0u32;

        for i in 0..requests {
            let response = client
                .post(&url)
                .json(body)
                .send()
                .await
                .with_context(|| format!("Request to {} failed", url))?;

            if response.status().is_success() {
                let timings: ServerTimings = response
                    .json()
                    .await
                    .with_context(|| format!("Invalid response body from {}", url))?;
                total_time += timings.execution_time;
                total_memory += timings.memory_usage;
            } else {
                failures += 1;
                warn!(status = %response.status(), url = %url, "request failed");
            }
            pb.set_position(i as u64 + 1);
        }

        pb.finish_with_message(format!("{} done", endpoint));

        let successes = requests - failures;
        anyhow::ensure!(successes > 0, "Every request to {} failed", url);

        Ok(EndpointStats {
            requests,
            failures,
            avg_time: total_time / successes as f64,
            avg_memory: total_memory / successes as f64,
        })
    }

    fn print_results(&self, plain: &EndpointStats, explained: &EndpointStats, time_gain: f64) {
        let rows = vec![
            ComparisonRow {
                metric: "Average time".to_string(),
                without_shap: format!("{:.4} s", plain.avg_time),
                with_shap: format!("{:.4} s", explained.avg_time),
            },
            ComparisonRow {
                metric: "Average memory".to_string(),
                without_shap: format_bytes(plain.avg_memory),
                with_shap: format_bytes(explained.avg_memory),
            },
            ComparisonRow {
                metric: "Failures".to_string(),
                without_shap: plain.failures.to_string(),
                with_shap: explained.failures.to_string(),
            },
        ];

        println!();
        println!("{}", Table::new(rows));
        println!();
        println!(
            "Time gain with SHAP (cache): {:.4} seconds over {} requests",
            time_gain, plain.requests
        );
    }
}

fn render_report(
    plain: &EndpointStats,
    explained: &EndpointStats,
    time_gain: f64,
    memory_savings: f64,
    memory_savings_percentage: f64,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Average time without SHAP: {:.4} seconds\n",
        plain.avg_time
    ));
    out.push_str(&format!(
        "Average time with SHAP: {:.4} seconds\n",
        explained.avg_time
    ));
    out.push_str(&format!(
        "Average memory without SHAP: {:.2} bytes\n",
        plain.avg_memory
    ));
    out.push_str(&format!(
        "Average memory with SHAP: {:.2} bytes\n",
        explained.avg_memory
    ));
    out.push_str(&format!(
        "Time gain with SHAP: {:.4} seconds\n",
        time_gain
    ));
    out.push_str(&format!(
        "Memory savings with SHAP: {:.2} bytes\n",
        memory_savings
    ));
    out.push_str(&format!(
        "Memory savings percentage with SHAP: {:.2}%\n",
        memory_savings_percentage
    ));
    out.push_str(&format!(
        "Requests per endpoint: {} ({} failed without SHAP, {} failed with SHAP)\n",
        plain.requests, plain.failures, explained.failures
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(avg_time: f64, avg_memory: f64) -> EndpointStats {
        EndpointStats {
            requests: 10,
            failures: 0,
            avg_time,
            avg_memory,
        }
    }

    #[test]
    fn report_carries_all_figures() {
        let report = render_report(&stats(0.002, 4096.0), &stats(0.001, 2048.0), 0.001, 2048.0, 50.0);

        assert!(report.contains("Average time without SHAP: 0.0020 seconds"));
        assert!(report.contains("Average time with SHAP: 0.0010 seconds"));
        assert!(report.contains("Memory savings percentage with SHAP: 50.00%"));
        assert_eq!(report.lines().count(), 8);
    }
}
