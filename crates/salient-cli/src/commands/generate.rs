//! Synthetic sales dataset generation
//!
//! Produces a random tabular dataset for offline use: product names,
//! five-digit codes, categories, prices, quantities and sale dates,
//! written as CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use clap::Args;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::commands::Command;
use crate::config::Config;
use crate::utils::print_success;

const CATEGORIES: [&str; 3] = ["Tipo_1", "Tipo_2", "Tipo_3"];

#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Number of distinct products in the catalog
    #[arg(long)]
    pub products: Option<u32>,

    /// Number of sales rows to generate
    #[arg(long)]
    pub rows: Option<u32>,

    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[async_trait]
impl Command for GenerateCommand {
    async fn execute(&self, config: &Config, _json_output: bool) -> Result<()> {
        debug!("Executing generate command: {:?}", self);

        let products = self.products.unwrap_or(config.generate.products).max(1);
        let rows = self.rows.unwrap_or(config.generate.rows);
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.generate.output.clone());

        let mut rng: StdRng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // One catalog entry per product: a name and a fixed list price.
        let catalog: Vec<String> = (1..=products).map(|i| format!("Produto_{}", i)).collect();
        let prices: Vec<f64> = (0..products).map(|_| rng.gen_range(10.0..100.0)).collect();

        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let day_span = (end - start).num_days();

        let file = File::create(&output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "produto,codigo,tipo,preco,quantidade,data")?;
        for _ in 0..rows {
            let product = catalog.choose(&mut rng).unwrap();
            let code: u32 = rng.gen_range(10000..100000);
            let category = CATEGORIES.choose(&mut rng).unwrap();
            let price = prices.choose(&mut rng).unwrap();
            let quantity: u32 = rng.gen_range(1..100);
            let date = start + Duration::days(rng.gen_range(0..=day_span));

            writeln!(
                writer,
                "{},{},{},{:.2},{},{}",
                product, code, category, price, quantity, date
            )?;
        }
        writer.flush()?;

        print_success(&format!(
            "Wrote {} rows ({} products) to {}",
            rows,
            products,
            output.display()
        ));
        Ok(())
    }
}
