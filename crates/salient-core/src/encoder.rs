//! One-hot encoding against the fixed training schema
//!
//! A record encodes to a row with exactly the training columns, in
//! training order: the month column carries the month value, the matching
//! product indicator column carries 1.0, everything else is 0.0. Products
//! the schema has never seen leave every indicator at zero.

use std::sync::Arc;

use salient_model::TrainingSchema;

use crate::record::SalesRecord;

/// Name of the numeric month column in the training schema.
pub const MONTH_COLUMN: &str = "mes";

/// Prefix of the one-hot product indicator columns.
pub const PRODUCT_PREFIX: &str = "produto_";

/// Encodes records into rows aligned to the training columns.
#[derive(Debug, Clone)]
pub struct Encoder {
    schema: Arc<TrainingSchema>,
}

impl Encoder {
    pub fn new(schema: Arc<TrainingSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &TrainingSchema {
        &self.schema
    }

    pub fn encode(&self, record: &SalesRecord) -> EncodedRow {
        let indicator = format!("{}{}", PRODUCT_PREFIX, record.product);
        let values = self
            .schema
            .columns()
            .iter()
            .map(|column| {
                if column == MONTH_COLUMN {
                    record.month as f64
                } else if *column == indicator {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        EncodedRow {
            schema: Arc::clone(&self.schema),
            values,
        }
    }
}

/// A single encoded row aligned to the training schema.
#[derive(Debug, Clone)]
pub struct EncodedRow {
    schema: Arc<TrainingSchema>,
    values: Vec<f64>,
}

impl EncodedRow {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn schema(&self) -> &TrainingSchema {
        &self.schema
    }

    /// Canonical cache key: the non-zero columns in schema order.
    /// Structural rather than a formatted dump of the whole row, so the
    /// key cannot drift with the rendering of zero-filled columns. Rows
    /// that encode identically always produce identical keys.
    pub fn cache_key(&self) -> String {
        let mut key = String::new();
        for (column, value) in self.schema.columns().iter().zip(&self.values) {
            if *value != 0.0 {
                if !key.is_empty() {
                    key.push('|');
                }
                key.push_str(column);
                key.push('=');
                key.push_str(&value.to_string());
            }
        }
        key
    }
}
