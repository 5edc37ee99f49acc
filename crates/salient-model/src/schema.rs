//! Ordered training-column schema
//!
//! The schema fixes the exact set and order of columns the model was
//! trained on. Every encoded row must reproduce it exactly; the loader
//! rejects empty or ambiguous column lists up front so the encoder never
//! has to.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Ordered list of training column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingSchema {
    columns: Vec<String>,
}

impl TrainingSchema {
    /// Build a schema from an ordered column list, rejecting empty lists
    /// and duplicate names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidSchema("column list is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}",
                    column
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Load the schema from a JSON array of column names.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let columns: Vec<String> = serde_json::from_slice(&data)?;
        let schema = Self::new(columns)?;
        debug!(columns = schema.len(), path = %path.display(), "loaded training schema");
        Ok(schema)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in the training order, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
