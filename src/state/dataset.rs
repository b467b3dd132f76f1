use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AnalyzerError;

static NEXT_DATASET_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

fn next_dataset_id() -> u64 {
    NEXT_DATASET_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
}

/// An immutable, non-empty sequence of finite values in load order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: u64,
    values: Vec<f64>,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Validate and wrap `values`. Rejects empty input and NaN/infinite
    /// entries.
    pub fn new(values: Vec<f64>) -> Result<Self, AnalyzerError> {
        if values.is_empty() {
            return Err(AnalyzerError::NoDataProvided);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(AnalyzerError::NonFiniteValue { index });
        }
        Ok(Self {
            id: next_dataset_id(),
            values,
            loaded_at: Utc::now(),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            id: self.id,
            count: self.len(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Metadata about the loaded dataset, without the values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub id: u64,
    pub count: usize,
    pub loaded_at: DateTime<Utc>,
}
