use std::sync::Arc;

use parking_lot::RwLock;
use crate::error::AnalyzerError;
use crate::processing::statistics::{CentralTendency, Dispersion, Summary};
use crate::render::canvas::ChartStyle;
use crate::render::chart::{self, ChartKind};
use crate::state::dataset::{Dataset, DatasetInfo};

/// Result of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub count: usize,
}

/// Owns the single process-wide dataset slot.
///
/// Loads swap in a whole new `Arc<Dataset>` under the write lock; readers
/// clone the `Arc` under the read lock and compute on that snapshot, so a
/// concurrent load never tears a read. Last write wins.
#[derive(Debug, Default)]
pub struct StatisticalAnalyzer {
    dataset: RwLock<Option<Arc<Dataset>>>,
}

impl StatisticalAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current dataset with `values`.
    pub fn load(&self, values: Vec<f64>) -> Result<LoadOutcome, AnalyzerError> {
        let dataset = Dataset::new(values)?;
        let count = dataset.len();
        let id = dataset.id;

        let previous = self.dataset.write().replace(Arc::new(dataset));
        match previous {
            Some(prev) => tracing::info!(id, count, replaced = prev.id, "dataset loaded"),
            None => tracing::info!(id, count, "dataset loaded"),
        }

        Ok(LoadOutcome { count })
    }

    /// The dataset as of now. Later loads do not affect the returned value.
    pub fn snapshot(&self) -> Result<Arc<Dataset>, AnalyzerError> {
        self.dataset
            .read()
            .as_ref()
            .cloned()
            .ok_or(AnalyzerError::NoDatasetLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.read().is_some()
    }

    pub fn info(&self) -> Result<DatasetInfo, AnalyzerError> {
        Ok(self.snapshot()?.info())
    }

    pub fn central_tendency(&self) -> Result<CentralTendency, AnalyzerError> {
        let dataset = self.snapshot()?;
        CentralTendency::compute(dataset.values())
    }

    pub fn dispersion(&self) -> Result<Dispersion, AnalyzerError> {
        let dataset = self.snapshot()?;
        Dispersion::compute(dataset.values())
    }

    /// Central tendency and dispersion of the same snapshot. Either both
    /// succeed or the call fails with `NoDatasetLoaded`.
    pub fn summary(&self) -> Result<Summary, AnalyzerError> {
        let dataset = self.snapshot()?;
        Summary::compute(dataset.values())
    }

    /// Render the current dataset as a PNG.
    pub fn render_chart(&self, kind: ChartKind, style: &ChartStyle) -> Result<Vec<u8>, AnalyzerError> {
        let dataset = self.snapshot()?;
        let png = chart::render_chart(kind, dataset.values(), style)?;
        tracing::debug!(
            kind = kind.as_str(),
            theme = style.theme.label(),
            bytes = png.len(),
            dataset = dataset.id,
            "chart rendered"
        );
        Ok(png)
    }
}
