use crate::core::{ExportSummary, Pipeline};
use crate::utils::error::Result;

/// Drives a pipeline through extract, transform and load.
pub struct PriceListEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PriceListEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ExportSummary> {
        tracing::info!("Loading price list...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Loaded {} rows", rows.len());
        if rows.is_empty() {
            tracing::warn!("The price list has no data rows");
        }

        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "{} of {} rows match the current filter",
            result.view.len(),
            result.rows.len()
        );

        let summary = self.pipeline.load(result).await?;
        for file in &summary.files_written {
            tracing::info!("Wrote {}", file);
        }

        Ok(summary)
    }
}
