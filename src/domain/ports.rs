use crate::core::query::RowQuery;
use crate::domain::model::{ExportSummary, PriceRow, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the raw rows come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSource {
    /// A delimited-text document, relative to the storage root.
    File(String),
    /// The built-in seed catalog.
    Catalog,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    /// Also write `prices-updated.csv` with the `updated_price` column.
    pub include_updated: bool,
    /// Export the filtered and sorted view instead of every parsed row.
    pub export_view: bool,
    /// Write one zip archive instead of separate files.
    pub bundle: bool,
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> RowSource;
    fn add_amount(&self) -> f64;
    fn query(&self) -> RowQuery;
    fn output_path(&self) -> &str;
    fn export_options(&self) -> ExportOptions;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PriceRow>>;
    async fn transform(&self, rows: Vec<PriceRow>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<ExportSummary>;
}
