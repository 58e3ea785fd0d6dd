use crate::core::{
    parser, serializer, ConfigProvider, ExportFile, ExportSummary, Pipeline, PriceRow, RowSource,
    Storage, TransformResult,
};
use crate::domain::catalog;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const PRICES_FILE: &str = "prices.csv";
pub const UPDATED_PRICES_FILE: &str = "prices-updated.csv";
pub const BUNDLE_FILE: &str = "prices_export.zip";
pub const VIEW_FILE: &str = "view.json";

/// Reads a price sheet from `input`, applies the configured query and writes
/// the exports to `output`.
pub struct PriceListPipeline<S: Storage, C: ConfigProvider> {
    input: S,
    output: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PriceListPipeline<S, C> {
    pub fn new(input: S, output: S, config: C) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    fn build_exports(&self, rows: &[PriceRow]) -> Vec<ExportFile> {
        let add_amount = self.config.add_amount();
        let mut exports = vec![ExportFile {
            name: PRICES_FILE.to_string(),
            contents: serializer::serialize(rows, false, add_amount),
        }];

        if self.config.export_options().include_updated {
            exports.push(ExportFile {
                name: UPDATED_PRICES_FILE.to_string(),
                contents: serializer::serialize(rows, true, add_amount),
            });
        }

        exports
    }

    fn bundle(&self, result: &TransformResult) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for export in &result.exports {
            zip.start_file::<_, ()>(export.name.as_str(), FileOptions::default())?;
            zip.write_all(export.contents.as_bytes())?;
        }

        zip.start_file::<_, ()>(VIEW_FILE, FileOptions::default())?;
        let view_json = serde_json::to_string_pretty(&result.view)?;
        zip.write_all(view_json.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PriceListPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<PriceRow>> {
        match self.config.source() {
            RowSource::File(path) => {
                tracing::debug!("Reading price sheet from: {}", path);
                let bytes = self.input.read_file(&path).await?;
                let text = String::from_utf8_lossy(&bytes);
                Ok(parser::parse(&text))
            }
            RowSource::Catalog => {
                tracing::debug!("Using the built-in seed catalog");
                Ok(catalog::catalog_rows())
            }
        }
    }

    async fn transform(&self, rows: Vec<PriceRow>) -> Result<TransformResult> {
        let query = self.config.query();
        tracing::debug!("Applying query: {:?}", query);
        let view = query.apply(&rows);

        let exports = if self.config.export_options().export_view {
            self.build_exports(&view)
        } else {
            self.build_exports(&rows)
        };

        Ok(TransformResult {
            rows,
            view,
            exports,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<ExportSummary> {
        let mut files_written = Vec::new();

        if self.config.export_options().bundle {
            let zip_data = self.bundle(&result)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.output.write_file(BUNDLE_FILE, &zip_data).await?;
            files_written.push(format!("{}/{}", self.config.output_path(), BUNDLE_FILE));
        } else {
            for export in &result.exports {
                self.output
                    .write_file(&export.name, export.contents.as_bytes())
                    .await?;
                files_written.push(format!("{}/{}", self.config.output_path(), export.name));
            }
        }

        Ok(ExportSummary {
            rows_parsed: result.rows.len(),
            view: result.view,
            files_written,
        })
    }
}
