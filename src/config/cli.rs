use crate::core::markup::DEFAULT_ADD_AMOUNT;
use crate::core::query::{RowFilter, RowQuery, SortDirection, SortKey};
use crate::core::{ConfigProvider, ExportOptions, RowSource, Storage};
use crate::utils::error::{PriceListError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "pricelist")]
#[command(about = "Filter, sort and re-export a brand/model/type/price sheet")]
pub struct CliConfig {
    /// Price sheet to load (brand,model,type,price)
    #[arg(short, long, conflicts_with = "catalog")]
    pub input: Option<String>,

    /// Use the built-in seed catalog instead of a file
    #[arg(long)]
    pub catalog: bool,

    /// Flat amount added to every base price
    #[arg(short, long, default_value_t = DEFAULT_ADD_AMOUNT, allow_negative_numbers = true)]
    pub add_amount: f64,

    /// Only rows whose brand contains this text
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Only rows whose "model type" contains this text
    #[arg(short, long)]
    pub query: Option<String>,

    #[arg(long, value_enum, default_value_t = SortKey::Brand)]
    pub sort: SortKey,

    #[arg(long)]
    pub descending: bool,

    #[arg(short, long, default_value = "./output")]
    pub output_path: String,

    /// Also write prices-updated.csv with the updated_price column
    #[arg(long)]
    pub include_updated: bool,

    /// Export only the filtered, sorted rows
    #[arg(long)]
    pub export_view: bool,

    /// Write a single zip archive instead of separate files
    #[arg(long)]
    pub bundle: bool,

    /// TOML configuration file; replaces the options above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: None,
            catalog: true,
            add_amount: DEFAULT_ADD_AMOUNT,
            brand: None,
            query: None,
            sort: SortKey::Brand,
            descending: false,
            output_path: "./output".to_string(),
            include_updated: false,
            export_view: false,
            bundle: false,
            config: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn source(&self) -> RowSource {
        match &self.input {
            Some(path) if !self.catalog => RowSource::File(path.clone()),
            _ => RowSource::Catalog,
        }
    }

    fn add_amount(&self) -> f64 {
        self.add_amount
    }

    fn query(&self) -> RowQuery {
        RowQuery::new(
            RowFilter::new(self.brand.as_deref(), self.query.as_deref()),
            self.sort,
            SortDirection::from_descending(self.descending),
            self.add_amount,
        )
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_updated: self.include_updated,
            export_view: self.export_view,
            bundle: self.bundle,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.input.is_none() && !self.catalog {
            return Err(PriceListError::MissingConfigError {
                field: "input".to_string(),
            });
        }
        if let Some(input) = &self.input {
            validation::validate_path("input", input)?;
            validation::validate_file_extensions("input", std::slice::from_ref(input), &["csv", "txt"])?;
        }
        validation::validate_finite("add_amount", self.add_amount)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
