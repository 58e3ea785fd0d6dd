pub mod engine;
pub mod markup;
pub mod parser;
pub mod query;
pub mod serializer;

pub use crate::domain::model::{ExportFile, ExportSummary, PriceRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, ExportOptions, Pipeline, RowSource, Storage};
pub use crate::utils::error::Result;
