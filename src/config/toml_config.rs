use crate::core::markup::DEFAULT_ADD_AMOUNT;
use crate::core::query::{RowFilter, RowQuery, SortDirection, SortKey};
use crate::core::{ConfigProvider, ExportOptions, RowSource};
use crate::utils::error::{PriceListError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub markup: MarkupConfig,
    pub query: QueryConfig,
    pub export: ExportConfig,
    pub notification: Option<NotificationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub catalog: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub add_amount: f64,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            add_amount: DEFAULT_ADD_AMOUNT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub brand: Option<String>,
    pub text: Option<String>,
    pub sort: SortKey,
    pub descending: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub include_updated: bool,
    pub export_view: bool,
    pub bundle: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            include_updated: false,
            export_view: false,
            bundle: false,
        }
    }
}

/// Outbound order notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub from: String,
    pub to: String,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// Loads and parses a TOML file; `${VAR}` references are substituted first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PriceListError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PriceListError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn notification(&self) -> Result<&NotificationConfig> {
        validation::validate_required_field("notification", &self.notification)
    }
}

impl ConfigProvider for TomlConfig {
    fn source(&self) -> RowSource {
        match &self.source.path {
            Some(path) if !self.source.catalog => RowSource::File(path.clone()),
            _ => RowSource::Catalog,
        }
    }

    fn add_amount(&self) -> f64 {
        self.markup.add_amount
    }

    fn query(&self) -> RowQuery {
        RowQuery::new(
            RowFilter::new(self.query.brand.as_deref(), self.query.text.as_deref()),
            self.query.sort,
            SortDirection::from_descending(self.query.descending),
            self.markup.add_amount,
        )
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_updated: self.export.include_updated,
            export_view: self.export.export_view,
            bundle: self.export.bundle,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match (&self.source.path, self.source.catalog) {
            (None, false) => {
                return Err(PriceListError::MissingConfigError {
                    field: "source.path".to_string(),
                })
            }
            (Some(path), false) => {
                validation::validate_path("source.path", path)?;
                validation::validate_file_extensions(
                    "source.path",
                    std::slice::from_ref(path),
                    &["csv", "txt"],
                )?;
            }
            (_, true) => {}
        }

        validation::validate_finite("markup.add_amount", self.markup.add_amount)?;
        validation::validate_path("export.output_path", &self.export.output_path)?;

        if let Some(notification) = &self.notification {
            notification.validate()?;
        }

        Ok(())
    }
}

impl Validate for NotificationConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("notification.endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("notification.from", &self.from)?;
        validation::validate_non_empty_string("notification.to", &self.to)?;
        if let Some(key) = &self.api_key {
            if key.starts_with("${") {
                return Err(PriceListError::InvalidConfigValueError {
                    field: "notification.api_key".to_string(),
                    value: key.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }
        Ok(())
    }
}
