pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LocalStorage};

pub use app::cart::Cart;
pub use app::forms::{ContactRequest, RepairRequest, RepairTicket};
pub use app::notify::{Delivery, HttpNotificationSink, LogNotificationSink, Notification, NotificationSink};
pub use app::order::{Customer, Order};
pub use app::pipelines::PriceListPipeline;
pub use config::toml_config::TomlConfig;
pub use crate::core::{engine::PriceListEngine, markup, parser::parse, serializer::serialize};
pub use domain::model::{CartKey, PriceRow};
pub use utils::error::{PriceListError, Result};
