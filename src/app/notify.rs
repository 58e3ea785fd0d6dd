use crate::config::toml_config::NotificationConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Structured copy of the order or form behind the message.
    pub data: serde_json::Value,
}

/// Outcome of one delivery attempt. Failures are reported, never raised, so
/// the caller decides whether to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Failed(String),
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Delivered => f.write_str("delivered"),
            Delivery::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Delivery;
}

#[derive(Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts the message as JSON to an email API (Resend-compatible).
pub struct HttpNotificationSink {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpNotificationSink {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> crate::utils::error::Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn deliver(&self, notification: &Notification) -> Delivery {
        let payload = EmailPayload {
            from: &notification.from,
            to: &notification.to,
            subject: &notification.subject,
            html: &notification.html,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!("Posting notification '{}' to {}", notification.subject, self.endpoint);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Notification request failed: {}", e);
                return Delivery::Failed(e.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!("Notification delivered to {}", notification.to);
            Delivery::Delivered
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Notification rejected with HTTP {}", status);
            Delivery::Failed(format!("HTTP {}: {}", status.as_u16(), body))
        }
    }
}

/// Logs the message instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn deliver(&self, notification: &Notification) -> Delivery {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Notification (not sent): {}",
            notification.data
        );
        Delivery::Delivered
    }
}
