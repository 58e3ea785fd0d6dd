use crate::app::notify::Notification;
use crate::app::order::escape_html;
use crate::utils::error::{PriceListError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn missing_fields(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(PriceListError::ValidationError {
        message: format!("Missing required fields: {}", missing.join(", ")),
    })
}

/// Escaped text, or `fallback` when the value is absent or blank.
fn or_default(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|v| !is_blank(v))
        .map(escape_html)
        .unwrap_or_else(|| fallback.to_string())
}

fn photo_section(photo_count: usize, heading: &str, subject: &str) -> String {
    if photo_count == 0 {
        return String::new();
    }
    let plural = if photo_count > 1 { "s" } else { "" };
    format!(
        "<h3>📸 {} Photos ({} attached)</h3>\n<p>Customer has provided {} photo{} of the {}.</p>\n",
        heading, photo_count, photo_count, plural, subject
    )
}

/// State of a part the customer handed in with the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartCheck {
    Yes,
    No,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl PartCheck {
    fn render(self) -> &'static str {
        match self {
            PartCheck::Yes => "✅ Present",
            PartCheck::No => "❌ Missing",
            PartCheck::Unspecified => "❓ Not specified",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepairRequest {
    pub form_number: Option<String>,
    pub customer_name: String,
    pub telephone: String,
    pub model: String,
    pub imei_no: Option<String>,
    pub nature_of_fault: String,
    pub condition: Option<String>,
    pub battery: PartCheck,
    pub sim: PartCheck,
    pub memory_card: PartCheck,
    pub back_cover: PartCheck,
    pub terms: Option<String>,
    pub paid: Option<String>,
    pub balance: Option<String>,
    pub customer_signature: Option<String>,
    pub photo_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Received,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairTicket {
    /// `REP-` followed by the submission time in epoch milliseconds.
    pub id: String,
    pub form_number: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: TicketStatus,
}

impl RepairRequest {
    pub fn validate(&self) -> Result<()> {
        missing_fields(&[
            ("customerName", self.customer_name.as_str()),
            ("telephone", self.telephone.as_str()),
            ("model", self.model.as_str()),
            ("natureOfFault", self.nature_of_fault.as_str()),
        ])
    }

    /// Validates and issues a ticket stamped with the current time.
    pub fn submit(&self) -> Result<RepairTicket> {
        self.submit_at(Utc::now())
    }

    pub fn submit_at(&self, submitted_at: DateTime<Utc>) -> Result<RepairTicket> {
        self.validate()?;
        let ticket = RepairTicket {
            id: format!("REP-{}", submitted_at.timestamp_millis()),
            form_number: self.form_number.clone(),
            submitted_at,
            status: TicketStatus::Received,
        };
        tracing::info!("🔧 Repair ticket {} issued for {}", ticket.id, self.customer_name.trim());
        Ok(ticket)
    }

    pub fn subject(&self, ticket: &RepairTicket) -> String {
        format!(
            "🔧 New Repair Ticket #{} - {}",
            ticket.id,
            self.customer_name.trim()
        )
    }

    pub fn render_html(&self, ticket: &RepairTicket) -> String {
        let phone = escape_html(self.telephone.trim());
        format!(
            concat!(
                "<div style=\"font-family: Arial, sans-serif\">\n",
                "<h2>Repair Form Submission</h2>\n",
                "<h3>Ticket #{}</h3>\n",
                "<p><strong>Date:</strong> {}</p>\n",
                "<p><strong>Name:</strong> {}</p>\n",
                "<p><strong>Phone:</strong> <a href=\"tel:{}\">{}</a></p>\n",
                "<p><strong>Model:</strong> {}</p>\n",
                "<p><strong>IMEI:</strong> {}</p>\n",
                "<p><strong>Battery:</strong> {}</p>\n",
                "<p><strong>SIM:</strong> {}</p>\n",
                "<p><strong>Memory Card:</strong> {}</p>\n",
                "<p><strong>Back Cover:</strong> {}</p>\n",
                "{}",
                "<p><strong>Condition:</strong> {}</p>\n",
                "<p><strong>Nature of Fault:</strong> {}</p>\n",
                "<p><strong>Terms/Fix/Quotation:</strong> {}</p>\n",
                "<p><strong>Paid:</strong> {}</p>\n",
                "<p><strong>Balance:</strong> {}</p>\n",
                "<p><strong>Customer Signature:</strong> {}</p>\n",
                "<p>Repairs not claimed within 30 days will be sold to defray expenses.</p>\n",
                "</div>"
            ),
            escape_html(&ticket.id),
            ticket.submitted_at.format("%Y-%m-%d"),
            escape_html(self.customer_name.trim()),
            phone,
            phone,
            escape_html(self.model.trim()),
            or_default(self.imei_no.as_deref(), "Not provided"),
            self.battery.render(),
            self.sim.render(),
            self.memory_card.render(),
            self.back_cover.render(),
            photo_section(self.photo_count, "Device", "device"),
            or_default(self.condition.as_deref(), "-"),
            escape_html(self.nature_of_fault.trim()),
            or_default(self.terms.as_deref(), "-"),
            or_default(self.paid.as_deref(), "-"),
            or_default(self.balance.as_deref(), "-"),
            or_default(self.customer_signature.as_deref(), "-"),
        )
    }

    /// Issues a ticket and renders it for the notification sink.
    pub fn to_notification(&self, from: &str, to: &str) -> Result<(RepairTicket, Notification)> {
        let ticket = self.submit()?;
        let mut data = serde_json::Map::new();
        data.insert("ticket".to_string(), serde_json::to_value(&ticket)?);
        data.insert("form".to_string(), serde_json::to_value(self)?);
        let notification = Notification {
            from: from.to_string(),
            to: to.to_string(),
            subject: self.subject(&ticket),
            html: self.render_html(&ticket),
            data: serde_json::Value::Object(data),
        };
        Ok((ticket, notification))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service_type: String,
    pub support_type: String,
    pub device_model: Option<String>,
    pub urgent: bool,
    pub problem: String,
    pub photo_count: usize,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<()> {
        missing_fields(&[
            ("name", self.name.as_str()),
            ("phone", self.phone.as_str()),
            ("problem", self.problem.as_str()),
        ])
    }

    pub fn subject(&self) -> String {
        format!("🔧 New Contact Form - {}", self.name.trim())
    }

    pub fn render_html(&self) -> String {
        let phone = escape_html(self.phone.trim());
        let email = or_default(self.email.as_deref(), "Not provided");
        format!(
            concat!(
                "<div style=\"font-family: Arial, sans-serif\">\n",
                "<h2>New Contact Form Submission</h2>\n",
                "<p><strong>Name:</strong> {}</p>\n",
                "<p><strong>Phone:</strong> <a href=\"tel:{}\">{}</a></p>\n",
                "<p><strong>Email:</strong> {}</p>\n",
                "<p><strong>Service Type:</strong> {}</p>\n",
                "<p><strong>Support Type:</strong> {}</p>\n",
                "<p><strong>Device Model:</strong> {}</p>\n",
                "<p><strong>Urgent:</strong> {}</p>\n",
                "{}",
                "<p style=\"white-space: pre-wrap\">{}</p>\n",
                "<p>📞 Action Required: Contact customer within 2 hours with price estimate</p>\n",
                "</div>"
            ),
            escape_html(self.name.trim()),
            phone,
            phone,
            email,
            or_default(Some(self.service_type.as_str()), "-"),
            or_default(Some(self.support_type.as_str()), "-"),
            or_default(self.device_model.as_deref(), "Not specified"),
            if self.urgent { "🚨 YES - Priority Request" } else { "No" },
            photo_section(self.photo_count, "Issue", "issue"),
            escape_html(self.problem.trim()),
        )
    }

    /// Validates, then renders the form for the notification sink.
    pub fn to_notification(&self, from: &str, to: &str) -> Result<Notification> {
        self.validate()?;
        Ok(Notification {
            from: from.to_string(),
            to: to.to_string(),
            subject: self.subject(),
            html: self.render_html(),
            data: serde_json::to_value(self)?,
        })
    }
}
