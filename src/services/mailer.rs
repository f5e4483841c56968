use anyhow::{anyhow, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};

use crate::config::SmtpConfig;
use crate::utils::html::escape_html;

/// Booking summary accepted by the email route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEmailPayload {
    pub room_title: String,
    pub guest_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    pub checkin: String,
    pub checkout: String,
    pub nights: i64,
    pub guests: i64,
    pub total_price: f64,
    #[serde(default)]
    pub to_email: Option<String>,
}

/// SMTP delivery of booking summaries.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    default_to: Option<String>,
}

impl Mailer {
    pub fn from_config(cfg: &SmtpConfig) -> Result<Self> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)?.port(cfg.port);
        if !cfg.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                cfg.username.clone(),
                cfg.password.clone(),
            ));
        }
        Ok(Self {
            transport: builder.build(),
            from: cfg.from.clone(),
            default_to: cfg.default_to.clone(),
        })
    }

    pub async fn send_booking_email(
        &self,
        payload: &BookingEmailPayload,
        to_override: Option<&str>,
    ) -> Result<()> {
        let to = to_override
            .or(self.default_to.as_deref())
            .ok_or_else(|| anyhow!("No recipient configured"))?;
        let subject = format!(
            "New Booking: {} — {}",
            payload.room_title, payload.guest_name
        );

        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(booking_email_html(payload))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

fn booking_email_html(p: &BookingEmailPayload) -> String {
    let row = |label: &str, value: &str| {
        format!("<tr><td><b>{label}</b></td><td>{}</td></tr>", escape_html(value))
    };
    let rows = [
        row("Room", &p.room_title),
        row("Guest", &p.guest_name),
        row("Phone", &p.phone),
        row("Email", p.email.as_deref().unwrap_or("-")),
        row("Nationality", p.nationality.as_deref().unwrap_or("-")),
        row("Check-in", &p.checkin),
        row("Check-out", &p.checkout),
        row("Nights", &p.nights.to_string()),
        row("Guests", &p.guests.to_string()),
        row("Total", &format!("{} UZS", crate::bot::card::group_thousands(p.total_price))),
    ]
    .join("");

    format!(
        "<div style=\"font-family:Arial,Helvetica,sans-serif;font-size:14px;color:#222\">\
         <h2 style=\"margin:0 0 12px\">New Booking</h2>\
         <table cellpadding=\"6\" style=\"border-collapse:collapse\">{rows}</table>\
         </div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_html_escapes_values() {
        let payload = BookingEmailPayload {
            room_title: "Suite <Deluxe>".to_string(),
            guest_name: "John & Jane".to_string(),
            phone: "+998901234567".to_string(),
            email: None,
            nationality: None,
            checkin: "2025-10-16".to_string(),
            checkout: "2025-10-18".to_string(),
            nights: 2,
            guests: 2,
            total_price: 1_250_000.0,
            to_email: None,
        };
        let html = booking_email_html(&payload);
        assert!(html.contains("Suite &lt;Deluxe&gt;"));
        assert!(html.contains("John &amp; Jane"));
        assert!(html.contains("1 250 000 UZS"));
        assert!(html.contains("<td>-</td>"));
    }
}
