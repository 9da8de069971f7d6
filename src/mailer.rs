// src/mailer.rs
//
// New-lead notification mail via Brevo's transactional API. Optional: the
// server runs fine with it unconfigured, and a send failure never fails the
// intake request that triggered it.

use serde_json::json;

use crate::config::MailConfig;
use crate::errors::ServerError;
use crate::leads::model::{LeadDetails, NewLead};

pub struct BrevoMailer {
    api_key: String,
    sender_email: String,
    notify_email: String,
}

impl BrevoMailer {
    pub fn new(cfg: &MailConfig) -> Self {
        Self {
            api_key: cfg.brevo_api_key.clone(),
            sender_email: cfg.sender_email.clone(),
            notify_email: cfg.notify_email.clone(),
        }
    }

    /// Send a "new lead" heads-up to the configured operator address.
    pub fn send_new_lead(&self, lead: &NewLead, site_name: &str) -> Result<(), ServerError> {
        let client = reqwest::blocking::Client::new();

        let subject = format!("New lead on {site_name}: {}", lead.full_name);

        let extra = match &lead.details {
            LeadDetails::Generic { company } => match company {
                Some(company) => format!("<p>Company: {company}</p>"),
                None => String::new(),
            },
            LeadDetails::RealEstate {
                property_type,
                budget,
                preferred_location,
            } => {
                let mut rows = String::new();
                if let Some(pt) = property_type {
                    rows.push_str(&format!("<p>Property type: {}</p>", pt.label()));
                }
                if let Some(b) = budget {
                    rows.push_str(&format!("<p>Budget: {}</p>", b.label()));
                }
                if let Some(loc) = preferred_location {
                    rows.push_str(&format!("<p>Preferred location: {loc}</p>"));
                }
                rows
            }
        };

        let html_content = format!(
            r#"
            <html>
                <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                        <h2>New lead submitted</h2>
                        <p>Name: {name}</p>
                        <p>Email: {email}</p>
                        <p>Phone: {phone}</p>
                        {extra}
                        <p>Message: {message}</p>
                    </div>
                </body>
            </html>
            "#,
            name = lead.full_name,
            email = lead.email,
            phone = lead.phone,
            message = lead.message,
        );

        let body = json!({
            "sender": {
                "name": site_name,
                "email": self.sender_email
            },
            "to": [
                {
                    "email": self.notify_email
                }
            ],
            "subject": subject,
            "htmlContent": html_content
        });

        let response = client
            .post("https://api.brevo.com/v3/smtp/email")
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| ServerError::BadRequest(format!("Failed to send email request: {e}")))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().unwrap_or_else(|_| "(no body)".to_string());
            Err(ServerError::BadRequest(format!(
                "Brevo API error: {status} - {text}"
            )))
        }
    }
}

/// Fire-and-forget wrapper used by the intake handlers.
pub fn notify_new_lead(mailer: &Option<BrevoMailer>, lead: &NewLead, site_name: &str) {
    if let Some(mailer) = mailer {
        if let Err(e) = mailer.send_new_lead(lead, site_name) {
            eprintln!("📧 Lead notification mail failed: {e}");
        }
    }
}
