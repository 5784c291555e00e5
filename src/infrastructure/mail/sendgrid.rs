use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;
use zeroize::Zeroizing;

use crate::{
    entities::email::OutgoingEmail,
    errors::MailError,
    interfaces::mailer::Mailer,
    settings::MailConfig,
};

const SEND_PATH: &str = "v3/mail/send";

// ───── v3 Mail Send Payload ─────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SendGridPayload<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl<'a> From<&'a OutgoingEmail> for SendGridPayload<'a> {
    fn from(email: &'a OutgoingEmail) -> Self {
        SendGridPayload {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from: Address { email: &email.from },
            subject: &email.subject,
            // text/plain must precede text/html
            content: [
                Content { kind: "text/plain", value: &email.text },
                Content { kind: "text/html", value: &email.html },
            ],
        }
    }
}

// ───── Client ───────────────────────────────────────────────────────

pub struct SendGridMailer {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl SendGridMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let api_key = config.api_key().ok_or(MailError::NotConfigured)?;

        let endpoint = config
            .api_base()
            .join(SEND_PATH)
            .map_err(|e| MailError::Transport(format!("Invalid mail API URL: {}", e)))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(SendGridMailer {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let response = self.client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&SendGridPayload::from(email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Mail provider accepted message");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    fn kind(&self) -> &'static str {
        "sendgrid"
    }
}
