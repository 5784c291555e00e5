use async_trait::async_trait;

use crate::{entities::email::OutgoingEmail, errors::MailError, interfaces::mailer::Mailer};

/// Writes relay mail to the log instead of delivering it. Used when no
/// provider key is configured outside production.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Mail delivery disabled; logging message instead"
        );
        // Submitter content only at debug
        tracing::debug!(body = %email.text, "Undelivered message body");
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "log"
    }
}
