use serde::Serialize;

use super::contact::ContactSubmission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Fixed envelope for contact relay mail.
#[derive(Debug, Clone)]
pub struct MailEnvelope {
    pub from: String,
    pub to: String,
    pub site_name: String,
}

impl OutgoingEmail {
    /// Builds the relay message. Fields must already be sanitized; they are
    /// interpolated into the HTML body as-is.
    pub fn compose(envelope: &MailEnvelope, submission: &ContactSubmission) -> Self {
        let subject = format!(
            "{} | New message from {}",
            envelope.site_name, submission.name
        );

        let text = format!(
            "Name: {}\nEmail: {}\nMessage: {}\n",
            submission.name, submission.email, submission.message
        );

        let html = format!(
            "<h3>{} | New Contact Submission</h3>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>",
            envelope.site_name,
            submission.name,
            submission.email,
            submission.message.replace('\n', "<br>")
        );

        OutgoingEmail {
            to: envelope.to.clone(),
            from: envelope.from.clone(),
            subject,
            text,
            html,
        }
    }
}
