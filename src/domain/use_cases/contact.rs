use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::EMAIL_ADDRESS_RE,
    entities::{
        contact::{ContactForm, ContactResponse, ContactSubmission},
        email::{MailEnvelope, OutgoingEmail},
    },
    errors::{AppError, FieldError},
    interfaces::mailer::Mailer,
    utils::sanitize::strip_markup,
};

pub struct ContactHandler<M>
where
    M: Mailer,
{
    pub mailer: M,
    envelope: MailEnvelope,
}

impl<M> ContactHandler<M>
where
    M: Mailer,
{
    pub fn new(mailer: M, envelope: MailEnvelope) -> Self {
        ContactHandler { mailer, envelope }
    }

    /// Validates, sanitizes and relays one contact form submission.
    pub async fn send_contact_message(
        &self,
        form: ContactForm,
    ) -> Result<ContactResponse, AppError> {
        form.validate()?;

        let submission = sanitize_submission(form)?;
        let email = OutgoingEmail::compose(&self.envelope, &submission);
        let submission_id = Uuid::new_v4();

        match self.mailer.send(&email).await {
            Ok(()) => {
                tracing::info!(%submission_id, provider = self.mailer.kind(), "Contact message relayed");
                Ok(ContactResponse::sent())
            }
            Err(e) => {
                tracing::error!(%submission_id, provider = self.mailer.kind(), "Error sending email: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Strips markup from every field and re-checks what sanitization may have
/// broken: empty fields and the address shape.
pub fn sanitize_submission(form: ContactForm) -> Result<ContactSubmission, AppError> {
    let submission = ContactSubmission {
        name: strip_markup(&form.name),
        email: strip_markup(&form.email),
        message: strip_markup(&form.message),
    };

    let mut errors = Vec::new();

    for (field, value, label) in [
        ("email", &submission.email, "Email"),
        ("message", &submission.message, "Message"),
        ("name", &submission.name, "Name"),
    ] {
        if value.is_empty() {
            errors.push(FieldError {
                field: field.to_string(),
                message: format!("{} is required", label),
            });
        }
    }

    if !submission.email.is_empty() && !EMAIL_ADDRESS_RE.is_match(&submission.email) {
        errors.push(FieldError {
            field: "email".to_string(),
            message: "Invalid email format".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(submission)
    } else {
        Err(AppError::ValidationError(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::MailError, interfaces::mailer::MockMailer};

    fn envelope() -> MailEnvelope {
        MailEnvelope {
            from: "no-reply@example.com".into(),
            to: "owner@example.com".into(),
            site_name: "Portfolio".into(),
        }
    }

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[actix_rt::test]
    async fn valid_submission_sends_exactly_once() {
        let mut mailer = MockMailer::new();
        mailer.expect_kind().return_const("mock");
        mailer
            .expect_send()
            .withf(|email| {
                email.to == "owner@example.com"
                    && email.subject == "Portfolio | New message from Ada"
                    && email.text.contains("ada@example.com")
            })
            .times(1)
            .returning(|_| Ok(()));

        let handler = ContactHandler::new(mailer, envelope());
        let response = handler
            .send_contact_message(form("Ada", "ada@example.com", "Hello!"))
            .await
            .unwrap();

        assert_eq!(response.message, "Email sent successfully");
    }

    #[actix_rt::test]
    async fn invalid_submission_never_reaches_mailer() {
        let mut mailer = MockMailer::new();
        mailer.expect_send().times(0);

        let handler = ContactHandler::new(mailer, envelope());
        let err = handler
            .send_contact_message(form("Ada$", "not-an-email", ""))
            .await
            .unwrap_err();

        match err {
            AppError::ValidationError(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert!(names.contains(&"name"));
                assert!(names.contains(&"email"));
                assert!(names.contains(&"message"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn markup_is_stripped_from_outbound_message() {
        let mut mailer = MockMailer::new();
        mailer.expect_kind().return_const("mock");
        mailer
            .expect_send()
            .withf(|email| {
                !email.html.contains("<script")
                    && !email.text.contains("<b>")
                    && email.text.contains("Message: Hello world")
            })
            .times(1)
            .returning(|_| Ok(()));

        let handler = ContactHandler::new(mailer, envelope());
        handler
            .send_contact_message(form(
                "Ada",
                "ada@example.com",
                "<b>Hello</b> world<script>alert(1)</script>",
            ))
            .await
            .unwrap();
    }

    #[actix_rt::test]
    async fn provider_failure_maps_to_mail_delivery_error() {
        let mut mailer = MockMailer::new();
        mailer.expect_kind().return_const("mock");
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailError::Transport("connection refused".into())));

        let handler = ContactHandler::new(mailer, envelope());
        let err = handler
            .send_contact_message(form("Ada", "ada@example.com", "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MailDelivery(_)));
    }

    #[test]
    fn message_emptied_by_sanitization_is_rejected() {
        let err = sanitize_submission(form("Ada", "ada@example.com", "<script>x()</script>"))
            .unwrap_err();

        match err {
            AppError::ValidationError(fields) => {
                assert_eq!(fields, vec![FieldError {
                    field: "message".into(),
                    message: "Message is required".into(),
                }]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn address_without_tld_fails_recheck() {
        let err = sanitize_submission(form("Ada", "ada@localhost", "Hi")).unwrap_err();
        assert!(err.to_string().contains("Invalid email format"));
    }
}
