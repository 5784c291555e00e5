use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::CONTACT_NAME_RE;

/// Contact form body as posted by the site. Absent fields deserialize to
/// empty strings so they surface as field errors rather than JSON errors.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        regex(path = *CONTACT_NAME_RE, message = "Invalid characters in name")
    )]
    pub name: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 254, message = "Email is too long")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 1500, message = "Message must be between 1 and 1500 characters"))]
    pub message: String,
}

/// A validated form with all markup stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        ContactResponse {
            message: "Email sent successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn accepts_well_formed_form() {
        assert!(form("Ada O'Neil-Smith", "ada@example.com", "Hello there").validate().is_ok());
    }

    #[test]
    fn rejects_markup_characters_in_name() {
        let errors = form("<b>Ada</b>", "ada@example.com", "Hi").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rejects_overlong_message() {
        let errors = form("Ada", "ada@example.com", &"x".repeat(1501)).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("message"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn message_at_limit_is_accepted() {
        assert!(form("Ada", "ada@example.com", &"x".repeat(1500)).validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_as_empty_and_fail_validation() {
        let parsed: ContactForm = serde_json::from_str(r#"{"email": "ada@example.com"}"#).unwrap();
        let errors = parsed.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("message"));
        assert!(!fields.contains_key("email"));
    }
}
