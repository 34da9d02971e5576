use crate::validation::{Validate, ValidationError, looks_like_email, present};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A note left through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MessageDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl Validate for MessageDraft {
    type Output = ContactMessage;

    fn validate(self) -> Result<ContactMessage, ValidationError> {
        let (Some(name), Some(email), Some(message)) =
            (present(self.name), present(self.email), present(self.message))
        else {
            return Err(ValidationError::new(
                "All fields (name, email, message) are required",
            ));
        };
        if !looks_like_email(&email) {
            return Err(ValidationError::new("Please provide a valid email address"));
        }

        Ok(ContactMessage {
            name,
            email,
            message,
            is_read: false,
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageStatus {
    pub is_read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(email: &str) -> MessageDraft {
        MessageDraft {
            name: Some("Asha".to_string()),
            email: Some(email.to_string()),
            message: Some("When does the aarti start?".to_string()),
        }
    }

    #[test]
    fn new_messages_are_unread() {
        let message = draft("asha@example.org").validate().unwrap();
        assert!(!message.is_read);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = draft("asha.example.org").validate().unwrap_err();
        assert_eq!("Please provide a valid email address", err.detail());
    }

    #[test]
    fn any_missing_field_is_rejected() {
        let err = MessageDraft {
            message: None,
            ..draft("asha@example.org")
        }
        .validate()
        .unwrap_err();
        assert_eq!("All fields (name, email, message) are required", err.detail());
    }
}
