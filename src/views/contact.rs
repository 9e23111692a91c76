//! Contact form

use super::form::{required, FormError};
use crate::api::ApiClient;
use crate::models::ContactInput;

pub const SENT_MESSAGE: &str = "✅ Message sent successfully! I'll get back to you soon.";
pub const SEND_FAILED: &str = "Error sending message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactStatus {
    #[default]
    Editing,
    Sending,
    Sent,
}

/// Visitor contact form
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    status: ContactStatus,
    error: Option<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ContactStatus {
        self.status
    }

    /// Message shown above the form
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn validate(&self) -> Result<ContactInput, FormError> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        let message = required("message", &self.message)?;
        if !email.contains('@') {
            return Err(FormError::InvalidEmail);
        }

        Ok(ContactInput {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    /// Send the message.
    ///
    /// On success the fields are cleared and the form shows the sent
    /// state. A rate limit shows the server's message as is; other failures
    /// show a generic retry message. Either way the fields are kept.
    pub async fn submit(&mut self, api: &ApiClient) -> ContactStatus {
        if self.status == ContactStatus::Sending {
            return self.status;
        }

        let input = match self.validate() {
            Ok(input) => input,
            Err(e) => {
                self.error = Some(e.to_string());
                return self.status;
            }
        };

        self.status = ContactStatus::Sending;
        self.error = None;

        match api.send_contact(&input).await {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.status = ContactStatus::Sent;
            }
            Err(e) if e.is_rate_limited() => {
                self.error = Some(e.user_message(SEND_FAILED));
                self.status = ContactStatus::Editing;
            }
            Err(e) => {
                tracing::warn!("Error sending message: {}", e);
                self.error = Some(SEND_FAILED.to_string());
                self.status = ContactStatus::Editing;
            }
        }
        self.status
    }

    /// Back to an empty form after a message was sent
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
