//! Contact form → pre-filled `mailto:` draft.
//!
//! The draft is only composed here. Opening it with the platform mail
//! handler is up to the caller.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("no recipient address configured")]
    MissingRecipient,
    #[error("recipient '{0}' is not an email address")]
    InvalidRecipient(String),
}

/// What the sender typed into the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn subject(&self) -> String {
        format!("Contact from {}", self.name)
    }

    pub fn body(&self) -> String {
        format!(
            "From: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    /// `mailto:` URL with percent-encoded subject and body.
    pub fn mailto(&self, recipient: &str) -> Result<String, ContactError> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(ContactError::MissingRecipient);
        }
        if !recipient.contains('@') || recipient.contains(['?', '&', '#', '%', ' ']) {
            return Err(ContactError::InvalidRecipient(recipient.to_string()));
        }

        Ok(format!(
            "mailto:{recipient}?subject={}&body={}",
            urlencoding::encode(&self.subject()),
            urlencoding::encode(&self.body()),
        ))
    }
}
