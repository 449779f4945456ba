//! Contact form hand-off
//!
//! A submission is validated, formatted as a short structured message and
//! handed to an external messaging service through a deep link.

use crate::error::ContactError;
use once_cell::sync::OnceCell;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Deep-link base of the messaging service
pub const DEFAULT_BASE_URL: &str = "https://wa.me/";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL: OnceCell<Regex> = OnceCell::new();

/// Characters a URI component may carry unescaped
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn email_pattern() -> Result<&'static Regex, ContactError> {
    Ok(EMAIL.get_or_try_init(|| Regex::new(EMAIL_PATTERN))?)
}

/// Form field names, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    /// Sender name
    Name,
    /// Sender email
    Email,
    /// Subject line
    Subject,
    /// Message body
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        })
    }
}

/// A contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

impl ContactMessage {
    /// Create submission
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Trimmed copy, if every field is present and the email looks valid
    ///
    /// # Errors
    /// [`ContactError::MissingField`] for the first empty field (in form
    /// order), [`ContactError::InvalidEmail`] for a malformed address.
    pub fn validate(&self) -> Result<Self, ContactError> {
        let trimmed = Self::new(
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim(),
        );

        for (field, value) in [
            (ContactField::Name, &trimmed.name),
            (ContactField::Email, &trimmed.email),
            (ContactField::Subject, &trimmed.subject),
            (ContactField::Message, &trimmed.message),
        ] {
            if value.is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        if !email_pattern()?.is_match(&trimmed.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(trimmed)
    }

    /// Message text as sent to the recipient
    #[must_use]
    pub fn text(&self, recipient: Option<&str>) -> String {
        let greeting = match recipient {
            Some(name) => format!("Hi {name}! 👋"),
            None => "Hi! 👋".to_owned(),
        };
        format!(
            "{greeting}\n\n*Name:* {}\n*Email:* {}\n*Subject:* {}\n\n*Message:*\n{}",
            self.name, self.email, self.subject, self.message
        )
    }
}

/// Builds deep links to a messaging recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    base: Url,
    phone: String,
    recipient: Option<String>,
}

impl ContactLink {
    /// Link to `phone` (separators and a leading `+` are ignored)
    ///
    /// # Errors
    /// [`ContactError::InvalidPhone`] if the number has no digits or
    /// contains anything besides digits, spaces, `+`, `-`, `(` and `)`.
    pub fn new(phone: &str) -> Result<Self, ContactError> {
        let valid = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if !valid || digits.is_empty() {
            return Err(ContactError::InvalidPhone(phone.to_owned()));
        }

        Ok(Self {
            base: Url::parse(DEFAULT_BASE_URL)?,
            phone: digits,
            recipient: None,
        })
    }

    /// Greet the recipient by name
    #[must_use]
    pub fn with_recipient(mut self, name: impl Into<String>) -> Self {
        self.recipient = Some(name.into());
        self
    }

    /// Use another deep-link base
    ///
    /// # Errors
    /// [`ContactError::Url`] if `base` is not an absolute URL.
    pub fn with_base_url(mut self, base: &str) -> Result<Self, ContactError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        self.base = base;
        Ok(self)
    }

    /// Recipient digits
    #[inline]
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Validate `message` and build the deep link
    ///
    /// # Errors
    /// Any validation error from [`ContactMessage::validate`].
    pub fn build(&self, message: &ContactMessage) -> Result<Url, ContactError> {
        let message = message.validate()?;
        let mut url = self.base.join(&self.phone)?;
        let text = message.text(self.recipient.as_deref());
        // Spaces travel as %20, not the form-encoded `+`.
        url.set_query(Some(&format!(
            "text={}",
            utf8_percent_encode(&text, URI_COMPONENT)
        )));
        tracing::debug!(recipient = %self.phone, "contact link built");
        Ok(url)
    }
}

/// How the host should open a deep link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffStrategy {
    /// Navigate the current window (mobile devices open the app directly)
    SameWindow,
    /// Open a new window, leaving the site open
    NewWindow,
}

impl HandoffStrategy {
    /// Pick a strategy from a user-agent string
    #[must_use]
    pub fn for_user_agent(user_agent: &str) -> Self {
        let lower = user_agent.to_ascii_lowercase();
        let ios = ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|device| user_agent.contains(device));
        let mobile = lower.contains("android") || lower.contains("mobi");

        if ios || mobile {
            Self::SameWindow
        } else {
            Self::NewWindow
        }
    }

    /// Strategy to retry with when this one is blocked (e.g. popup blocker)
    #[must_use]
    pub fn fallback(self) -> Self {
        Self::SameWindow
    }

    /// Browsing-context target for the link
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Self::SameWindow => "_self",
            Self::NewWindow => "_blank",
        }
    }
}
