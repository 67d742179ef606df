use super::ValidationError;
use std::fmt::Display;

/// Represents an email typed into the sign-up form.
/// Only the presence of an `@` is checked here, the directory service
/// decides whether the address is really deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<Self, ValidationError> {
        if s.is_empty() {
            Err(ValidationError::Required)
        } else if s.contains('@') {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }
}

impl Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
