use super::ValidationError;
use std::fmt::Display;

const PHONE_NUMBER_DIGITS: usize = 10;

/// A ten digit phone number with every separator stripped away,
/// so `(555) 123-4567` is stored as `5551234567`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberPhone(String);

impl SubscriberPhone {
    pub fn parse(s: String) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Required);
        }

        let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == PHONE_NUMBER_DIGITS {
            Ok(Self(digits))
        } else {
            Err(ValidationError::InvalidPhone)
        }
    }
}

impl Display for SubscriberPhone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubscriberPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
