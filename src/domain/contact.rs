use super::{SubscriberEmail, SubscriberPhone, ValidationError};

/// Which input mode the sign-up form is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    #[default]
    Email,
    Phone,
}

impl ContactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// A validated contact value, ready to be sent to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValue {
    Email(SubscriberEmail),
    Phone(SubscriberPhone),
}

impl ContactValue {
    pub fn kind(&self) -> ContactKind {
        match self {
            Self::Email(_) => ContactKind::Email,
            Self::Phone(_) => ContactKind::Phone,
        }
    }
}

impl AsRef<str> for ContactValue {
    fn as_ref(&self) -> &str {
        match self {
            Self::Email(email) => email.as_ref(),
            Self::Phone(phone) => phone.as_ref(),
        }
    }
}

/// Decide whether `raw` is an acceptable contact of the given kind.
/// An empty value is always [`ValidationError::Required`].
pub fn validate_contact(kind: ContactKind, raw: &str) -> Result<ContactValue, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Required);
    }

    match kind {
        ContactKind::Email => SubscriberEmail::parse(raw.to_string()).map(ContactValue::Email),
        ContactKind::Phone => SubscriberPhone::parse(raw.to_string()).map(ContactValue::Phone),
    }
}

/// What is currently typed into the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpSubmission {
    kind: ContactKind,
    value: String,
}

impl SignUpSubmission {
    pub fn new(kind: ContactKind) -> Self {
        Self {
            kind,
            value: String::new(),
        }
    }

    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Switch input mode. Switching to another kind clears the value.
    pub fn set_kind(&mut self, kind: ContactKind) {
        if self.kind != kind {
            self.kind = kind;
            self.value.clear();
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn validate(&self) -> Result<ContactValue, ValidationError> {
        validate_contact(self.kind, &self.value)
    }
}
