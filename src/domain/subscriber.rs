use serde_aux::field_attributes::deserialize_string_from_number;

/// Directory ids come as JSON strings or numbers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
struct SubscriberId(#[serde(deserialize_with = "deserialize_string_from_number")] String);

/// Shown in place of a contact detail the subscriber did not give.
pub const MISSING_VALUE: &str = "—";

/// A subscriber as the directory service reports it. Subscribers are never
/// created or changed locally. Every field is optional and fields the service
/// adds beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(default)]
    id: Option<SubscriberId>,
    email: Option<String>,
    phone: Option<String>,
    subscribed_at: Option<String>,
}

impl Subscriber {
    pub fn new(id: impl Into<String>, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            id: Some(SubscriberId(id.into())),
            email,
            phone,
            subscribed_at: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_ref().map(|id| id.0.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The phone number exactly as the directory stored it.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn subscribed_at(&self) -> Option<&str> {
        self.subscribed_at.as_deref()
    }

    pub fn id_or_placeholder(&self) -> &str {
        self.id().unwrap_or(MISSING_VALUE)
    }

    pub fn email_or_placeholder(&self) -> &str {
        self.email().unwrap_or(MISSING_VALUE)
    }

    pub fn phone_or_placeholder(&self) -> &str {
        self.phone().unwrap_or(MISSING_VALUE)
    }

    /// Whether the email or phone contains `term`.
    /// `term` is expected to be lowercase already.
    pub(crate) fn matches_lowercase(&self, term: &str) -> bool {
        [self.email(), self.phone()]
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(term))
    }
}
