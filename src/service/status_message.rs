use std::fmt::Display;

/// How a status message should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// The single banner a controller shows after an action.
/// Each new outcome replaces the previous message instead of adding to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    level: StatusLevel,
    text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    pub fn level(&self) -> StatusLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level, StatusLevel::Error)
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
