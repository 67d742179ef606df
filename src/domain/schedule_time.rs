use super::ValidationError;
use chrono::NaiveDateTime;

/// Shape of a `datetime-local` value, minute precision.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// When the specials notification should go out, in local time.
/// Whether the moment is acceptable is up to the directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTime(String);

impl ScheduleTime {
    pub fn parse(s: String) -> Result<Self, ValidationError> {
        if s.is_empty() {
            Err(ValidationError::Required)
        } else {
            Ok(Self(s))
        }
    }

    /// Earliest value offered to the admin: `now`, truncated to the minute.
    pub fn input_minimum(now: NaiveDateTime) -> String {
        now.format(INPUT_FORMAT).to_string()
    }
}

impl AsRef<str> for ScheduleTime {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
