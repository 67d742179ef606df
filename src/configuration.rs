use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use std::time::Duration;
use url::Url;

const DEFAULT_CLOSE_DELAY_MILLISECONDS: u64 = 2000;

/// Retrive the configuration for the application.
/// Values from `configuration.yaml` can be overridden with environment
/// variables, e.g. `APP_DIRECTORY__BASE_URL`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    Config::builder()
        .add_source(File::new("configuration.yaml", FileFormat::Yaml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct Settings {
    directory: DirectorySettings,
    #[serde(default)]
    sign_up: SignUpSettings,
}

impl Settings {
    pub fn new(directory: DirectorySettings, sign_up: SignUpSettings) -> Self {
        Self { directory, sign_up }
    }
}

/// Where the subscriber directory lives.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DirectorySettings {
    base_url: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    timeout_milliseconds: Option<u64>,
}

impl DirectorySettings {
    pub fn new(base_url: impl Into<String>, timeout_milliseconds: Option<u64>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_milliseconds,
        }
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    /// Request timeout. `None` leaves it to the http client's default.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SignUpSettings {
    #[serde(
        default = "default_close_delay",
        deserialize_with = "deserialize_number_from_string"
    )]
    close_delay_milliseconds: u64,
}

impl SignUpSettings {
    pub fn new(close_delay_milliseconds: u64) -> Self {
        Self {
            close_delay_milliseconds,
        }
    }

    /// How long the success message stays up before the sign-up form closes.
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_milliseconds)
    }
}

impl Default for SignUpSettings {
    fn default() -> Self {
        Self::new(default_close_delay())
    }
}

fn default_close_delay() -> u64 {
    DEFAULT_CLOSE_DELAY_MILLISECONDS
}
