pub mod configuration;
pub mod controllers;
pub mod directory_client;
pub mod domain;
mod error;
pub mod service;
pub mod subscriber_list;
pub mod telemetry;

use configuration::Settings;
use controllers::{AdminController, SignUpController};
use derive_getters::Getters;
use directory_client::{DirectoryClient, DirectoryClientError};
use std::sync::Arc;

/// The landing page and admin panel controllers, sharing one directory client.
#[derive(Debug, Getters)]
pub struct App {
    sign_up: SignUpController,
    admin: AdminController,
}

impl App {
    /// Build the controllers from the given settings.
    pub fn build(settings: &Settings) -> Result<Self, DirectoryClientError> {
        let client = Arc::new(DirectoryClient::try_from(settings.directory())?);
        tracing::info!("Using subscriber directory at {}", client.base_url());

        Ok(Self {
            sign_up: SignUpController::new(
                Arc::clone(&client),
                settings.sign_up().close_delay(),
            ),
            admin: AdminController::new(client),
        })
    }
}
