//! Controllers for the landing page sign-up form and the admin panel.
//! Both follow the same steps: validate the input, call the directory,
//! update local state and report the outcome as a [`StatusMessage`].
//!
//! [`StatusMessage`]: crate::service::status_message::StatusMessage

mod admin;
mod in_flight;
mod sign_up;

pub use admin::AdminController;
pub use sign_up::SignUpController;

use crate::{directory_client::RequestError, domain::ValidationError};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What became of a controller action.
#[derive(Debug)]
pub enum ActionOutcome {
    /// Another request from the same controller was still in flight.
    Busy,
    /// Nothing was sent because there was nothing to send.
    Skipped,
    /// The input was rejected locally and nothing was sent.
    Rejected(ValidationError),
    /// The directory could not be reached or refused the request.
    Failed(RequestError),
    Completed,
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Controller state is only touched between awaits, so a panic while it is
/// locked cannot leave it half updated.
fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
