use super::{in_flight::InFlight, lock, ActionOutcome};
use crate::{
    directory_client::DirectoryClient,
    domain::{ContactKind, SignUpSubmission},
    service::status_message::StatusMessage,
};
use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

const SIGN_UP_SUCCESS: &str = "Thanks for signing up! Watch out for our weekly specials.";
const SIGN_UP_FAILURE: &str = "Something went wrong. Please try again.";

/// Drives the "Sign Up for Specials" form on the landing page.
#[derive(Debug)]
pub struct SignUpController {
    client: Arc<DirectoryClient>,
    close_delay: Duration,
    in_flight: InFlight,
    state: Arc<Mutex<SignUpState>>,
}

#[derive(Debug, Default)]
struct SignUpState {
    submission: SignUpSubmission,
    status: Option<StatusMessage>,
    is_open: bool,
    /// Bumped every time the form opens, so a pending auto-close only
    /// closes the form it was started for.
    opened_count: u64,
}

impl SignUpController {
    pub fn new(client: Arc<DirectoryClient>, close_delay: Duration) -> Self {
        Self {
            client,
            close_delay,
            in_flight: InFlight::default(),
            state: Arc::default(),
        }
    }

    /// Show the sign-up form with a clean status.
    pub fn open(&self) {
        let mut state = self.state();
        state.is_open = true;
        state.opened_count += 1;
        state.status = None;
    }

    pub fn close(&self) {
        self.state().is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open
    }

    /// Switch between email and phone input. Switching clears the value.
    pub fn set_kind(&self, kind: ContactKind) {
        self.state().submission.set_kind(kind);
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.state().submission.set_value(value);
    }

    pub fn kind(&self) -> ContactKind {
        self.state().submission.kind()
    }

    pub fn value(&self) -> String {
        self.state().submission.value().to_string()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.state().status.clone()
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_busy()
    }

    /// Validate what was typed and send it to the directory.
    #[tracing::instrument(name = "Sign up for specials", skip(self))]
    pub async fn submit(&self) -> ActionOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            tracing::debug!("A sign-up is already in flight");
            return ActionOutcome::Busy;
        };

        let validated = { self.state().submission.validate() };
        let contact = match validated {
            Ok(contact) => contact,
            Err(e) => {
                tracing::info!(error.code = e.code(), "Sign-up was rejected");
                self.state().status = Some(StatusMessage::error(e.to_string()));
                return ActionOutcome::Rejected(e);
            }
        };

        match self.client.submit_sign_up(&contact).await {
            Ok(()) => {
                let opened_count = {
                    let mut state = self.state();
                    state.submission.clear();
                    state.status = Some(StatusMessage::success(SIGN_UP_SUCCESS));
                    state.opened_count
                };
                self.close_later(opened_count);
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to sign up for specials"
                );
                self.state().status = Some(StatusMessage::error(SIGN_UP_FAILURE));
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Close the form once the success message has been up for a while.
    fn close_later(&self, opened_count: u64) {
        let state = Arc::clone(&self.state);
        let delay = self.close_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.opened_count == opened_count {
                state.is_open = false;
            }
        });
    }

    fn state(&self) -> MutexGuard<'_, SignUpState> {
        lock(&self.state)
    }
}
