use super::{in_flight::InFlight, lock, ActionOutcome};
use crate::{
    directory_client::DirectoryClient,
    domain::{
        validate_upload, DocumentFile, ScheduleTime, Subscriber, UploadCandidate, ValidationError,
    },
    service::status_message::StatusMessage,
    subscriber_list::SubscriberList,
};
use chrono::Local;
use std::sync::{Arc, Mutex, MutexGuard};

/// Drives the admin panel: uploading the weekly specials, scheduling the
/// notification and browsing subscribers.
#[derive(Debug)]
pub struct AdminController {
    client: Arc<DirectoryClient>,
    in_flight: InFlight,
    state: Mutex<AdminState>,
}

#[derive(Debug, Default)]
struct AdminState {
    subscribers: SubscriberList,
    candidate: Option<UploadCandidate>,
    schedule_time: String,
    status: Option<StatusMessage>,
    activated: bool,
}

impl AdminController {
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        Self {
            client,
            in_flight: InFlight::default(),
            state: Mutex::default(),
        }
    }

    /// Load the subscribers when the panel is first shown.
    /// Later calls do nothing.
    #[tracing::instrument(name = "Activate admin panel", skip(self))]
    pub async fn activate(&self) -> ActionOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            return ActionOutcome::Busy;
        };
        let already_activated = {
            let mut state = self.state();
            std::mem::replace(&mut state.activated, true)
        };
        if already_activated {
            return ActionOutcome::Skipped;
        }

        self.load_subscribers().await
    }

    /// Fetch the subscribers again.
    #[tracing::instrument(name = "Refresh subscribers", skip(self))]
    pub async fn refresh(&self) -> ActionOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            return ActionOutcome::Busy;
        };

        self.load_subscribers().await
    }

    /// Hold on to `file` for uploading if it is an acceptable document.
    pub fn select_document(&self, file: DocumentFile) -> Result<(), ValidationError> {
        let mut state = self.state();
        match validate_upload(file) {
            Ok(candidate) => {
                state.candidate = Some(candidate);
                Ok(())
            }
            Err(e) => {
                tracing::info!(error.code = e.code(), "Document was rejected");
                state.candidate = None;
                state.status = Some(StatusMessage::error(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn selected_document(&self) -> Option<UploadCandidate> {
        self.state().candidate.clone()
    }

    /// Whether the upload button should be enabled.
    pub fn can_upload(&self) -> bool {
        !self.in_flight.is_busy() && self.state().candidate.is_some()
    }

    /// Upload the selected document. It stays selected if the upload fails.
    #[tracing::instrument(name = "Upload weekly specials", skip(self))]
    pub async fn upload(&self) -> ActionOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            return ActionOutcome::Busy;
        };
        let candidate = { self.state().candidate.clone() };
        let Some(candidate) = candidate else {
            return ActionOutcome::Skipped;
        };

        let outcome = self.client.upload_document(&candidate).await;
        let mut state = self.state();
        match outcome {
            Ok(()) => {
                state.candidate = None;
                state.status = Some(StatusMessage::success("PDF uploaded successfully"));
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to upload the weekly specials"
                );
                state.status = Some(StatusMessage::error(format!("Upload failed: {e}")));
                ActionOutcome::Failed(e)
            }
        }
    }

    pub fn set_schedule_time(&self, time: impl Into<String>) {
        self.state().schedule_time = time.into();
    }

    pub fn schedule_time(&self) -> String {
        self.state().schedule_time.clone()
    }

    /// Earliest time offered in the schedule input: the current minute.
    pub fn schedule_minimum(&self) -> String {
        ScheduleTime::input_minimum(Local::now().naive_local())
    }

    /// Whether the schedule button should be enabled.
    pub fn can_schedule(&self) -> bool {
        !self.in_flight.is_busy() && !self.state().schedule_time.is_empty()
    }

    /// Schedule the specials notification for the entered time.
    #[tracing::instrument(name = "Schedule specials notification", skip(self))]
    pub async fn schedule(&self) -> ActionOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            return ActionOutcome::Busy;
        };
        let time = { ScheduleTime::parse(self.state().schedule_time.clone()) };
        let Ok(time) = time else {
            return ActionOutcome::Skipped;
        };

        let outcome = self.client.schedule_notification(&time).await;
        let mut state = self.state();
        match outcome {
            Ok(()) => {
                state.schedule_time.clear();
                state.status = Some(StatusMessage::success("Notification scheduled successfully"));
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to schedule the notification"
                );
                state.status = Some(StatusMessage::error(format!("Scheduling failed: {e}")));
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Narrow the subscriber table down to matching email or phone.
    pub fn set_filter(&self, term: &str) {
        self.state().subscribers.set_filter(term);
    }

    pub fn filter(&self) -> String {
        self.state().subscribers.filter().to_string()
    }

    /// Every subscriber from the last successful fetch.
    pub fn subscribers(&self) -> Vec<Subscriber> {
        self.state().subscribers.subscribers().to_vec()
    }

    /// Subscribers matching the current filter.
    pub fn visible_subscribers(&self) -> Vec<Subscriber> {
        self.state().subscribers.visible().cloned().collect()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.state().status.clone()
    }

    /// Callers must hold the in-flight guard.
    async fn load_subscribers(&self) -> ActionOutcome {
        let outcome = self.client.list_subscribers().await;
        let mut state = self.state();
        match state.subscribers.apply_refresh(outcome) {
            Ok(count) => {
                state.status = Some(StatusMessage::success(format!("Loaded {count} subscribers")));
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to load subscribers"
                );
                state.status = Some(StatusMessage::error(format!(
                    "Could not load subscribers: {e}"
                )));
                ActionOutcome::Failed(e)
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, AdminState> {
        lock(&self.state)
    }
}
