//! Client for the remote subscriber directory. It is the only place that
//! talks to the network, and every failure it sees comes back as a
//! [`RequestError`] instead of a panic.

use crate::{
    configuration::DirectorySettings,
    domain::{ContactKind, ContactValue, ScheduleTime, Subscriber, UploadCandidate},
};
use reqwest::{multipart, Client, Response, StatusCode, Url};
use std::time::Duration;

const SUBSCRIBE_PATH: &str = "/api/subscribe";
const UPLOAD_SEGMENT: &str = "upload";
const NOTIFICATIONS_SEGMENT: &str = "notifications";
const UPLOAD_FIELD: &str = "file";

/// Outcome of a single call to the subscriber directory.
pub type RequestOutcome<T> = Result<T, RequestError>;

#[derive(Debug)]
pub struct DirectoryClient {
    base_url: Url,
    subscribe_url: Url,
    http_client: Client,
}

impl DirectoryClient {
    /// Create a new directory client. `timeout` of `None` keeps the
    /// transport's default.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, DirectoryClientError> {
        if base_url.cannot_be_a_base() {
            return Err(DirectoryClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let subscribe_url = base_url
            .join(SUBSCRIBE_PATH)
            .map_err(|_| DirectoryClientError::InvalidBaseUrl(base_url.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(DirectoryClientError::HttpClient)?;

        Ok(Self {
            base_url,
            subscribe_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch every subscriber, in the order the directory returns them.
    #[tracing::instrument(name = "Fetch subscribers", skip(self), err)]
    pub async fn list_subscribers(&self) -> RequestOutcome<Vec<Subscriber>> {
        let response = self
            .http_client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(RequestError::Transport)?;

        let subscribers = ensure_success(response)
            .await?
            .json::<Vec<Subscriber>>()
            .await
            .map_err(RequestError::MalformedResponse)?;
        tracing::info!(count = subscribers.len(), "Fetched subscribers");

        Ok(subscribers)
    }

    /// Upload the weekly specials document as the multipart field `file`.
    #[tracing::instrument(
        name = "Upload specials document",
        skip(self, candidate),
        fields(
            file_name = %candidate.file().file_name(),
            size = candidate.file().size(),
        ),
        err
    )]
    pub async fn upload_document(&self, candidate: &UploadCandidate) -> RequestOutcome<()> {
        let file = candidate.file();
        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_string())
            .mime_str(file.media_type())
            .map_err(RequestError::InvalidDocument)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http_client
            .post(self.endpoint(UPLOAD_SEGMENT))
            .multipart(form)
            .send()
            .await
            .map_err(RequestError::Transport)?;
        ensure_success(response).await?;
        tracing::info!("Specials document has been uploaded");

        Ok(())
    }

    /// Ask the directory to notify subscribers at `time`.
    #[tracing::instrument(
        name = "Schedule notification",
        skip(self, time),
        fields(scheduled_time = %time.as_ref()),
        err
    )]
    pub async fn schedule_notification(&self, time: &ScheduleTime) -> RequestOutcome<()> {
        let request_body = ScheduleNotificationRequest {
            scheduled_time: time.as_ref(),
        };

        let response = self
            .http_client
            .post(self.endpoint(NOTIFICATIONS_SEGMENT))
            .json(&request_body)
            .send()
            .await
            .map_err(RequestError::Transport)?;
        ensure_success(response).await?;
        tracing::info!("Notification has been scheduled");

        Ok(())
    }

    /// Sign a visitor up with an already validated contact.
    #[tracing::instrument(
        name = "Submit sign-up",
        skip(self, contact),
        fields(contact_kind = contact.kind().as_str()),
        err
    )]
    pub async fn submit_sign_up(&self, contact: &ContactValue) -> RequestOutcome<()> {
        let request_body = SignUpRequest {
            kind: contact.kind(),
            value: contact.as_ref(),
        };

        let response = self
            .http_client
            .post(self.subscribe_url.clone())
            .json(&request_body)
            .send()
            .await
            .map_err(RequestError::Transport)?;
        ensure_success(response).await?;
        tracing::info!("Sign-up has been accepted");

        Ok(())
    }

    /// `{base}/{segment}`, whether or not the base url ends with a slash.
    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }
}

impl TryFrom<&DirectorySettings> for DirectoryClient {
    type Error = DirectoryClientError;

    fn try_from(config: &DirectorySettings) -> Result<Self, Self::Error> {
        let base_url = config.base_url().map_err(|e| {
            tracing::error!("Unable to parse the directory's base url: {e}");
            DirectoryClientError::UnparsableBaseUrl(e)
        })?;
        Self::new(base_url, config.timeout())
    }
}

/// Turn any non-2xx response into a [`RequestError::Rejected`].
async fn ensure_success(response: Response) -> RequestOutcome<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("The subscriber directory responded with {status}"));

    Err(RequestError::Rejected { status, message })
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleNotificationRequest<'a> {
    scheduled_time: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct SignUpRequest<'a> {
    #[serde(rename = "type")]
    kind: ContactKind,
    value: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Failure of a request to the subscriber directory.
#[derive(thiserror::Error)]
pub enum RequestError {
    #[error("Could not reach the subscriber directory")]
    Transport(#[source] reqwest::Error),
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("The subscriber directory sent a response that could not be read")]
    MalformedResponse(#[source] reqwest::Error),
    #[error("The document could not be attached to the upload")]
    InvalidDocument(#[source] reqwest::Error),
}

impl RequestError {
    /// Human readable description, fit for a status banner.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The HTTP status, when the directory answered at all.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(status.as_u16()),
            Self::Transport(e) | Self::MalformedResponse(e) | Self::InvalidDocument(e) => {
                e.status().map(|status| status.as_u16())
            }
        }
    }
}

/// Failure to set up a [`DirectoryClient`].
#[derive(thiserror::Error)]
pub enum DirectoryClientError {
    #[error("Directory base url is invalid")]
    UnparsableBaseUrl(#[source] url::ParseError),
    #[error("`{0}` cannot be used as a directory base url")]
    InvalidBaseUrl(String),
    #[error("Failed to build the http client")]
    HttpClient(#[source] reqwest::Error),
}
