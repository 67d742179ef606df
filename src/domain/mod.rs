//! Values entered on the landing page and admin panel, and the checks they
//! must pass before anything is sent to the subscriber directory.

mod contact;
mod document;
mod schedule_time;
mod subscriber;
mod subscriber_email;
mod subscriber_phone;
mod validation_error;

pub use contact::{validate_contact, ContactKind, ContactValue, SignUpSubmission};
pub use document::{
    validate_upload, DocumentFile, UploadCandidate, MAX_UPLOAD_BYTES, PDF_MEDIA_TYPE,
};
pub use schedule_time::ScheduleTime;
pub use subscriber::{Subscriber, MISSING_VALUE};
pub use subscriber_email::SubscriberEmail;
pub use subscriber_phone::SubscriberPhone;
pub use validation_error::ValidationError;
