/// Reasons a value is rejected before anything is sent to the directory.
/// The `Display` text is what the visitor or admin gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhone,
    #[error("Only PDF files are allowed.")]
    NotPdf,
    #[error("File size must be 10MB or less.")]
    FileTooLarge,
}

impl ValidationError {
    /// Stable machine readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhone => "invalid_phone",
            Self::NotPdf => "not_pdf",
            Self::FileTooLarge => "file_too_large",
        }
    }
}
