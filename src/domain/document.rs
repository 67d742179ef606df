use super::ValidationError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A file picked by the admin, as declared by whoever picked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    file_name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A document that passed [`validate_upload`] and may be sent to the
/// directory's upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate(DocumentFile);

impl UploadCandidate {
    pub fn file(&self) -> &DocumentFile {
        &self.0
    }

    pub fn into_inner(self) -> DocumentFile {
        self.0
    }
}

/// Accept only PDFs of at most 10 MiB.
pub fn validate_upload(file: DocumentFile) -> Result<UploadCandidate, ValidationError> {
    if file.media_type() != PDF_MEDIA_TYPE {
        return Err(ValidationError::NotPdf);
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge);
    }

    Ok(UploadCandidate(file))
}
