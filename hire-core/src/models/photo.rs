use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Largest placement photo accepted, in bytes (10 MiB).
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

const ACCEPTED_TYPES: &[(&str, &[&str])] = &[
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/webp", &["webp"]),
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhotoError {
    #[error("Image is too large (max 10MB), got {0} bytes")]
    TooLarge(usize),

    #[error("Please upload a valid image file (JPG, PNG, WEBP), got '{0}'")]
    UnsupportedType(String),

    #[error("Photo '{0}' is empty")]
    Empty(String),
}

/// Photo of the spot where the skip will be placed.
#[derive(Clone, PartialEq, Eq)]
pub struct SkipPhoto {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl SkipPhoto {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, PhotoError> {
        let file_name = file_name.into();
        let content_type = content_type.into().to_ascii_lowercase();

        if !ACCEPTED_TYPES.iter().any(|(ty, _)| *ty == content_type) {
            return Err(PhotoError::UnsupportedType(content_type));
        }
        if bytes.is_empty() {
            return Err(PhotoError::Empty(file_name));
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(PhotoError::TooLarge(bytes.len()));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Builds a photo from an uploaded file, inferring the content type
    /// from the extension.
    pub fn from_upload(
        path: &Path,
        bytes: Vec<u8>,
    ) -> Result<Self, PhotoError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let content_type = ACCEPTED_TYPES
            .iter()
            .find(|(_, extensions)| extensions.contains(&extension.as_str()))
            .map(|(ty, _)| *ty)
            .ok_or_else(|| PhotoError::UnsupportedType(path.display().to_string()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "skip-location.jpg".to_string());

        Self::new(file_name, content_type, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keeps image bytes out of debug logs.
impl fmt::Debug for SkipPhoto {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("SkipPhoto")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
