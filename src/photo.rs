// Photo intake: turns an image file on disk into a data URL the poem
// service can consume.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Extensions accepted as images, with the MIME type used in the data URL.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
];

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("{} is not an image file", .0.display())]
    NotAnImage(PathBuf),
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An uploaded photo, encoded as a `data:` URL.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoReference {
    data_url: String,
    file_name: Option<String>,
    byte_len: usize,
}

impl PhotoReference {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", mime, BASE64.encode(bytes)),
            file_name: None,
            byte_len: bytes.len(),
        }
    }

    /// Wrap an already-encoded data URL (e.g. one handed over by another tool).
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        let data_url = data_url.into();
        let byte_len = data_url
            .split_once(";base64,")
            .map(|(_, payload)| payload.len() / 4 * 3)
            .unwrap_or(0);
        Self {
            data_url,
            file_name: None,
            byte_len,
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn is_empty(&self) -> bool {
        self.data_url.is_empty()
    }

    pub fn mime(&self) -> Option<&str> {
        self.data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
            .filter(|m| !m.is_empty())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Size of the decoded image in bytes (approximate for foreign data URLs).
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

// Data URLs run to megabytes; keep them out of logs and test failures.
impl fmt::Debug for PhotoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoReference")
            .field("mime", &self.mime())
            .field("file_name", &self.file_name)
            .field("byte_len", &self.byte_len)
            .finish()
    }
}

/// MIME type for an image path, or `None` if the extension isn't an image.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Normalize user-entered or pasted path text: trims whitespace, strips the
/// quotes or escapes terminals add to dropped files, and expands a leading `~/`.
pub fn normalize_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| {
            trimmed
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
        })
        .unwrap_or(trimmed);
    // Some terminals escape spaces in dropped paths instead of quoting them.
    let unescaped = unquoted.replace("\\ ", " ");

    if let Some(rest) = unescaped.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(unescaped)
}

/// Read an image file and encode it as a [`PhotoReference`].
pub async fn read_photo(path: &Path) -> Result<PhotoReference, PhotoError> {
    let mime = mime_for_path(path).ok_or_else(|| PhotoError::NotAnImage(path.to_path_buf()))?;
    let bytes = tokio::fs::read(path).await.map_err(|source| PhotoError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut photo = PhotoReference::from_bytes(mime, &bytes);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        photo = photo.with_file_name(name);
    }
    Ok(photo)
}
