//! Pending image previews
//! Turns raw file bytes into an inline data URL the gallery can display

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::error::{GalleryError, Result};

/// An image picked for upload but not yet published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    /// Original file name, when the image came from a file
    pub file_name: Option<String>,
    /// MIME type (e.g. "image/png"), when known
    pub mime_type: Option<String>,
    /// Displayable reference: a data URL or a remote URL
    pub preview: String,
}

impl PendingImage {
    /// Accept raw file bytes if they hold a recognised image format.
    ///
    /// The format is sniffed from the content, not trusted from the file name.
    pub fn from_bytes(file_name: Option<String>, bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes).map_err(|_| {
            GalleryError::validation(format!(
                "{} is not a supported image",
                file_name.as_deref().unwrap_or("file")
            ))
        })?;
        let mime_type = format.to_mime_type();

        let preview = format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes));
        debug!(mime_type, bytes = bytes.len(), "pending image encoded");

        Ok(Self {
            file_name,
            mime_type: Some(mime_type.to_string()),
            preview,
        })
    }

    /// Use an already-displayable reference (remote URL or data URL)
    pub fn from_url(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(GalleryError::validation("image URL is empty"));
        }
        Ok(Self {
            file_name: None,
            mime_type: None,
            preview: url,
        })
    }
}

/// Load an image file as a pending upload.
///
/// The file is read asynchronously; sniffing and base64 encoding run on
/// the blocking pool since large photos take a while to encode.
pub async fn load_pending_image(path: impl AsRef<Path>) -> Result<PendingImage> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let bytes = tokio::fs::read(&path).await?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string());

    tokio::task::spawn_blocking(move || PendingImage::from_bytes(file_name, &bytes)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_png_becomes_data_url() {
        let pending = PendingImage::from_bytes(Some("shot.png".into()), PNG_HEADER).unwrap();

        assert_eq!(pending.mime_type.as_deref(), Some("image/png"));
        assert!(pending.preview.starts_with("data:image/png;base64,"));
        assert_eq!(pending.file_name.as_deref(), Some("shot.png"));
    }

    #[test]
    fn test_rejects_non_images() {
        let err = PendingImage::from_bytes(Some("notes.txt".into()), b"hello world").unwrap_err();
        assert!(matches!(err, GalleryError::ValidationFailed(_)));
    }

    #[test]
    fn test_from_url() {
        let pending = PendingImage::from_url("https://example.com/a.jpg").unwrap();
        assert_eq!(pending.preview, "https://example.com/a.jpg");
        assert!(PendingImage::from_url("   ").is_err());
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, JPEG_HEADER).unwrap();

        let pending = load_pending_image(&path).await.unwrap();

        assert_eq!(pending.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(pending.file_name.as_deref(), Some("photo.jpg"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_pending_image("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, GalleryError::Io(_)));
    }
}
