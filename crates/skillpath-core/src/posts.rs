//! Authoring rules for feed posts.
//!
//! A post carries a short description and either up to three images or a
//! single video. The checks here run before anything is uploaded, so a
//! rejected post never reaches the backend.

use std::path::Path;

use crate::error::{ClientError, Result};

pub const MAX_DESCRIPTION_WORDS: usize = 50;
pub const MAX_IMAGES: usize = 3;

pub const TOO_MANY_WORDS_MESSAGE: &str = "Description should not exceed 50 words.";
pub const TOO_MANY_IMAGES_MESSAGE: &str = "You can upload a maximum of 3 images.";
pub const NO_MEDIA_MESSAGE: &str = "Please upload at least one file.";
pub const SINGLE_VIDEO_MESSAGE: &str = "A video post takes exactly one file.";
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Description cannot be empty.";

/// Whitespace-separated words, ignoring leading and trailing blanks.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rejects descriptions longer than [`MAX_DESCRIPTION_WORDS`].
pub fn check_description(text: &str) -> Result<()> {
    if word_count(text) > MAX_DESCRIPTION_WORDS {
        return Err(ClientError::invalid_input("description").with_reason(TOO_MANY_WORDS_MESSAGE));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// One file attached to a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    /// Builds an attachment, deriving its kind and content type from the
    /// file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let (kind, content_type) = match extension.as_str() {
            "mp4" | "m4v" => (MediaKind::Video, "video/mp4"),
            "mov" => (MediaKind::Video, "video/quicktime"),
            "webm" => (MediaKind::Video, "video/webm"),
            "jpg" | "jpeg" => (MediaKind::Image, "image/jpeg"),
            "png" => (MediaKind::Image, "image/png"),
            "gif" => (MediaKind::Image, "image/gif"),
            "webp" => (MediaKind::Image, "image/webp"),
            _ => (MediaKind::Image, "application/octet-stream"),
        };

        Self {
            file_name,
            content_type: content_type.to_string(),
            kind,
            bytes,
        }
    }

    /// Reads an attachment from disk.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::FileSystem {
                path: path.to_path_buf(),
                source: e,
            })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

/// A validated post, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    user_id: String,
    description: String,
    media: Vec<MediaFile>,
}

impl NewPost {
    pub fn new(
        user_id: impl Into<String>,
        description: impl Into<String>,
        media: Vec<MediaFile>,
    ) -> Result<Self> {
        let description = description.into();
        check_description(&description)?;

        let videos = media.iter().filter(|m| m.kind == MediaKind::Video).count();
        let reason = if media.is_empty() {
            Some(NO_MEDIA_MESSAGE)
        } else if videos > 0 && media.len() > 1 {
            Some(SINGLE_VIDEO_MESSAGE)
        } else if media.len() > MAX_IMAGES {
            Some(TOO_MANY_IMAGES_MESSAGE)
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ClientError::invalid_input("media").with_reason(reason));
        }

        Ok(Self {
            user_id: user_id.into(),
            description,
            media,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn media(&self) -> &[MediaFile] {
        &self.media
    }

    pub fn is_video(&self) -> bool {
        self.media.iter().any(|m| m.kind == MediaKind::Video)
    }
}
