//! Document upload payloads.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata sent alongside an uploaded document image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Document type, e.g. `PASSPORT` or `SELFIE`.
    pub id_doc_type: String,

    /// ISO 3166-1 alpha-3 country code.
    pub country: String,

    /// `FRONT_SIDE` or `BACK_SIDE` for two-sided documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_doc_sub_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

impl DocumentMetadata {
    pub fn new(id_doc_type: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id_doc_type: id_doc_type.into(),
            country: country.into(),
            ..Default::default()
        }
    }

    pub fn sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.id_doc_sub_type = Some(sub_type.into());
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn valid_until(mut self, date: impl Into<String>) -> Self {
        self.valid_until = Some(date.into());
        self
    }
}

/// File content for a document upload.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// File name reported in the multipart part.
    pub file_name: String,
    /// Raw file bytes.
    pub content: Bytes,
    /// MIME type, when known.
    pub content_type: Option<String>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            content_type: None,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read an upload from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let upload = Self::new(file_name, content);
        Ok(match guess_content_type(path) {
            Some(ct) => upload.content_type(ct),
            None => upload,
        })
    }
}

fn guess_content_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first().map(|m| m.to_string())
}
