// ============================================================
// CSV PREVIEW TYPES
// ============================================================
// Bounded structural preview of an uploaded file and the
// metadata handed to the model selection step

use serde::{Deserialize, Serialize};

/// Header row plus the first few data rows of an uploaded file.
///
/// Cell counts are not checked against the header count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCsvPreview {
    /// Column names from the first non-empty line
    pub headers: Vec<String>,

    /// Preview rows, capped by the parser
    pub rows: Vec<Vec<String>>,
}

impl ParsedCsvPreview {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A file as received from the upload control.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name including extension
    pub name: String,

    /// Declared media type, if the picker reported one
    pub media_type: Option<String>,

    /// Raw file contents
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            content: content.into(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Whether the file looks like CSV by media type or extension.
    pub fn is_csv(&self) -> bool {
        self.media_type.as_deref() == Some("text/csv") || self.name.ends_with(".csv")
    }
}

/// Upload handoff: only metadata survives, the raw data is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDataset {
    pub name: String,
    pub size: u64,
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl UploadedDataset {
    pub fn from_preview(file: &UploadedFile, preview: &ParsedCsvPreview) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size(),
            headers: preview.headers.clone(),
            row_count: preview.row_count(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
