// ============================================================
// UPLOAD USE CASE
// ============================================================
// Validate an uploaded file and build its preview and handoff

use tracing::{info, warn};

use crate::domain::csv::{ParsedCsvPreview, UploadedDataset, UploadedFile};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::UploadSettings;
use crate::infrastructure::csv::CsvParser;

pub const NOT_CSV_MESSAGE: &str = "Please upload a valid CSV file.";

/// Preview for display plus the metadata passed to the next step.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub preview: ParsedCsvPreview,
    pub dataset: UploadedDataset,
}

pub struct UploadUseCase {
    parser: CsvParser,
    max_file_size_bytes: u64,
}

impl UploadUseCase {
    pub fn new(settings: &UploadSettings) -> Self {
        Self {
            parser: CsvParser::new().with_preview_rows(settings.preview_rows),
            max_file_size_bytes: settings.max_file_size_bytes,
        }
    }

    pub fn process(&self, file: &UploadedFile) -> Result<UploadOutcome> {
        if !file.is_csv() {
            warn!(name = %file.name, "Rejected non-CSV upload");
            return Err(AppError::ValidationError(NOT_CSV_MESSAGE.to_string()));
        }

        if file.size() > self.max_file_size_bytes {
            warn!(name = %file.name, size = file.size(), "Rejected oversized upload");
            return Err(AppError::ValidationError(format!(
                "File is too large ({} bytes), maximum allowed: {} bytes",
                file.size(),
                self.max_file_size_bytes
            )));
        }

        let preview = self.parser.parse_bytes(&file.content).map_err(|e| {
            warn!(name = %file.name, error = %e, "CSV preview failed");
            e
        })?;
        let dataset = UploadedDataset::from_preview(file, &preview);

        info!(
            name = %dataset.name,
            size = dataset.size,
            columns = dataset.column_count(),
            "CSV upload accepted"
        );
        Ok(UploadOutcome { preview, dataset })
    }
}

impl Default for UploadUseCase {
    fn default() -> Self {
        Self::new(&UploadSettings::default())
    }
}
