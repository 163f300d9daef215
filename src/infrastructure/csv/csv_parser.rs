// ============================================================
// CSV PREVIEW PARSER
// ============================================================
// Split uploaded text into a header row and a few preview rows.
// Line based: quoted fields are not protected, so a comma inside
// quotes still splits the field.

use encoding_rs::UTF_8;
use tracing::debug;

use crate::domain::csv::ParsedCsvPreview;
use crate::domain::error::{AppError, Result};

/// Number of data rows kept for display.
pub const PREVIEW_ROW_CAP: usize = 5;

pub const TOO_SHORT_MESSAGE: &str = "CSV file must have at least a header row and one data row.";

/// CSV preview parser
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: char,

    /// Maximum number of data rows in the preview
    preview_rows: usize,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            preview_rows: PREVIEW_ROW_CAP,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the preview row cap
    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }

    /// Decode raw file bytes as UTF-8 and parse them.
    ///
    /// A leading BOM is dropped. Malformed UTF-8 fails without a partial result.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedCsvPreview> {
        let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(AppError::ValidationError(
                "Failed to read CSV file: content is not valid UTF-8 text.".to_string(),
            ));
        }
        self.parse_content(&text)
    }

    /// Parse CSV text into a bounded preview
    pub fn parse_content(&self, content: &str) -> Result<ParsedCsvPreview> {
        let lines: Vec<&str> = content
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.len() < 2 {
            return Err(AppError::ValidationError(TOO_SHORT_MESSAGE.to_string()));
        }

        let headers = self.split_line(lines[0]);
        let rows: Vec<Vec<String>> = lines[1..]
            .iter()
            .take(self.preview_rows)
            .map(|line| self.split_line(line))
            .collect();

        debug!(
            columns = headers.len(),
            preview_rows = rows.len(),
            "Parsed CSV preview"
        );

        Ok(ParsedCsvPreview { headers, rows })
    }

    /// Split one line, trim each field, then drop every double quote.
    fn split_line(&self, line: &str) -> Vec<String> {
        line.split(self.delimiter)
            .map(|field| field.trim().replace('"', ""))
            .collect()
    }
}
