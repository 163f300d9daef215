// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Value objects for the upload preview
// No I/O, no async, no external dependencies

mod csv_preview;

pub use csv_preview::{ParsedCsvPreview, UploadedDataset, UploadedFile};
