// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Text decoding and line-based preview parsing

mod csv_parser;

pub use csv_parser::{CsvParser, PREVIEW_ROW_CAP, TOO_SHORT_MESSAGE};
