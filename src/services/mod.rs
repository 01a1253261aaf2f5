pub mod export_writer;
pub mod record_extractor;
pub mod selector_resolver;

pub use export_writer::{to_csv, to_json, to_text, ExportPaths, ExportWriter};
pub use record_extractor::{ExtractedFields, RecordExtractor};
pub use selector_resolver::{FieldOutcome, SelectorResolver};
