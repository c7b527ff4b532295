mod command;
mod convert;
mod docx;
mod error;
mod model;
mod pdf;
mod validate;

pub use command::{CommandConversion, CommandConverter, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
pub use convert::{Conversion, Converter, convert_with};
pub use docx::{DocxSummary, inspect as inspect_docx};
pub use error::Error;
pub use model::{ConversionRequest, ConversionResult, PageRange, ValidationOutcome};
pub use pdf::{PdfHeader, probe as probe_pdf};
pub use validate::{
    DEFAULT_DATA_DIR, DEFAULT_SCHEMA_FILE, SchemaValidator, discover, instance_location,
};

use std::path::Path;

/// Converts a whole PDF to DOCX with the converter configured in the
/// environment (see [`CommandConverter::from_env`]).
pub fn convert_pdf_to_docx(input: &Path, output: &Path) -> ConversionResult {
    let request = ConversionRequest::new(input, output);
    convert_with(&CommandConverter::from_env(), &request)
}
