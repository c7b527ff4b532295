use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub enum Error {
    NotFound(PathBuf),
    NotAFile(PathBuf),
    InvalidPdf(String),
    InvalidDocx(String),
    Spawn(String, std::io::Error),
    Converter(String),
    Timeout(Duration),
    Schema(String),
    Zip(zip::result::ZipError),
    Xml(roxmltree::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Error::NotAFile(path) => write!(f, "not a file: {}", path.display()),
            Error::InvalidPdf(reason) => write!(f, "not a valid PDF file: {reason}"),
            Error::InvalidDocx(reason) => write!(f, "not a valid DOCX file: {reason}"),
            Error::Spawn(program, e) => write!(f, "failed to start converter '{program}': {e}"),
            Error::Converter(e) => write!(f, "conversion failed: {e}"),
            Error::Timeout(limit) => write!(f, "conversion timed out after {limit:?}"),
            Error::Schema(e) => write!(f, "invalid schema: {e}"),
            Error::Zip(e) => write!(f, "ZIP error: {e}"),
            Error::Xml(e) => write!(f, "XML error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
