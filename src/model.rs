use std::fmt;
use std::path::PathBuf;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub const ROOT_LOCATION: &str = "<root>";

/// Zero-based page window handed to the converter. `end` is exclusive;
/// `None` runs to the last page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl PageRange {
    pub fn all() -> Self {
        PageRange { start: 0, end: None }
    }
}

impl Default for PageRange {
    fn default() -> Self {
        PageRange::all()
    }
}

#[derive(Clone, Debug)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub pages: PageRange,
}

impl ConversionRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        ConversionRequest {
            input: input.into(),
            output: output.into(),
            pages: PageRange::all(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConversionResult {
    Converted { output_path: PathBuf, file_size: u64 },
    Failed { error: String },
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Converted { .. })
    }

    /// Single-line JSON form printed by the converter CLI.
    pub fn to_json_line(&self) -> String {
        // Serializing a map of strings and integers cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Serialize for ConversionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConversionResult::Converted { output_path, file_size } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("output_path", &output_path.to_string_lossy())?;
                map.serialize_entry("message", "Conversion successful")?;
                map.serialize_entry("file_size", file_size)?;
                map.end()
            }
            ConversionResult::Failed { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValidationOutcome {
    Valid {
        file_name: String,
    },
    Invalid {
        file_name: String,
        location: String,
        message: String,
    },
    Unreadable {
        file_name: String,
        error: String,
    },
}

impl ValidationOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            ValidationOutcome::Valid { file_name }
            | ValidationOutcome::Invalid { file_name, .. }
            | ValidationOutcome::Unreadable { file_name, .. } => file_name,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid { .. })
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid { file_name } => write!(f, "✅ {file_name}: valid"),
            ValidationOutcome::Invalid {
                file_name,
                location,
                message,
            } => write!(f, "❌ {file_name}: error at {location} → {message}"),
            ValidationOutcome::Unreadable { file_name, error } => {
                write!(f, "❌ {file_name}: unreadable → {error}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_line_carries_path_message_and_size() {
        let result = ConversionResult::Converted {
            output_path: PathBuf::from("out/report.docx"),
            file_size: 2048,
        };
        let value: serde_json::Value = serde_json::from_str(&result.to_json_line()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["output_path"], "out/report.docx");
        assert_eq!(value["message"], "Conversion successful");
        assert_eq!(value["file_size"], 2048);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_line_has_only_success_and_error() {
        let result = ConversionResult::Failed {
            error: "file not found: missing.pdf".into(),
        };
        let line = result.to_json_line();
        assert!(!line.contains('\n'));
        assert_eq!(
            line,
            r#"{"success":false,"error":"file not found: missing.pdf"}"#
        );
    }

    #[test]
    fn outcome_lines() {
        let ok = ValidationOutcome::Valid {
            file_name: "a.json".into(),
        };
        assert_eq!(ok.to_string(), "✅ a.json: valid");

        let bad = ValidationOutcome::Invalid {
            file_name: "b.json".into(),
            location: "pages.0.text".into(),
            message: "42 is not of type \"string\"".into(),
        };
        assert_eq!(
            bad.to_string(),
            "❌ b.json: error at pages.0.text → 42 is not of type \"string\""
        );
        assert_eq!(bad.file_name(), "b.json");
        assert!(!bad.is_valid());
    }
}
