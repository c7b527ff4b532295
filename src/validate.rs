use std::fs;
use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::Error;
use crate::model::{ROOT_LOCATION, ValidationOutcome};

pub const DEFAULT_SCHEMA_FILE: &str = "schema.json";
pub const DEFAULT_DATA_DIR: &str = "data/output_json";

pub struct SchemaValidator {
    schema: JSONSchema,
}

// e.g. `pages.0.text`
pub fn instance_location<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = segments
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(".");
    if joined.is_empty() {
        ROOT_LOCATION.to_string()
    } else {
        joined
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn entry_path(dir: &Path, entry: std::io::Result<fs::DirEntry>) -> Option<PathBuf> {
    match entry {
        Ok(entry) => Some(entry.path()),
        Err(e) => {
            log::warn!("{}: skipping unreadable entry: {e}", dir.display());
            None
        }
    }
}

pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry_path(dir, entry))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == "json")
        })
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

impl SchemaValidator {
    pub fn new(schema: &Value) -> Result<Self, Error> {
        let schema = JSONSchema::compile(schema).map_err(|e| Error::Schema(e.to_string()))?;
        Ok(SchemaValidator { schema })
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        let schema: Value = serde_json::from_str(&text)?;
        log::debug!("loaded schema {}", path.display());
        SchemaValidator::new(&schema)
    }

    // Only the first violation is reported.
    pub fn validate_value(&self, file_name: &str, document: &Value) -> ValidationOutcome {
        let first = match self.schema.validate(document) {
            Ok(()) => None,
            Err(mut errors) => errors.next(),
        };
        match first {
            None => ValidationOutcome::Valid {
                file_name: file_name.to_string(),
            },
            Some(e) => ValidationOutcome::Invalid {
                file_name: file_name.to_string(),
                message: e.to_string(),
                location: instance_location(e.instance_path.into_vec()),
            },
        }
    }

    pub fn validate_file(&self, path: &Path) -> ValidationOutcome {
        let file_name = file_name_of(path);
        let parsed = fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|text| serde_json::from_str::<Value>(&text).map_err(Error::from));
        match parsed {
            Ok(document) => self.validate_value(&file_name, &document),
            Err(e) => {
                log::warn!("{}: {e}", path.display());
                ValidationOutcome::Unreadable {
                    file_name,
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn validate_dir(
        &self,
        dir: &Path,
        mut report: impl FnMut(&ValidationOutcome),
    ) -> Result<Vec<ValidationOutcome>, Error> {
        let files = discover(dir)?;
        let mut outcomes = Vec::with_capacity(files.len());
        for file in &files {
            let outcome = self.validate_file(file);
            report(&outcome);
            outcomes.push(outcome);
        }

        let valid = outcomes.iter().filter(|o| o.is_valid()).count();
        log::info!(
            "{}: {valid} valid, {} failed",
            dir.display(),
            outcomes.len() - valid
        );
        Ok(outcomes)
    }
}
