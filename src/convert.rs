use std::path::Path;

use crate::docx::{self, DocxSummary};
use crate::error::Error;
use crate::model::{ConversionRequest, ConversionResult, PageRange};

/// A document converter that can be bound to one input file at a time.
pub trait Converter {
    type Handle: Conversion;

    fn open(&self, input: &Path) -> Result<Self::Handle, Error>;
}

/// An open conversion bound to an input document. Whatever the handle holds
/// (file descriptors, child processes, scratch files) is released when it is
/// dropped.
pub trait Conversion {
    fn convert(&mut self, output: &Path, pages: PageRange) -> Result<(), Error>;
}

fn check_input(input: &Path) -> Result<(), Error> {
    let meta = match std::fs::metadata(input) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(input.to_path_buf()));
        }
        Err(e) => return Err(Error::Io(e)),
    };
    if !meta.is_file() {
        return Err(Error::NotAFile(input.to_path_buf()));
    }
    Ok(())
}

fn run<C: Converter>(converter: &C, request: &ConversionRequest) -> Result<DocxSummary, Error> {
    check_input(&request.input)?;

    {
        let mut handle = converter.open(&request.input)?;
        log::debug!(
            "converting {} -> {} (pages {:?})",
            request.input.display(),
            request.output.display(),
            request.pages
        );
        handle.convert(&request.output, request.pages)?;
    }

    if !request.output.is_file() {
        return Err(Error::Converter(format!(
            "converter reported success but {} was not written",
            request.output.display()
        )));
    }
    docx::inspect(&request.output)
}

/// Runs one conversion and folds every failure into the returned result.
pub fn convert_with<C: Converter>(converter: &C, request: &ConversionRequest) -> ConversionResult {
    match run(converter, request) {
        Ok(summary) => ConversionResult::Converted {
            output_path: request.output.clone(),
            file_size: summary.file_size,
        },
        Err(e) => {
            log::debug!("conversion of {} failed: {e:?}", request.input.display());
            ConversionResult::Failed {
                error: e.to_string(),
            }
        }
    }
}
