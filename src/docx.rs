use std::io::Read;
use std::path::Path;

use crate::error::Error;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const MAIN_PART: &str = "word/document.xml";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocxSummary {
    pub paragraphs: usize,
    pub file_size: u64,
}

fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

/// Opens a converter's output as a WordprocessingML package and checks that
/// the main document part is present and well-formed.
pub fn inspect(path: &Path) -> Result<DocxSummary, Error> {
    let file = std::fs::File::open(path)?;
    let file_size = file.metadata()?.len();
    let mut zip = zip::ZipArchive::new(file)?;

    let mut xml_content = String::new();
    {
        let mut part = zip
            .by_name(MAIN_PART)
            .map_err(|_| Error::InvalidDocx(format!("missing {MAIN_PART}")))?;
        part.read_to_string(&mut xml_content)?;
    }

    let xml = roxmltree::Document::parse(&xml_content)?;
    let root = xml.root_element();
    if !is_wml(root, "document") {
        return Err(Error::InvalidDocx(format!(
            "unexpected root element <{}> in {MAIN_PART}",
            root.tag_name().name()
        )));
    }

    let paragraphs = root.descendants().filter(|n| is_wml(*n, "p")).count();
    log::debug!("{}: {paragraphs} paragraphs, {file_size} bytes", path.display());

    Ok(DocxSummary {
        paragraphs,
        file_size,
    })
}
