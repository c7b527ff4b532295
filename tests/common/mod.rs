#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

/// Writes a one-page PDF with a single line of Helvetica text.
pub fn write_pdf(path: &Path, text: &str) {
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let font_id = Ref::new(5);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    let mut content = Content::new();
    content
        .begin_text()
        .set_font(Name(b"F1"), 12.0)
        .next_line(72.0, 770.0)
        .show(Str(text.as_bytes()))
        .end_text();
    pdf.stream(content_id, &content.finish());

    pdf.page(page_id)
        .media_box(Rect::new(0.0, 0.0, 595.0, 842.0))
        .parent(pages_id)
        .contents(content_id)
        .resources()
        .fonts()
        .pair(Name(b"F1"), font_id);

    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

    fs::write(path, pdf.finish()).expect("write pdf fixture");
}

/// Writes a minimal WordprocessingML package with one paragraph per entry.
pub fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

    let file = fs::File::create(path).expect("create docx fixture");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(content_types.as_bytes()).unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().expect("finish docx fixture");
}

/// Writes a `sh` script that stands in for the external converter: it copies
/// `template` to the requested output path and records its arguments.
#[cfg(unix)]
pub fn write_copying_converter(dir: &Path, template: &Path) -> std::path::PathBuf {
    let script = dir.join("fake-pdf2docx.sh");
    let log = dir.join("converter-args.txt");
    fs::write(
        &script,
        format!(
            "echo \"$@\" >> '{}'\ncp '{}' \"$3\"\n",
            log.display(),
            template.display()
        ),
    )
    .expect("write converter script");
    script
}

pub const PAGES_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["title", "pages"],
    "properties": {
        "title": { "type": "string" },
        "pages": {
            "type": "array",
            "items": {
                "type": "object",
                "required": ["number", "text"],
                "properties": {
                    "number": { "type": "integer" },
                    "text": { "type": "string" }
                }
            }
        }
    }
}"#;

pub const VALID_DOC: &str = r#"{"title": "Report", "pages": [{"number": 1, "text": "Hello"}]}"#;
pub const NESTED_VIOLATION_DOC: &str =
    r#"{"title": "Report", "pages": [{"number": 1, "text": 42}]}"#;
