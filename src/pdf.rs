use std::io::Read;

use crate::error::Error;

// Some producers prepend junk before the header.
const HEADER_SEARCH_LEN: usize = 1024;
const PDF_MARKER: &[u8] = b"%PDF-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfHeader {
    pub version: String,
}

pub fn probe(reader: &mut impl Read) -> Result<PdfHeader, Error> {
    let mut head = Vec::with_capacity(HEADER_SEARCH_LEN);
    reader
        .take(HEADER_SEARCH_LEN as u64)
        .read_to_end(&mut head)?;

    if head.is_empty() {
        return Err(Error::InvalidPdf("file is empty".into()));
    }

    let Some(pos) = head
        .windows(PDF_MARKER.len())
        .position(|w| w == PDF_MARKER)
    else {
        return Err(Error::InvalidPdf("missing %PDF- header".into()));
    };

    let version: String = head[pos + PDF_MARKER.len()..]
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .map(|&b| b as char)
        .collect();
    if version.is_empty() {
        return Err(Error::InvalidPdf("malformed %PDF- header".into()));
    }

    Ok(PdfHeader { version })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_version() {
        let header = probe(&mut &b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj"[..]).unwrap();
        assert_eq!(header.version, "1.7");
    }

    #[test]
    fn tolerates_leading_bytes() {
        let header = probe(&mut &b"\xef\xbb\xbfgarbage%PDF-2.0\n"[..]).unwrap();
        assert_eq!(header.version, "2.0");
    }

    #[test]
    fn rejects_empty_and_foreign_files() {
        assert!(matches!(probe(&mut &b""[..]), Err(Error::InvalidPdf(_))));
        assert!(matches!(
            probe(&mut &b"PK\x03\x04 this is a zip"[..]),
            Err(Error::InvalidPdf(_))
        ));
        assert!(matches!(probe(&mut &b"%PDF-"[..]), Err(Error::InvalidPdf(_))));
    }
}
