use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::DocumentError;

const DOCUMENT_XML: &str = "word/document.xml";

/// Largest inflated `word/document.xml` we are willing to hold in memory (64 MiB).
pub const MAX_DOCUMENT_XML_BYTES: usize = 64 * 1024 * 1024;

/// Extracts the raw text of a Word (OOXML) document: one line per paragraph.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    extract_text_with_limit(bytes, MAX_DOCUMENT_XML_BYTES)
}

fn extract_text_with_limit(bytes: &[u8], max_xml_bytes: usize) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| failed(format!("Invalid or corrupt Word document: {e}")))?;

    let entry = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| failed(format!("Word document has no {DOCUMENT_XML}: {e}")))?;

    let limit = max_xml_bytes as u64;
    if entry.size() > limit {
        return Err(too_big(entry.size(), max_xml_bytes));
    }

    // The declared size can lie; never inflate more than one byte past the limit.
    let mut xml = String::new();
    entry
        .take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(|e| failed(format!("Failed to read {DOCUMENT_XML}: {e}")))?;
    if xml.len() > max_xml_bytes {
        return Err(too_big(xml.len() as u64, max_xml_bytes));
    }

    document_xml_to_text(&xml)
}

fn too_big(size: u64, max: usize) -> DocumentError {
    failed(format!(
        "Word document is too large: {DOCUMENT_XML} inflates to {size} bytes, limit is {max}"
    ))
}

fn failed(message: String) -> DocumentError {
    DocumentError::ExtractionFailed(message)
}

/// Walks `word/document.xml`, keeping only the text of `w:t` runs.
fn document_xml_to_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_run_text = true;
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run_text => {
                let chunk = std::str::from_utf8(&t)
                    .map_err(|e| failed(format!("Word document text is not UTF-8: {e}")))?;
                text.push_str(chunk);
            }
            Ok(Event::GeneralRef(r)) if in_run_text => {
                let name = std::str::from_utf8(&r)
                    .map_err(|e| failed(format!("Word document text is not UTF-8: {e}")))?;
                push_entity(&mut text, name);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(failed(format!("Malformed {DOCUMENT_XML}: {e}"))),
            _ => {}
        }
    }

    Ok(text)
}

/// Resolves the five predefined XML entities and numeric character references.
/// Anything else is kept verbatim.
fn push_entity(out: &mut String, name: &str) {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };

    match resolved {
        Some(c) => out.push(c),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
    }
}
