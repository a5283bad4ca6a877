use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

use super::DocumentError;

const BODY_PART: &str = "word/document.xml";

fn docx_error(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Docx(e.to_string())
}

/// Extract paragraph text from a DOCX package, one line per paragraph
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(docx_error)?;

    let mut xml = String::new();
    archive
        .by_name(BODY_PART)
        .map_err(docx_error)?
        .read_to_string(&mut xml)
        .map_err(docx_error)?;

    paragraphs_to_text(&xml)
}

/// Walk the body XML. Run text comes from `w:t`; `w:tab`, `w:br` and `w:cr`
/// only count inside a run, so paragraph tab stops are ignored. Paragraphs
/// nested in text boxes get their own lines.
fn paragraphs_to_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(docx_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    if paragraph_depth > 0 {
                        text.push('\n');
                    }
                    paragraph_depth += 1;
                }
                b"w:r" => run_depth += 1,
                b"w:t" if run_depth > 0 => in_text = true,
                name if run_depth > 0 => push_run_control(name, &mut text),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => text.push('\n'),
                name if run_depth > 0 => push_run_control(name, &mut text),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    text.push('\n');
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text => text.push_str(&t.unescape().map_err(docx_error)?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

fn push_run_control(name: &[u8], text: &mut String) {
    match name {
        b"w:tab" => text.push('\t'),
        b"w:br" | b"w:cr" => text.push('\n'),
        _ => {}
    }
}
