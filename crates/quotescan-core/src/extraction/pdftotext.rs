use crate::error::QuoteError;
use crate::extraction::table::{group_lines, layout_lines, TableDetector};
use crate::extraction::{BBox, GeometryOptions, PageTables, TableSource, Word};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// Table source built on word bounding boxes from `pdftotext -bbox`
/// (poppler-utils).
pub struct PdftotextBboxSource {
    geometry: GeometryOptions,
}

impl PdftotextBboxSource {
    pub fn new(geometry: GeometryOptions) -> Self {
        PdftotextBboxSource { geometry }
    }
}

impl Default for PdftotextBboxSource {
    fn default() -> Self {
        Self::new(GeometryOptions::default())
    }
}

impl TableSource for PdftotextBboxSource {
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, QuoteError> {
        let xhtml = run_pdftotext(&["-bbox"], pdf_bytes)?;
        let pages = parse_bbox_xhtml(&xhtml)?;

        let mut detector = TableDetector::new();
        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, words)| {
                let lines = group_lines(&words, &self.geometry);
                let tables = detector.detect_page(&lines);
                debug!(
                    page = i + 1,
                    words = words.len(),
                    lines = lines.len(),
                    tables = tables.len(),
                    "bbox page"
                );
                PageTables {
                    page_number: i + 1,
                    tables,
                }
            })
            .collect())
    }

    fn backend_name(&self) -> &str {
        "pdftotext-bbox"
    }
}

/// Table source built on `pdftotext -layout`, which keeps column alignment
/// as runs of spaces.
pub struct PdftotextLayoutSource;

impl PdftotextLayoutSource {
    pub fn new() -> Self {
        PdftotextLayoutSource
    }
}

impl Default for PdftotextLayoutSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSource for PdftotextLayoutSource {
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, QuoteError> {
        let text = run_pdftotext(&["-layout"], pdf_bytes)?;
        Ok(layout_text_tables(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext-layout"
    }
}

/// Detect tables in `pdftotext -layout` output (pages separated by form feed).
fn layout_text_tables(text: &str) -> Vec<PageTables> {
    let mut pages: Vec<&str> = text.split('\x0c').collect();
    // pdftotext ends every page with a form feed
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }

    let mut detector = TableDetector::new();
    pages
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| {
            let lines = layout_lines(page_text);
            PageTables {
                page_number: i + 1,
                tables: detector.detect_page(&lines),
            }
        })
        .collect()
}

/// Check if pdftotext is available on the system.
pub fn is_available() -> bool {
    Command::new("pdftotext")
        .arg("-v")
        .output()
        .map(|o| o.status.success() || !o.stderr.is_empty())
        .unwrap_or(false)
}

/// Run pdftotext with `args` over the given bytes and return its stdout.
fn run_pdftotext(args: &[&str], pdf_bytes: &[u8]) -> Result<String, QuoteError> {
    let mut tmpfile =
        tempfile::NamedTempFile::new().map_err(|e| QuoteError::Extraction(e.to_string()))?;
    tmpfile
        .write_all(pdf_bytes)
        .map_err(|e| QuoteError::Extraction(e.to_string()))?;

    let output = Command::new("pdftotext")
        .args(args)
        .arg(tmpfile.path())
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                QuoteError::PdftotextNotFound
            } else {
                QuoteError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(classify_exit(code, stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Map a failed pdftotext exit code to an error. 1 is "error opening PDF"
/// and 3 is "permission denied"; both mean the upload itself is unusable.
fn classify_exit(code: i32, stderr: String) -> QuoteError {
    match code {
        1 | 3 => QuoteError::MalformedInput(stderr),
        _ => QuoteError::PdftotextFailed { code, stderr },
    }
}

/// Parse the XHTML written by `pdftotext -bbox` into words, one Vec per page.
fn parse_bbox_xhtml(xhtml: &str) -> Result<Vec<Vec<Word>>, QuoteError> {
    let mut reader = Reader::from_str(xhtml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Vec<Word>> = Vec::new();
    let mut word: Option<(BBox, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"page" => pages.push(Vec::new()),
                b"word" => word = Some((parse_bbox(&tag)?, String::new())),
                _ => {}
            },
            Ok(Event::Text(text)) => {
                if let Some((_, buf)) = word.as_mut() {
                    match text.unescape() {
                        Ok(s) => buf.push_str(&s),
                        Err(_) => buf.push_str(&String::from_utf8_lossy(&text)),
                    }
                }
            }
            Ok(Event::End(tag)) if tag.name().as_ref() == b"word" => {
                if let (Some((bbox, text)), Some(page)) = (word.take(), pages.last_mut()) {
                    let text = text.trim();
                    if !text.is_empty() {
                        page.push(Word {
                            text: text.to_string(),
                            bbox,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(QuoteError::Extraction(format!(
                    "unreadable pdftotext output at byte {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
    }

    Ok(pages)
}

fn parse_bbox(tag: &BytesStart<'_>) -> Result<BBox, QuoteError> {
    Ok(BBox {
        x_min: parse_attr_f32(tag, "xMin")?,
        y_min: parse_attr_f32(tag, "yMin")?,
        x_max: parse_attr_f32(tag, "xMax")?,
        y_max: parse_attr_f32(tag, "yMax")?,
    })
}

fn parse_attr_f32(tag: &BytesStart<'_>, name: &str) -> Result<f32, QuoteError> {
    let attr = tag
        .try_get_attribute(name)
        .map_err(|e| QuoteError::Extraction(e.to_string()))?
        .ok_or_else(|| QuoteError::Extraction(format!("word without {} attribute", name)))?;
    let value = attr
        .unescape_value()
        .map_err(|e| QuoteError::Extraction(e.to_string()))?;
    value
        .trim()
        .parse()
        .map_err(|_| QuoteError::Extraction(format!("invalid {} value '{}'", name, value)))
}
