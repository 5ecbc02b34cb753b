pub mod pdftotext;
pub mod table;

use crate::error::QuoteError;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center_y(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }
}

/// A positioned word on a page, as reported by the PDF backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub bbox: BBox,
}

/// One table as a grid of cells, top row first.
///
/// `None` marks a position where the detector found no text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<Option<String>>>,
}

/// Tables detected on a single page of a PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTables {
    pub page_number: usize,
    pub tables: Vec<RawTable>,
}

/// Trait for table detection backends.
///
/// Implementations turn PDF bytes into raw cell grids; aligning cells to the
/// quote review columns happens afterwards and does not depend on the backend.
pub trait TableSource: Send + Sync {
    /// Detect tables in PDF bytes, returning one PageTables per page.
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, QuoteError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Tolerances for grouping positioned words into lines and cells.
#[derive(Debug, Clone)]
pub struct GeometryOptions {
    /// Maximum vertical distance (points) between a word's centre and the
    /// centre of the line it joins.
    pub y_tolerance: f32,
    /// A gap wider than this fraction of the line's median word height
    /// starts a new cell.
    pub cell_gap_ratio: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            y_tolerance: 3.0,
            cell_gap_ratio: 0.5,
        }
    }
}

/// The table detection backends shipped with quotescan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Word bounding boxes from `pdftotext -bbox`.
    #[default]
    Bbox,
    /// Character columns from `pdftotext -layout`.
    Layout,
}

impl Backend {
    pub fn source(self, geometry: GeometryOptions) -> Box<dyn TableSource> {
        match self {
            Backend::Bbox => Box::new(pdftotext::PdftotextBboxSource::new(geometry)),
            Backend::Layout => Box::new(pdftotext::PdftotextLayoutSource::new()),
        }
    }
}

impl FromStr for Backend {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bbox" => Ok(Backend::Bbox),
            "layout" => Ok(Backend::Layout),
            other => Err(QuoteError::UnknownBackend(other.to_string())),
        }
    }
}

/// Fail with `MalformedInput` unless the bytes carry a PDF signature.
///
/// Readers accept up to 1024 bytes of junk before `%PDF-`, so this does too.
pub fn check_pdf_signature(pdf_bytes: &[u8]) -> Result<(), QuoteError> {
    let head = &pdf_bytes[..pdf_bytes.len().min(1024)];
    if head.windows(5).any(|w| w == b"%PDF-") {
        Ok(())
    } else if pdf_bytes.is_empty() {
        Err(QuoteError::MalformedInput("file is empty".into()))
    } else {
        Err(QuoteError::MalformedInput("missing %PDF- header".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_signature() {
        assert!(check_pdf_signature(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").is_ok());
        assert!(check_pdf_signature(b"\r\n\r\n%PDF-1.4").is_ok());
        assert!(matches!(
            check_pdf_signature(b"<html>not a pdf</html>"),
            Err(QuoteError::MalformedInput(_))
        ));
        assert!(matches!(
            check_pdf_signature(b""),
            Err(QuoteError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_signature_beyond_first_kilobyte_rejected() {
        let mut bytes = vec![b' '; 2048];
        bytes.extend_from_slice(b"%PDF-1.4");
        assert!(check_pdf_signature(&bytes).is_err());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("bbox".parse::<Backend>().unwrap(), Backend::Bbox);
        assert_eq!(" Layout ".parse::<Backend>().unwrap(), Backend::Layout);
        assert!(matches!(
            "tabula".parse::<Backend>(),
            Err(QuoteError::UnknownBackend(_))
        ));
    }
}
