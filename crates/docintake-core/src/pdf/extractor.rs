//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfTextLayer, Result};
use crate::error::PdfError;

/// A loaded PDF document.
pub struct PdfExtractor {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Parse a PDF from bytes.
    ///
    /// Documents encrypted with an empty user password are decrypted and
    /// re-serialized so that pdf-extract can read them.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted_data
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self {
            document: doc,
            raw_data,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Extract text from the entire document.
    pub fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Default [`PdfTextLayer`] backed by [`PdfExtractor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfTextLayer;

impl LopdfTextLayer {
    pub fn new() -> Self {
        Self
    }
}

impl PdfTextLayer for LopdfTextLayer {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let extractor = PdfExtractor::load(data)?;
        let text = extractor.extract_text()?;

        // Scanned PDFs carry no text layer; the cascades then report every field missing.
        if text.trim().is_empty() {
            warn!(
                "PDF with {} pages has an empty text layer",
                extractor.page_count()
            );
        }

        Ok(text)
    }
}
