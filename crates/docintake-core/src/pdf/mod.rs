//! PDF text layer extraction.

mod extractor;

pub use extractor::{LopdfTextLayer, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A source of exact text for PDF documents.
///
/// Implementations receive the raw file bytes and return the document's
/// embedded text. No recognition happens here, which is why the text source
/// attaches a fixed confidence to whatever this returns.
pub trait PdfTextLayer: Send + Sync {
    /// Extract the text layer of the whole document.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}
