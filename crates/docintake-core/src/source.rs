//! Text source adapter: one entry point over PDF text layers and OCR.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::IntakeConfig;
use crate::models::scan::ExtractionInput;
use crate::ocr::OcrBackend;
use crate::pdf::PdfTextLayer;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Jpeg,
    Png,
}

impl DocumentKind {
    /// Classify a declared MIME type.
    ///
    /// The subtype is matched case-insensitively, parameters after `;` are
    /// ignored and `image/jpg` is accepted as an alias of `image/jpeg`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(DocumentKind::Pdf),
            "image/jpeg" | "image/jpg" => Some(DocumentKind::Jpeg),
            "image/png" => Some(DocumentKind::Png),
            _ => None,
        }
    }

    /// Guess the declared MIME type from a file extension.
    pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some("application/pdf"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            _ => None,
        }
    }

    /// File extension used when staging the upload.
    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Jpeg => "jpg",
            DocumentKind::Png => "png",
        }
    }

    pub fn is_image(self) -> bool {
        !matches!(self, DocumentKind::Pdf)
    }
}

/// Dispatches a staged document to the PDF text layer or the OCR engine.
#[derive(Clone)]
pub struct TextSource {
    pdf: Arc<dyn PdfTextLayer>,
    ocr: Arc<dyn OcrBackend>,
    languages: Vec<String>,
    text_layer_confidence: f32,
}

impl TextSource {
    /// Create a text source over the given engines.
    pub fn new(pdf: Arc<dyn PdfTextLayer>, ocr: Arc<dyn OcrBackend>) -> Self {
        Self {
            pdf,
            ocr,
            languages: vec!["fra".to_string()],
            text_layer_confidence: 95.0,
        }
    }

    /// Apply language hints and the PDF confidence from configuration.
    pub fn with_config(mut self, config: &IntakeConfig) -> Self {
        self.languages = config.ocr.languages.clone();
        self.text_layer_confidence = config.pdf.text_layer_confidence;
        self
    }

    /// Set the OCR language hints.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Set the confidence attached to PDF text layers.
    pub fn with_text_layer_confidence(mut self, confidence: f32) -> Self {
        self.text_layer_confidence = confidence;
        self
    }

    /// Obtain raw text and confidence for the document at `path`.
    pub fn extract(&self, path: &Path, kind: DocumentKind) -> Result<ExtractionInput, ExtractionError> {
        let start = Instant::now();

        let input = match kind {
            DocumentKind::Pdf => {
                let data = std::fs::read(path)?;
                let text = self.pdf.extract_text(&data)?;
                ExtractionInput::new(text, self.text_layer_confidence)
            }
            DocumentKind::Jpeg | DocumentKind::Png => {
                let recognition = self.ocr.recognize(path, &self.languages)?;
                ExtractionInput::new(recognition.text, recognition.confidence.unwrap_or(0.0))
            }
        };

        info!(
            "Extracted {} characters from {:?} document in {}ms",
            input.text.chars().count(),
            kind,
            start.elapsed().as_millis()
        );
        debug!("Source confidence: {:.1}", input.confidence);

        Ok(input)
    }
}
