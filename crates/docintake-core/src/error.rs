//! Error types for the docintake-core library.

use std::time::Duration;

use thiserror::Error;

/// Main error type for a document intake request.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// The request carried no file part.
    #[error("no file uploaded")]
    NoFile,

    /// The request carried more than one file part.
    #[error("expected a single file, got {0}")]
    TooManyFiles(usize),

    /// Declared MIME type is not PDF, JPEG or PNG.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// File exceeds the configured size ceiling.
    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    /// The text source failed; fatal for the request.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Staging I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntakeError {
    /// Whether the error was caused by the caller's input (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IntakeError::NoFile
                | IntakeError::TooManyFiles(_)
                | IntakeError::UnsupportedFormat(_)
                | IntakeError::FileTooLarge { .. }
        )
    }
}

/// Errors raised while obtaining text from a staged document.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// PDF text layer extraction failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR engine failed.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// The engine did not answer within the configured deadline.
    #[error("text source timed out after {0:?}")]
    Timeout(Duration),

    /// The blocking worker running the engine panicked or was cancelled.
    #[error("text source worker failed: {0}")]
    Worker(String),

    /// Reading the staged file failed.
    #[error("failed to read staged file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// None of the requested languages is covered by the loaded model.
    #[error("unsupported language hint(s): {0}")]
    UnsupportedLanguage(String),
}

impl From<image::ImageError> for OcrError {
    fn from(err: image::ImageError) -> Self {
        OcrError::InvalidImage(err.to_string())
    }
}

/// A matched date token that neither the year-last nor the year-first form accepts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unparseable date: {0:?}")]
pub struct UnparseableDateError(pub String);

/// Result type for the docintake library.
pub type Result<T> = std::result::Result<T, IntakeError>;
