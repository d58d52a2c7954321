//! Core library for identity document intake.
//!
//! This crate provides:
//! - Upload validation and scoped staging of the uploaded file
//! - Text sources: PDF text layer (lopdf/pdf-extract) and OCR (pure-onnx-ocr)
//! - Field extraction for French administrative documents (surname, given
//!   names, birth date) via ordered pattern cascades
//! - The caller-facing `ScanResult` and its JSON response envelope

pub mod error;
pub mod models;
pub mod pdf;
pub mod ocr;
pub mod source;
pub mod identity;
pub mod intake;
pub mod response;

pub use error::{ExtractionError, IntakeError, OcrError, PdfError, Result, UnparseableDateError};
pub use models::config::IntakeConfig;
pub use models::scan::{ExtractionInput, FieldKind, FieldMatch, ScanResult};
pub use pdf::{LopdfTextLayer, PdfExtractor, PdfTextLayer};
pub use ocr::{OcrBackend, Recognition};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use source::{DocumentKind, TextSource};
pub use identity::{ExtractedFields, IdentityParser};
pub use intake::{IncomingFile, StagedFile, UploadLifecycleManager};
pub use response::ScanResponse;
