//! JSON envelope returned to the caller for one scan request.

use serde::Serialize;

use crate::error::{ExtractionError, IntakeError};
use crate::models::scan::ScanResult;

/// Response payload for a scan request.
///
/// Every variant carries a top-level `success` flag. For a completed scan it
/// mirrors `data.success`, so a partial extraction is still a 200 response
/// with `success: false`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ScanResponse {
    /// The document was read and parsed, whether or not every field was found.
    Completed {
        success: bool,
        data: ScanResult,
        raw_text: String,
        full_text_length: usize,
        confidence: f32,
    },

    /// The upload was refused before processing.
    Rejected {
        success: bool,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        debug: Option<String>,
        #[serde(skip)]
        status: u16,
    },

    /// Processing failed after the upload was accepted.
    Failed {
        success: bool,
        error: String,
        details: String,
        #[serde(skip)]
        status: u16,
    },
}

impl ScanResponse {
    /// Build the response for a finished request.
    pub fn from_result(result: Result<ScanResult, IntakeError>) -> Self {
        match result {
            Ok(data) => Self::completed(data),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn completed(data: ScanResult) -> Self {
        ScanResponse::Completed {
            success: data.success,
            raw_text: data.raw_text.clone(),
            full_text_length: data.full_text_length,
            confidence: data.confidence,
            data,
        }
    }

    /// Map an intake error to a rejection or failure.
    pub fn from_error(error: &IntakeError) -> Self {
        let rejected = |message: &str, debug: Option<String>, status: u16| ScanResponse::Rejected {
            success: false,
            error: message.to_string(),
            debug,
            status,
        };

        match error {
            IntakeError::NoFile => rejected("No file uploaded", None, 400),
            IntakeError::TooManyFiles(n) => {
                rejected("Only one file can be uploaded", Some(format!("received {} files", n)), 400)
            }
            IntakeError::UnsupportedFormat(mime) => rejected(
                "Unsupported file type: expected a PDF, JPEG or PNG document",
                Some(format!("declared type: {}", mime)),
                415,
            ),
            IntakeError::FileTooLarge { size, limit } => rejected(
                "File too large",
                Some(format!("{} bytes exceeds the {} byte limit", size, limit)),
                413,
            ),
            IntakeError::Extraction(ExtractionError::Timeout(_)) => ScanResponse::Failed {
                success: false,
                error: "Text extraction timed out".to_string(),
                details: error.to_string(),
                status: 504,
            },
            IntakeError::Extraction(_) | IntakeError::Io(_) => {
                ScanResponse::Failed {
                    success: false,
                    error: "Document processing failed".to_string(),
                    details: error.to_string(),
                    status: 500,
                }
            }
        }
    }

    /// HTTP status code equivalent of this response.
    pub fn http_status(&self) -> u16 {
        match self {
            ScanResponse::Completed { .. } => 200,
            ScanResponse::Rejected { status, .. } | ScanResponse::Failed { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            ScanResponse::Completed { success, .. } => *success,
            _ => false,
        }
    }
}
