//! Extraction inputs and the caller-facing scan result.

use serde::{Deserialize, Serialize};

/// Appended to `ScanResult::raw_text` when the recognized text was cut.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Raw recognized text together with the source's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionInput {
    /// Full recognized text.
    pub text: String,

    /// Recognition confidence (0 - 100).
    pub confidence: f32,
}

impl ExtractionInput {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 100.0),
        }
    }
}

/// Structured field pre-filled from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Family name.
    Surname,
    /// Given names.
    GivenNames,
    /// Birth date.
    BirthDate,
}

impl FieldKind {
    /// All fields, in the order they are reported.
    pub const ALL: [FieldKind; 3] = [FieldKind::Surname, FieldKind::GivenNames, FieldKind::BirthDate];

    /// Message reported when the field could not be resolved.
    pub fn missing_message(self) -> &'static str {
        match self {
            FieldKind::Surname => "Surname not detected",
            FieldKind::GivenNames => "Given names not detected",
            FieldKind::BirthDate => "Birth date not detected",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Surname => write!(f, "surname"),
            FieldKind::GivenNames => write!(f, "given-names"),
            FieldKind::BirthDate => write!(f, "birth-date"),
        }
    }
}

/// Diagnostic outcome of one field cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMatch {
    /// Field the cascade was run for.
    pub field: FieldKind,

    /// Substring captured by the winning pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,

    /// Cleaned value (uppercased name, ISO date).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Zero-based index of the winning pattern in the cascade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_index: Option<usize>,
}

impl FieldMatch {
    /// Outcome of a cascade where no pattern matched.
    pub fn unmatched(field: FieldKind) -> Self {
        Self {
            field,
            matched: None,
            value: None,
            pattern_index: None,
        }
    }
}

/// Result of scanning one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Recognized text, truncated to a bounded preview.
    pub raw_text: String,

    /// Length of the full recognized text, in characters.
    pub full_text_length: usize,

    /// Whether `raw_text` was cut short and carries the truncation marker.
    #[serde(default)]
    pub truncated: bool,

    /// Family name (uppercase, stop-words removed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Given names (uppercase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_names: Option<String>,

    /// Birth date (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Source confidence (0 - 100).
    pub confidence: f32,

    /// True iff all three fields were resolved.
    pub success: bool,

    /// One entry per unresolved field.
    pub errors: Vec<String>,
}

impl ScanResult {
    /// Whether the preview was cut short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of resolved fields.
    pub fn resolved_count(&self) -> usize {
        [&self.surname, &self.given_names, &self.birth_date]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }
}
