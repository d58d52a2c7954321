//! Identity field parser running the surname, given-name and birth date cascades.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::scan::{ExtractionInput, FieldKind, FieldMatch, ScanResult};

use super::assembler::assemble;
use super::rules::{DateResolver, TextViews, BIRTH_DATE_CASCADE, GIVEN_NAMES_CASCADE, SURNAME_CASCADE};

/// Field values resolved from one text, with per-field diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Uppercase surname, stop-words removed.
    pub surname: Option<String>,
    /// Uppercase given names.
    pub given_names: Option<String>,
    /// ISO birth date.
    pub birth_date: Option<String>,
    /// Cascade outcomes in field order.
    pub matches: Vec<FieldMatch>,
}

impl ExtractedFields {
    /// Value resolved for `kind`.
    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Surname => self.surname.as_deref(),
            FieldKind::GivenNames => self.given_names.as_deref(),
            FieldKind::BirthDate => self.birth_date.as_deref(),
        }
    }
}

/// Rule-based parser for French identity documents.
#[derive(Debug, Clone)]
pub struct IdentityParser {
    date_resolver: DateResolver,
    preview_chars: usize,
}

impl IdentityParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            date_resolver: DateResolver::new(),
            preview_chars: 2000,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_strict_calendar(config.strict_calendar)
            .with_preview_chars(config.preview_chars)
    }

    /// Reject birth dates missing from the calendar.
    pub fn with_strict_calendar(mut self, strict: bool) -> Self {
        self.date_resolver = self.date_resolver.with_strict_calendar(strict);
        self
    }

    /// Set the length of the raw text preview.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Run all field cascades over `text`.
    pub fn extract_fields(&self, text: &str) -> ExtractedFields {
        let views = TextViews::new(text);

        let surname = SURNAME_CASCADE.run(&views);
        let given_names = GIVEN_NAMES_CASCADE.run(&views);
        let mut birth_date = BIRTH_DATE_CASCADE.run(&views);

        // The cascade yields the raw token; an unreadable one leaves the field absent.
        if let Some(token) = birth_date.matched.as_deref() {
            match self.date_resolver.resolve(token) {
                Ok(iso) => birth_date.value = Some(iso),
                Err(e) => {
                    warn!("Birth date token rejected: {}", e);
                    birth_date.value = None;
                }
            }
        }

        for m in [&surname, &given_names, &birth_date] {
            debug!(
                "{}: pattern {:?} matched {:?} -> {:?}",
                m.field, m.pattern_index, m.matched, m.value
            );
        }

        ExtractedFields {
            surname: surname.value.clone(),
            given_names: given_names.value.clone(),
            birth_date: birth_date.value.clone(),
            matches: vec![surname, given_names, birth_date],
        }
    }

    /// Extract fields from recognized text and assemble the scan result.
    pub fn parse(&self, input: &ExtractionInput) -> ScanResult {
        self.parse_detailed(input).1
    }

    /// Like [`parse`](Self::parse), also returning the per-field diagnostics.
    pub fn parse_detailed(&self, input: &ExtractionInput) -> (ExtractedFields, ScanResult) {
        let start = Instant::now();

        info!("Parsing identity fields from {} characters of text", input.text.len());

        let fields = self.extract_fields(&input.text);
        let result = assemble(&fields, input, self.preview_chars);

        debug!(
            "Resolved {}/3 fields with source confidence {:.1} in {}µs",
            result.resolved_count(),
            result.confidence,
            start.elapsed().as_micros()
        );

        (fields, result)
    }
}

impl Default for IdentityParser {
    fn default() -> Self {
        Self::new()
    }
}
