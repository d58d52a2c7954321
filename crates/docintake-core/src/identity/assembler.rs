//! Builds the caller-facing `ScanResult`.

use crate::models::scan::{ExtractionInput, FieldKind, ScanResult, TRUNCATION_MARKER};

use super::parser::ExtractedFields;

/// First `limit` characters of `text`, marked when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Aggregate field outcomes and source data into a `ScanResult`.
pub fn assemble(fields: &ExtractedFields, input: &ExtractionInput, preview_chars: usize) -> ScanResult {
    let errors: Vec<String> = FieldKind::ALL
        .iter()
        .filter(|kind| fields.get(**kind).is_none())
        .map(|kind| kind.missing_message().to_string())
        .collect();

    let full_text_length = input.text.chars().count();

    ScanResult {
        raw_text: preview(&input.text, preview_chars),
        full_text_length,
        truncated: full_text_length > preview_chars,
        surname: fields.surname.clone(),
        given_names: fields.given_names.clone(),
        birth_date: fields.birth_date.clone(),
        confidence: input.confidence,
        success: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(surname: Option<&str>, given: Option<&str>, date: Option<&str>) -> ExtractedFields {
        ExtractedFields {
            surname: surname.map(str::to_string),
            given_names: given.map(str::to_string),
            birth_date: date.map(str::to_string),
            matches: Vec::new(),
        }
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("abc", 5), "abc");
        assert_eq!(preview("abcde", 5), "abcde");
        assert_eq!(preview("abcdef", 5), format!("abcde{}", TRUNCATION_MARKER));
        assert_eq!(preview("ééééé", 2), format!("éé{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_all_fields_present() {
        let input = ExtractionInput::new("text", 95.0);
        let result = assemble(&fields(Some("DUPONT"), Some("JEAN"), Some("1998-05-12")), &input, 2000);

        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(result.confidence, 95.0);
        assert_eq!(result.full_text_length, 4);
        assert!(!result.is_truncated());
    }

    #[test]
    fn test_error_count_matches_missing_fields() {
        let input = ExtractionInput::new("", 0.0);
        let cases = [
            (fields(None, None, None), 3),
            (fields(Some("A"), None, None), 2),
            (fields(None, Some("B"), Some("1990-01-01")), 1),
            (fields(Some("A"), Some("B"), Some("1990-01-01")), 0),
        ];

        for (f, expected) in cases {
            let result = assemble(&f, &input, 10);
            assert_eq!(result.errors.len(), expected);
            assert_eq!(result.errors.len(), 3 - result.resolved_count());
            assert_eq!(result.success, expected == 0);
        }
    }

    #[test]
    fn test_error_messages_in_field_order() {
        let input = ExtractionInput::new("", 0.0);
        let result = assemble(&fields(None, Some("MARIE"), None), &input, 10);
        assert_eq!(
            result.errors,
            vec!["Surname not detected".to_string(), "Birth date not detected".to_string()]
        );
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "x".repeat(2500);
        let input = ExtractionInput::new(text, 50.0);
        let result = assemble(&fields(None, None, None), &input, 2000);

        assert!(result.is_truncated());
        assert_eq!(result.full_text_length, 2500);
        assert_eq!(result.raw_text.chars().count(), 2000 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_text_ending_with_marker_is_not_truncated() {
        let text = format!("Nom: X{}", TRUNCATION_MARKER);
        let input = ExtractionInput::new(text.clone(), 1.0);
        let result = assemble(&fields(None, None, None), &input, 2000);

        assert!(!result.is_truncated());
        assert_eq!(result.raw_text, text);
        assert_eq!(result.full_text_length, text.chars().count());
    }

    #[test]
    fn test_text_at_preview_limit_is_not_truncated() {
        let input = ExtractionInput::new("abcde", 1.0);
        assert!(!assemble(&fields(None, None, None), &input, 5).is_truncated());
        assert!(assemble(&fields(None, None, None), &input, 4).is_truncated());
    }
}
