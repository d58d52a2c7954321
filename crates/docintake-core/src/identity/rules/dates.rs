//! Birth date cascade and date token resolution.

use chrono::NaiveDate;
use lazy_static::lazy_static;

use super::cascade::{Cascade, Rule};
use super::normalize::Profile;
use super::patterns::{
    BIRTH_DATE_BORN, BIRTH_DATE_LABELED, BIRTH_DATE_NAISSANCE, DATE_DMY, DATE_YMD,
    RESOLVE_YEAR_FIRST, RESOLVE_YEAR_LAST,
};
use crate::error::UnparseableDateError;
use crate::models::scan::FieldKind;

lazy_static! {
    pub static ref BIRTH_DATE_CASCADE: Cascade = Cascade::new(
        FieldKind::BirthDate,
        vec![
            Rule::new(Profile::Lowercase, &BIRTH_DATE_LABELED, keep_token),
            Rule::new(Profile::Lowercase, &BIRTH_DATE_BORN, keep_token),
            Rule::new(Profile::Lowercase, &BIRTH_DATE_NAISSANCE, keep_token),
            Rule::new(Profile::Lowercase, &DATE_DMY, keep_token),
            Rule::new(Profile::Lowercase, &DATE_YMD, keep_token),
        ],
    );
}

fn keep_token(capture: &str) -> String {
    capture.trim().to_string()
}

/// Turns matched date tokens into ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateResolver {
    strict_calendar: bool,
}

impl DateResolver {
    /// Resolver that accepts any day/month numbers, e.g. `1999-02-30`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that also rejects dates absent from the calendar.
    pub fn strict() -> Self {
        Self {
            strict_calendar: true,
        }
    }

    pub fn with_strict_calendar(mut self, strict: bool) -> Self {
        self.strict_calendar = strict;
        self
    }

    /// Resolve a `DD/MM/YYYY` or `YYYY/MM/DD` token (separators `/ - .`).
    ///
    /// The year-last form is tried first. Two-digit years are read as 19xx.
    pub fn resolve(&self, token: &str) -> Result<String, UnparseableDateError> {
        let unified: String = token
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '.' { '/' } else { c })
            .collect();

        let (year, month, day) = if let Some(caps) = RESOLVE_YEAR_LAST.captures(&unified) {
            (caps[3].to_string(), caps[2].to_string(), caps[1].to_string())
        } else if let Some(caps) = RESOLVE_YEAR_FIRST.captures(&unified) {
            (caps[1].to_string(), caps[2].to_string(), caps[3].to_string())
        } else {
            return Err(UnparseableDateError(token.to_string()));
        };

        // Fixed century: "05" becomes 1905, not 2005.
        let year = if year.len() == 2 { format!("19{}", year) } else { year };

        let iso = format!("{}-{:0>2}-{:0>2}", year, month, day);

        if self.strict_calendar && NaiveDate::parse_from_str(&iso, "%Y-%m-%d").is_err() {
            return Err(UnparseableDateError(token.to_string()));
        }

        Ok(iso)
    }
}

/// Resolve a date token with the default (non-strict) resolver.
pub fn resolve_date(token: &str) -> Result<String, UnparseableDateError> {
    DateResolver::new().resolve(token)
}
