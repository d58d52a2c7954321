//! Ordered pattern cascades.

use regex::Regex;
use tracing::trace;

use super::normalize::{Profile, TextViews};
use crate::models::scan::{FieldKind, FieldMatch};

/// One step of a cascade: where to look, what to match, how to clean the capture.
pub struct Rule {
    /// Normalization profile the pattern runs against.
    pub profile: Profile,
    /// Pattern whose first capture group holds the candidate.
    pub pattern: &'static Regex,
    /// Cleans a capture; an empty result rejects it.
    pub post: fn(&str) -> String,
}

impl Rule {
    pub fn new(profile: Profile, pattern: &'static Regex, post: fn(&str) -> String) -> Self {
        Self {
            profile,
            pattern,
            post,
        }
    }
}

/// Strict-priority list of rules for one field.
///
/// The first rule yielding a non-empty cleaned capture wins; later rules are
/// never consulted. Within a rule, matches are tried left to right.
pub struct Cascade {
    field: FieldKind,
    rules: Vec<Rule>,
}

impl Cascade {
    pub fn new(field: FieldKind, rules: Vec<Rule>) -> Self {
        Self { field, rules }
    }

    pub fn field(&self) -> FieldKind {
        self.field
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the cascade over both views of a text.
    pub fn run(&self, views: &TextViews) -> FieldMatch {
        for (index, rule) in self.rules.iter().enumerate() {
            let text = views.get(rule.profile);

            for caps in rule.pattern.captures_iter(text) {
                let Some(capture) = caps.get(1) else {
                    continue;
                };

                let value = (rule.post)(capture.as_str());
                if value.is_empty() {
                    trace!(
                        "{} pattern {} rejected capture {:?}",
                        self.field,
                        index,
                        capture.as_str()
                    );
                    continue;
                }

                trace!("{} pattern {} matched {:?}", self.field, index, capture.as_str());
                return FieldMatch {
                    field: self.field,
                    matched: Some(capture.as_str().to_string()),
                    value: Some(value),
                    pattern_index: Some(index),
                };
            }
        }

        FieldMatch::unmatched(self.field)
    }
}
