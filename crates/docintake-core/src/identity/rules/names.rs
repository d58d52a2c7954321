//! Surname and given-name cascades with their post-processing.

use lazy_static::lazy_static;

use super::cascade::{Cascade, Rule};
use super::normalize::{NormalizedText, Profile};
use super::patterns::{
    GIVEN_NAMES_BARE, GIVEN_NAMES_BEFORE_BIRTH, GIVEN_NAMES_LABELED, SURNAME_AFTER_CARD_NUMBER,
    SURNAME_BARE, SURNAME_BEFORE_BIRTH, SURNAME_LABELED,
};
use crate::models::scan::FieldKind;

/// Articles and prepositions dropped from surnames.
pub const STOP_WORDS: &[&str] = &["le", "la", "les", "de", "du", "des", "à", "au"];

/// Words that start another field; a name capture ends before the first one.
const LABEL_WORDS: &[&str] = &[
    "nom", "noms", "prénom", "prénoms", "prenom", "prenoms", "né", "née", "ne", "nee",
    "naissance", "date", "sexe", "sex", "lieu", "taille", "nationalité", "nationalite",
    "adresse", "domicile", "signature", "surname", "name", "names", "given", "first",
    "forename", "forenames", "family", "birth", "dob", "carte", "card",
];

lazy_static! {
    pub static ref SURNAME_CASCADE: Cascade = Cascade::new(
        FieldKind::Surname,
        vec![
            Rule::new(Profile::Alphabetic, &SURNAME_LABELED, clean_surname),
            Rule::new(Profile::Alphabetic, &SURNAME_BEFORE_BIRTH, clean_surname),
            Rule::new(Profile::Lowercase, &SURNAME_BARE, clean_surname),
            Rule::new(Profile::Lowercase, &SURNAME_AFTER_CARD_NUMBER, clean_surname),
        ],
    );

    pub static ref GIVEN_NAMES_CASCADE: Cascade = Cascade::new(
        FieldKind::GivenNames,
        vec![
            Rule::new(Profile::Alphabetic, &GIVEN_NAMES_LABELED, clean_given_names),
            Rule::new(Profile::Lowercase, &GIVEN_NAMES_BARE, clean_given_names),
            Rule::new(Profile::Lowercase, &GIVEN_NAMES_BEFORE_BIRTH, clean_given_names),
        ],
    );
}

/// Check whether `word` is a surname stop-word, ignoring case.
pub fn is_stop_word(word: &str) -> bool {
    let lowered = word.to_lowercase();
    STOP_WORDS.contains(&lowered.as_str())
}

/// Remove whole-word stop-words and collapse whitespace.
///
/// Only standalone words are removed: `"DELAGE"` or `"LEBLANC"` are kept
/// intact even though they begin with a stop-word.
pub fn strip_stop_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !is_stop_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Words of `capture` before the first field label.
fn words_before_label(capture: &str) -> Vec<String> {
    NormalizedText::alphabetic(capture)
        .as_str()
        .split(' ')
        .filter(|w| !w.is_empty())
        .take_while(|w| !LABEL_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Clean a surname capture: cut at the next label, drop stop-words, uppercase.
pub fn clean_surname(capture: &str) -> String {
    let words = words_before_label(capture).join(" ");
    strip_stop_words(&words).to_uppercase()
}

/// Clean a given-names capture: cut at the next label, collapse, uppercase.
///
/// A capture made only of stop-words (the "de" of "date de naissance") is rejected.
pub fn clean_given_names(capture: &str) -> String {
    let words = words_before_label(capture);
    if words.iter().all(|w| is_stop_word(w)) {
        return String::new();
    }

    words.join(" ").to_uppercase()
}
