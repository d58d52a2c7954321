//! Regex patterns for French identity and administrative documents.
//!
//! Patterns marked "alphabetic" run against the letters-only profile, where
//! every word is separated by exactly one space. Patterns marked "lowercase"
//! run against the digit-preserving profile. Each pattern's first capture
//! group holds the candidate value.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Surname (alphabetic): explicit label followed by a run of letters
    pub static ref SURNAME_LABELED: Regex = Regex::new(
        r"\b(?:nom de famille|nom et pr[ée]noms?|nom d usage|nom usuel|family name|surname|nom)\s+([a-zà-öø-ÿœæ]+(?:\s[a-zà-öø-ÿœæ]+)*)"
    ).unwrap();

    // Surname (alphabetic): word preceding an optional given name and a birth marker
    pub static ref SURNAME_BEFORE_BIRTH: Regex = Regex::new(
        r"\b([a-zà-öø-ÿœæ]+)\s(?:[a-zà-öø-ÿœæ]+\s)?(?:n[ée]e?(?:\se)?\sle|naissance)\b"
    ).unwrap();

    // Surname (lowercase): bare "nom:" label, not the tail of a longer word
    pub static ref SURNAME_BARE: Regex = Regex::new(
        r"(?:^|[^a-zà-öø-ÿœæ])nom\s*:\s*([a-zà-öø-ÿœæ]+(?:[ '\-][a-zà-öø-ÿœæ]+)*)"
    ).unwrap();

    // Surname (lowercase): name printed right after the card number
    pub static ref SURNAME_AFTER_CARD_NUMBER: Regex = Regex::new(
        r"(?:\bn°|\bno\.|\bnum[ée]ro|\bcard\s+n(?:o|umber))\s*:?\s*[a-z0-9]*\d[a-z0-9]*\s+([a-zà-öø-ÿœæ]+(?:['\-][a-zà-öø-ÿœæ]+)*)"
    ).unwrap();

    // Given names (alphabetic): explicit label followed by a run of letters
    pub static ref GIVEN_NAMES_LABELED: Regex = Regex::new(
        r"\b(?:pr[ée]noms?|first names?|given names?|forenames?)\s+([a-zà-öø-ÿœæ]+(?:\s[a-zà-öø-ÿœæ]+)*)"
    ).unwrap();

    // Given names (lowercase): bare "prénoms:" label
    pub static ref GIVEN_NAMES_BARE: Regex = Regex::new(
        r"(?:^|[^a-zà-öø-ÿœæ])pr[ée]noms?\s*:\s*([a-zà-öø-ÿœæ]+(?:[ ,'\-]+[a-zà-öø-ÿœæ]+)*)"
    ).unwrap();

    // Given names (lowercase): word preceding a birth marker or a date token
    pub static ref GIVEN_NAMES_BEFORE_BIRTH: Regex = Regex::new(
        r"(?:^|[^a-zà-öø-ÿœæ])([a-zà-öø-ÿœæ]+)\s*[,:]?\s(?:n[ée]e?\s*(?:\(e\))?\s+le\b|naissance|\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}\b|\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}\b)"
    ).unwrap();

    // Birth date (lowercase): explicit label followed by a date token
    pub static ref BIRTH_DATE_LABELED: Regex = Regex::new(
        r"(?:date\s+de\s+naissance|\bn[ée]e?\s*(?:\(e\))?\s+le|\bdob\b|birth\s*date|date\s+of\s+birth)\s*[:.]?\s*(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2})\b"
    ).unwrap();

    // Birth date (lowercase): "né(e)" with some noise before the token
    pub static ref BIRTH_DATE_BORN: Regex = Regex::new(
        r"\bn[ée]e?\b[^0-9]{0,12}?(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2})\b"
    ).unwrap();

    // Birth date (lowercase): "naissance:" followed by a date token
    pub static ref BIRTH_DATE_NAISSANCE: Regex = Regex::new(
        r"naissance\s*:?[^0-9]{0,20}?(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2})\b"
    ).unwrap();

    // Any day-month-year token
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2}[/.\-]\d{1,2}[/.\-](?:\d{4}|\d{2}))\b"
    ).unwrap();

    // Any year-month-day token
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2})\b"
    ).unwrap();

    // Resolver forms, applied after separators are normalized to '/'
    pub static ref RESOLVE_YEAR_LAST: Regex = Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$"
    ).unwrap();

    pub static ref RESOLVE_YEAR_FIRST: Regex = Regex::new(
        r"^(\d{4})/(\d{1,2})/(\d{1,2})$"
    ).unwrap();
}
