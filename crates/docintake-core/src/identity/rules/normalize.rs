//! Text normalization profiles used by the field cascades.

use std::fmt;

/// How raw text is reduced before patterns run against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Lowercase Latin letters and single spaces only. Digits and punctuation are dropped.
    Alphabetic,
    /// Lowercase with whitespace collapsed; digits, separators and labels' colons survive.
    Lowercase,
}

/// Check whether a lowercase character is a Latin letter, base or accented.
///
/// `æ` sits inside the `à..=ö` block; `÷` (between `ö` and `ø`) does not count.
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_lowercase() || matches!(c, 'à'..='ö' | 'ø'..='ÿ' | 'œ')
}

/// Text reduced under one [`Profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    profile: Profile,
    text: String,
}

impl NormalizedText {
    /// Normalize `raw` under `profile`.
    pub fn new(raw: &str, profile: Profile) -> Self {
        let lowered = raw.to_lowercase();
        let text = match profile {
            Profile::Alphabetic => {
                let filtered: String = lowered
                    .chars()
                    .map(|c| if is_latin_letter(c) || c.is_whitespace() { c } else { ' ' })
                    .collect();
                collapse_whitespace(&filtered)
            }
            Profile::Lowercase => collapse_whitespace(&lowered),
        };

        Self { profile, text }
    }

    /// Letters-only view for the name cascades.
    pub fn alphabetic(raw: &str) -> Self {
        Self::new(raw, Profile::Alphabetic)
    }

    /// Digit-preserving view for the date cascade.
    pub fn lowercase(raw: &str) -> Self {
        Self::new(raw, Profile::Lowercase)
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Both profiles of one recognized text, computed once per request.
#[derive(Debug, Clone)]
pub struct TextViews {
    alphabetic: NormalizedText,
    lowercase: NormalizedText,
}

impl TextViews {
    pub fn new(raw: &str) -> Self {
        Self {
            alphabetic: NormalizedText::alphabetic(raw),
            lowercase: NormalizedText::lowercase(raw),
        }
    }

    /// The view for `profile`.
    pub fn get(&self, profile: Profile) -> &str {
        match profile {
            Profile::Alphabetic => self.alphabetic.as_str(),
            Profile::Lowercase => self.lowercase.as_str(),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabetic_profile() {
        let text = NormalizedText::alphabetic("  Nom:  DUPONT\n\tPrénoms : Jean-Pierre  ");
        assert_eq!(text.as_str(), "nom dupont prénoms jean pierre");
        assert_eq!(text.profile(), Profile::Alphabetic);
    }

    #[test]
    fn test_alphabetic_keeps_accents() {
        let text = NormalizedText::alphabetic("ÉLOÏSE Cœur Ærø ÿ");
        assert_eq!(text.as_str(), "éloïse cœur ærø ÿ");
    }

    #[test]
    fn test_latin_letter_ranges() {
        for c in ['a', 'z', 'à', 'æ', 'ö', 'ø', 'ÿ', 'œ'] {
            assert!(is_latin_letter(c), "{:?}", c);
        }
        for c in ['÷', '×', '1', ' ', 'A'] {
            assert!(!is_latin_letter(c), "{:?}", c);
        }
    }

    #[test]
    fn test_alphabetic_drops_non_latin_symbols() {
        assert_eq!(NormalizedText::alphabetic("a÷b×c").as_str(), "a b c");
        assert_eq!(NormalizedText::alphabetic("n° 42 !?").as_str(), "n");
    }

    #[test]
    fn test_alphabetic_destroys_dates() {
        // Date tokens only survive the lowercase profile.
        let text = NormalizedText::alphabetic("Né le 12/05/1998");
        assert_eq!(text.as_str(), "né le");
    }

    #[test]
    fn test_lowercase_profile() {
        let text = NormalizedText::lowercase("Né(e) le\n 12/05/1998 ,  NOM:X");
        assert_eq!(text.as_str(), "né(e) le 12/05/1998 , nom:x");
    }

    #[test]
    fn test_empty_input() {
        assert!(NormalizedText::alphabetic("").is_empty());
        assert!(NormalizedText::lowercase(" \n\t ").is_empty());
        assert!(NormalizedText::alphabetic("123 / 456").is_empty());
    }

    #[test]
    fn test_views() {
        let views = TextViews::new("Nom: DUPONT 12.05.98");
        assert_eq!(views.get(Profile::Alphabetic), "nom dupont");
        assert_eq!(views.get(Profile::Lowercase), "nom: dupont 12.05.98");
    }
}
