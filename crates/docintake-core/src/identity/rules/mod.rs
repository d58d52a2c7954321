//! Rule-based field extractors for French identity documents.

pub mod cascade;
pub mod dates;
pub mod names;
pub mod normalize;
pub mod patterns;

pub use cascade::{Cascade, Rule};
pub use dates::{resolve_date, DateResolver, BIRTH_DATE_CASCADE};
pub use names::{strip_stop_words, GIVEN_NAMES_CASCADE, STOP_WORDS, SURNAME_CASCADE};
pub use normalize::{NormalizedText, Profile, TextViews};
