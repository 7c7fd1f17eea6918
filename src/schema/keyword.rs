use serde::{Deserialize, Serialize};
use std::fmt;

/// A term or short phrase that survived extraction filtering and can
/// anchor a quiz question.
///
/// Keywords keep the casing of their first occurrence in the source text.
/// Equality between keywords inside an extracted set is decided
/// case-insensitively by the extractor, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for dedup and stop-word comparison.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    /// True if this keyword is made of more than one word.
    pub fn is_phrase(&self) -> bool {
        self.0.contains(' ')
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Keyword {
    fn from(term: &str) -> Self {
        Self::new(term)
    }
}
