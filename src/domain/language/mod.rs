pub mod catalog;

pub use catalog::{find_language, supported_languages, LanguageOption};

use serde::{Deserialize, Serialize};

/// Language identifier as understood by the speech service (e.g. `es-ES`, `hi`, `zh-Hans`).
///
/// The code is opaque: it is only checked for presence and used as a lookup key
/// for voices and cached synthesizers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Build a code from user input, trimming surrounding whitespace.
    /// Returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
