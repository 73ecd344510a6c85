// File: puntos-validation/src/patterns.rs
// Purpose: Built-in patterns and the serializable Pattern wrapper

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const PHONE_PATTERN: &str = r"^[0-9\s\-\+\(\)]+$";

pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio";
pub const EMAIL_MESSAGE: &str = "Ingresa un email válido";
pub const PHONE_MESSAGE: &str = "Ingresa un teléfono válido";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).unwrap());

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate phone format (ASCII digits, spaces, `-`, `+` and parentheses)
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// A compiled regular expression that serializes as its source text.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    pub fn email() -> Self {
        Self(EMAIL_REGEX.clone())
    }

    pub fn phone() -> Self {
        Self(PHONE_REGEX.clone())
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("vecino+reciclaje@municipio.gob.ar"));
        assert!(is_valid_email("user.name@example.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("sin-arroba.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("+54 (11) 4567-8900"));
        assert!(is_valid_phone("4567 8900"));
        assert!(!is_valid_phone("llamar al 4567"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_phone_rejects_non_ascii_digits() {
        // Arabic-Indic and fullwidth digits
        assert!(!is_valid_phone("\u{0664}\u{0665}\u{0666}"));
        assert!(!is_valid_phone("\u{FF11}\u{FF12}\u{FF13}"));
    }

    #[test]
    fn test_pattern_serializes_as_source() {
        let pattern = Pattern::email();
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, serde_json::to_string(EMAIL_PATTERN).unwrap());

        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
    }

    #[test]
    fn test_pattern_rejects_invalid_source() {
        let result: Result<Pattern, _> = serde_json::from_str("\"(unclosed\"");
        assert!(result.is_err());
    }
}
