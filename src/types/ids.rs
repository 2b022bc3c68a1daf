use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

lazy_static::lazy_static! {
    /// A run of exactly 32 hex digits closing a path segment: `Title-<hex>` or `<hex>`.
    static ref TRAILING_HEX: Regex = Regex::new(r"(?:^|[^0-9a-fA-F])([0-9a-fA-F]{32})$")
        .expect("Failed to compile trailing-hex regex - this is a bug in the code");

    static ref BARE_HEX: Regex = Regex::new(r"^[0-9a-fA-F]{32}$")
        .expect("Failed to compile bare-hex regex - this is a bug in the code");

    static ref DASHED: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .expect("Failed to compile dashed-id regex - this is a bug in the code");
}

/// A Notion object identifier in canonical form: lower-case hex, dashed 8-4-4-4-12.
///
/// Accepts three input shapes, tried in order:
/// 1. a link whose last path segment ends in 32 hex digits
///    (`https://www.notion.so/ws/My-Page-<hex>?v=...`), or a peek link with `?p=<hex>`
/// 2. a bare 32-character hex string
/// 3. an already-dashed identifier
///
/// All three shapes referring to the same object produce the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String);

impl NotionId {
    /// Parses any accepted identifier shape.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim();
        if cleaned.is_empty() {
            return Err(ValidationError::InvalidId(
                "identifier cannot be empty".to_string(),
            ));
        }

        if looks_like_link(cleaned) {
            return Self::extract_from_url(cleaned);
        }

        if BARE_HEX.is_match(cleaned) {
            return Ok(Self::from_hex(cleaned));
        }

        if DASHED.is_match(cleaned) {
            return Ok(NotionId(cleaned.to_ascii_lowercase()));
        }

        Err(ValidationError::InvalidId(format!(
            "Cannot extract an ID from: {} (expected a Notion link, 32 hex characters, or a dashed UUID)",
            cleaned
        )))
    }

    /// Returns the canonical dashed form used in every resource path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Inserts dashes at 8-4-4-4-12 into a validated 32-digit hex string.
    fn from_hex(hex: &str) -> Self {
        let hex = hex.to_ascii_lowercase();
        NotionId(format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }

    /// Extracts the identifier from a Notion link.
    fn extract_from_url(link: &str) -> Result<Self, ValidationError> {
        let with_scheme = if link.contains("://") {
            link.to_string()
        } else {
            format!("https://{}", link)
        };

        let url = Url::parse(&with_scheme).map_err(|e| {
            ValidationError::InvalidId(format!("Malformed URL {}: {}", link, e))
        })?;

        // Peek links open a page over another one; `p` names the page on top.
        if let Some((_, peeked)) = url.query_pairs().find(|(key, _)| key == "p") {
            if BARE_HEX.is_match(&peeked) {
                return Ok(Self::from_hex(&peeked));
            }
        }

        let last_segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or("");

        if DASHED.is_match(last_segment) {
            return Ok(NotionId(last_segment.to_ascii_lowercase()));
        }

        TRAILING_HEX
            .captures(last_segment)
            .and_then(|captures| captures.get(1))
            .map(|hex| Self::from_hex(hex.as_str()))
            .ok_or_else(|| {
                ValidationError::InvalidId(format!("No valid ID found in URL: {}", link))
            })
    }
}

/// Anything with a scheme or a path separator is treated as a link.
fn looks_like_link(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://") || input.contains('/')
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NotionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NotionId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_all_shapes_normalize_identically() {
        let inputs = [
            "https://www.notion.so/acme/Test-Page-550e8400e29b41d4a716446655440000",
            "550e8400e29b41d4a716446655440000",
            "550e8400-e29b-41d4-a716-446655440000",
        ];
        for input in inputs {
            assert_eq!(NotionId::parse(input).unwrap().as_str(), CANONICAL, "{}", input);
        }
    }

    #[test]
    fn test_links_with_query_and_fragment() {
        let id = NotionId::parse(
            "https://www.notion.so/Test-Page-550e8400e29b41d4a716446655440000?pvs=4#abc",
        )
        .unwrap();
        assert_eq!(id.as_str(), CANONICAL);

        let id = NotionId::parse("notion.so/550e8400e29b41d4a716446655440000/").unwrap();
        assert_eq!(id.as_str(), CANONICAL);
    }

    #[test]
    fn test_peek_link_prefers_peeked_page() {
        let id = NotionId::parse(
            "https://www.notion.so/acme/11111111111111111111111111111111?p=550e8400e29b41d4a716446655440000&pm=s",
        )
        .unwrap();
        assert_eq!(id.as_str(), CANONICAL);
    }

    #[test]
    fn test_upper_case_hex_normalizes_to_lower() {
        let id = NotionId::parse("550E8400E29B41D4A716446655440000").unwrap();
        assert_eq!(id.as_str(), CANONICAL);
        let id = NotionId::parse("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(id.as_str(), CANONICAL);
    }

    #[test]
    fn test_invalid_ids() {
        assert!(NotionId::parse("too-short").is_err());
        assert!(NotionId::parse("").is_err());
        assert!(NotionId::parse("550e8400e29b41d4a71644665544000g").is_err());
        assert!(NotionId::parse("550e8400e29b41d4a7164466554400001").is_err());
        assert!(NotionId::parse("https://www.notion.so/Just-A-Title").is_err());
        // 33 hex digits at the end of a link is not a 32-digit run.
        assert!(NotionId::parse("https://www.notion.so/a550e8400e29b41d4a716446655440000").is_err());
    }
}
