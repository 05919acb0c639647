//! Tag key parsing and the structural tag filter.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that may never appear in a tag key.
static KEY_PROBLEM_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[=+/&<>;'"?%#$@,.\s\p{Cc}]"#).expect("key problem-character pattern is valid")
});

/// A tag key split on `:`, limited to one or two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagKey<'a> {
    prefix: Option<&'a str>,
    identifier: &'a str,
}

impl<'a> TagKey<'a> {
    /// Parse a key; returns `None` when it has more than two segments.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut segments = raw.split(':');
        let first = segments.next().unwrap_or_default();
        match (segments.next(), segments.next()) {
            (None, _) => Some(Self {
                prefix: None,
                identifier: first,
            }),
            (Some(second), None) => Some(Self {
                prefix: Some(first),
                identifier: second,
            }),
            (Some(_), Some(_)) => None,
        }
    }

    /// First segment of a two-segment key.
    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    /// Segment after the colon for two-segment keys, else the whole key.
    pub fn identifier(&self) -> &'a str {
        self.identifier
    }

    /// Two-segment key under `addr:` (or a bare `:`).
    pub fn is_address(&self) -> bool {
        matches!(self.prefix, Some("addr") | Some(""))
    }
}

/// True if the key contains a reserved character, whitespace or a control character.
pub fn has_problem_chars(key: &str) -> bool {
    KEY_PROBLEM_CHARS.is_match(key)
}

/// Outcome of screening a `tag` element's key and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagScreen<'a> {
    /// Trimmed key and value are usable.
    Accepted { key: &'a str, value: &'a str },
    /// The key contains reserved characters.
    ProblemChars,
    /// Key or value is empty after trimming.
    Empty,
}

/// Trim a tag's key and value and reject unusable pairs.
pub fn screen_tag<'a>(key: &'a str, value: &'a str) -> TagScreen<'a> {
    let key = key.trim();
    let value = value.trim();

    if has_problem_chars(key) {
        TagScreen::ProblemChars
    } else if key.is_empty() || value.is_empty() {
        TagScreen::Empty
    } else {
        TagScreen::Accepted { key, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let key = TagKey::parse("amenity").unwrap();
        assert_eq!(key.identifier(), "amenity");
        assert_eq!(key.prefix(), None);
        assert!(!key.is_address());
    }

    #[test]
    fn test_parse_two_segments() {
        let key = TagKey::parse("addr:street").unwrap();
        assert_eq!(key.identifier(), "street");
        assert_eq!(key.prefix(), Some("addr"));
        assert!(key.is_address());

        let bare = TagKey::parse(":postcode").unwrap();
        assert!(bare.is_address());
        assert_eq!(bare.identifier(), "postcode");

        let other = TagKey::parse("name:en").unwrap();
        assert!(!other.is_address());
    }

    #[test]
    fn test_parse_rejects_three_segments() {
        assert!(TagKey::parse("addr:street:name").is_none());
        assert!(TagKey::parse("a::b").is_none());
    }

    #[test]
    fn test_problem_chars() {
        assert!(has_problem_chars("street signs"));
        assert!(has_problem_chars("House No."));
        assert!(has_problem_chars("a=b"));
        assert!(has_problem_chars("tab\there"));
        assert!(!has_problem_chars("addr:street"));
        assert!(!has_problem_chars("Years_in_Business"));
    }

    #[test]
    fn test_screen_tag() {
        assert_eq!(
            screen_tag(" amenity ", " cafe\n"),
            TagScreen::Accepted {
                key: "amenity",
                value: "cafe"
            }
        );
        assert_eq!(screen_tag("amenity", "\n"), TagScreen::Empty);
        assert_eq!(screen_tag("", "x"), TagScreen::Empty);
        assert_eq!(screen_tag("MR.QUICKIE", "x"), TagScreen::ProblemChars);
    }
}
