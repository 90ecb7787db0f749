//! Path segments and RFC 6901 escaping

use std::fmt;

use crate::errors::{PointerError, Result};

/// One literal step of a path: a field name, possibly usable as an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    key: String,
    index: Option<usize>,
}

impl Segment {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let index = parse_index(&key);
        Self { key, index }
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            key: index.to_string(),
            index: Some(index),
        }
    }

    /// The unescaped field name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The array index this segment names, if it looks like one
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_index(&self) -> bool {
        self.index.is_some()
    }

    /// Decode one raw segment of `path`
    pub(crate) fn unescape(raw: &str, path: &str) -> Result<Self> {
        let mut key = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '~' {
                key.push(c);
                continue;
            }
            match chars.next() {
                Some('0') => key.push('~'),
                Some('1') => key.push('/'),
                Some(other) => {
                    return Err(PointerError::malformed(
                        path,
                        format!("invalid escape sequence '~{}'", other),
                    ))
                }
                None => return Err(PointerError::malformed(path, "dangling '~' escape")),
            }
        }
        Ok(Self::new(key))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.key.chars() {
            match c {
                '~' => f.write_str("~0")?,
                '/' => f.write_str("~1")?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::new(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::from_index(index)
    }
}

/// `0` or a digit string without a leading zero
fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse().ok()
}

/// Join segments into an escaped path string
pub(crate) fn render(segments: &[Segment]) -> String {
    segments.iter().map(|s| format!("/{}", s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_detection() {
        assert_eq!(Segment::new("0").index(), Some(0));
        assert_eq!(Segment::new("12").index(), Some(12));
        assert_eq!(Segment::new("012").index(), None);
        assert_eq!(Segment::new("-1").index(), None);
        assert_eq!(Segment::new("name").index(), None);
        assert_eq!(Segment::new("").index(), None);
    }

    #[test]
    fn test_unescape_and_display() {
        let seg = Segment::unescape("a~1b~0c", "/a~1b~0c").unwrap();
        assert_eq!(seg.key(), "a/b~c");
        assert_eq!(seg.to_string(), "a~1b~0c");
    }

    #[test]
    fn test_bad_escape_is_malformed() {
        let err = Segment::unescape("a~2", "/a~2").unwrap_err();
        assert!(matches!(err, PointerError::MalformedPath { .. }));
        assert!(Segment::unescape("a~", "/a~").is_err());
    }

    #[test]
    fn test_render() {
        let segments = vec![Segment::new("person"), Segment::from_index(3)];
        assert_eq!(render(&segments), "/person/3");
        assert_eq!(render(&[]), "");
    }
}
