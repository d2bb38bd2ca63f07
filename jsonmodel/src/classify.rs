//! Path classification.
//!
//! A field's candidate key is one of:
//!
//! | Class | Example | Decoded by |
//! |-------|---------|------------|
//! | `Simple` | `"name"` | keyed lookup |
//! | `Nested` | `"geo/lat"` | keyed lookup through sub-objects |
//! | `Complex` | `"tags/*"`, `"items/-1"`, `"rows[0]"` | full-tree path query |

use crate::path::{self, WILDCARD};

/// Shape of a candidate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathClassification {
    /// A single plain key.
    Simple(String),
    /// Plain key segments: containers to walk, then the leaf key.
    Nested { parents: Vec<String>, leaf: String },
    /// Contains a wildcard, a bracket, or an array index segment.
    Complex(String),
}

impl PathClassification {
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// Container segments walked before the leaf (empty unless nested).
    pub fn parents(&self) -> &[String] {
        match self {
            Self::Nested { parents, .. } => parents,
            _ => &[],
        }
    }
}

/// Classify a candidate key.
///
/// Any index segment (`0`, `-1`, ...) makes a path complex: keyed lookup
/// only walks objects, so array positions need the full-tree query.
pub fn classify(key: &str) -> PathClassification {
    if key.contains(WILDCARD) || key.contains('[') || key.contains(']') {
        return PathClassification::Complex(key.to_string());
    }

    let segments = path::segments(key);
    if segments.iter().any(|segment| path::parse_index(segment).is_some()) {
        return PathClassification::Complex(key.to_string());
    }

    match segments.split_last() {
        Some((leaf, parents)) if !parents.is_empty() => PathClassification::Nested {
            parents: parents.iter().map(|s| s.to_string()).collect(),
            leaf: leaf.to_string(),
        },
        Some((leaf, _)) => PathClassification::Simple(leaf.to_string()),
        None => PathClassification::Simple(key.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple() {
        assert_eq!(classify("name"), PathClassification::Simple("name".into()));
        assert_eq!(classify("/name/"), PathClassification::Simple("name".into()));
        assert!(classify("user_name").parents().is_empty());
    }

    #[test]
    fn test_nested() {
        assert_eq!(
            classify("geo/lat"),
            PathClassification::Nested {
                parents: vec!["geo".into()],
                leaf: "lat".into()
            }
        );
        assert_eq!(classify("a/b/c").parents(), ["a", "b"]);
    }

    #[test]
    fn test_complex() {
        assert!(classify("tags/*").is_complex());
        assert!(classify("*").is_complex());
        assert!(classify("items/-1/name").is_complex());
        assert!(classify("items/0").is_complex());
        assert!(classify("rows[0]").is_complex());
    }

    #[test]
    fn test_dash_inside_key_is_plain() {
        assert!(!classify("x-request-id").is_complex());
        assert!(!classify("meta/-a").is_complex());
        assert!(!classify("v2").is_complex());
    }
}
