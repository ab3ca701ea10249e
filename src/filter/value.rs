//! Resolution of filters declared as JSON data.

use super::Filter;
use crate::event::{value_kind, Tag};
use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;

/// Resolve a JSON value into a filter.
///
/// Order: null, pattern, mapping, list, scalar. Predicates cannot be
/// expressed as data, so they never come out of this path.
pub(super) fn resolve(value: &Value) -> Result<Filter> {
    if value.is_null() {
        return Ok(Filter::Any);
    }
    if let Some(pattern) = value.as_str().and_then(pattern_body) {
        return Ok(Filter::Pattern(Regex::new(pattern)?));
    }
    if let Some(map) = value.as_object() {
        return Ok(Filter::Attributes(map.clone()));
    }
    if let Some(items) = value.as_array() {
        let tags = items
            .iter()
            .map(|item| match item {
                Value::String(tag) => Tag::new(tag.as_str()).map(String::from),
                other => Err(Error::InvalidFilter(format!(
                    "tag list entries must be strings, got {}",
                    value_kind(other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(Filter::TagList(tags));
    }
    if let Some(tag) = value.as_str() {
        return Filter::try_tag(tag);
    }

    Err(Error::InvalidFilter(format!(
        "unsupported filter value: {}",
        value_kind(value)
    )))
}

/// Body of a `/regex/` literal, if the string is written as one
fn pattern_body(s: &str) -> Option<&str> {
    s.strip_prefix('/')?.strip_suffix('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use serde_json::json;

    #[test]
    fn test_null_resolves_to_any() {
        assert!(matches!(resolve(&Value::Null).unwrap(), Filter::Any));
    }

    #[test]
    fn test_slashed_string_is_a_pattern_not_a_tag() {
        let filter = resolve(&json!("/test/")).unwrap();
        assert_eq!(filter.kind(), "pattern");

        let event = Event::new("test_event", Value::Null).unwrap();
        assert!(filter.matches(&event));
        assert!(!resolve(&json!("/no_match/")).unwrap().matches(&event));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let filter = resolve(&json!("//")).unwrap();
        assert_eq!(filter.kind(), "pattern");
        assert!(filter.matches(&Event::new("anything", Value::Null).unwrap()));
    }

    #[test]
    fn test_single_slash_is_a_tag() {
        let filter = resolve(&json!("/")).unwrap();
        assert_eq!(filter.kind(), "tag");
    }

    #[test]
    fn test_object_resolves_to_attributes() {
        let filter = resolve(&json!({ "y": "attr" })).unwrap();
        assert_eq!(filter.kind(), "attributes");
        assert!(filter.matches(&Event::new("test", json!({ "x": 1, "y": "attr" })).unwrap()));
    }

    #[test]
    fn test_array_resolves_to_tag_list() {
        let filter = resolve(&json!(["a", "b"])).unwrap();
        assert_eq!(filter.kind(), "tag_list");
        assert!(filter.matches(&Event::new(["a", "b", "c"], Value::Null).unwrap()));
        assert!(!resolve(&json!(["d", "e"]))
            .unwrap()
            .matches(&Event::new(["a", "b", "c"], Value::Null).unwrap()));
    }

    #[test]
    fn test_array_with_slashed_entry_stays_a_tag_list() {
        let filter = resolve(&json!(["/a/"])).unwrap();
        assert_eq!(filter.kind(), "tag_list");
    }

    #[test]
    fn test_plain_string_resolves_to_tag() {
        let filter = resolve(&json!("test")).unwrap();
        assert_eq!(filter.kind(), "tag");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(resolve(&json!(42)), Err(Error::InvalidFilter(_))));
        assert!(matches!(resolve(&json!(true)), Err(Error::InvalidFilter(_))));
        assert!(matches!(resolve(&json!([1])), Err(Error::InvalidFilter(_))));
        assert!(matches!(resolve(&json!("a b")), Err(Error::InvalidTag { .. })));
        assert!(matches!(resolve(&json!("/(/")), Err(Error::InvalidPattern(_))));
    }
}
