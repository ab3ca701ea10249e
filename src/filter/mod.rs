//! Subscription filters and the filter matcher.
//!
//! A [`Filter`] decides which events a subscription receives. Matching is a
//! pure function of the filter and the event; the only code it runs besides
//! comparisons is a [`Filter::Predicate`] closure.

use crate::event::{attribute_eq, Attributes, Event, Tag};
use crate::Result;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

mod value;

/// Shared predicate closure used by [`Filter::Predicate`]
pub type Predicate = Arc<dyn Fn(&Event) -> bool + Send + Sync>;

/// Filter attached to a subscription.
///
/// Most filters are built through `From` conversions, so a subscription call
/// can take `"tag"`, `["a", "b"]`, a [`Regex`] or an attribute map directly.
///
/// # Example
///
/// ```rust
/// use event_stream::{Event, Filter};
/// use serde_json::json;
///
/// let event = Event::new(["a", "b", "c"], json!({ "x": 2 })).unwrap();
///
/// assert!(Filter::from("b").matches(&event));
/// assert!(Filter::from(["a", "z"]).matches(&event));
/// assert!(Filter::attributes([("x", 2)]).matches(&event));
/// assert!(!Filter::pattern("^d").unwrap().matches(&event));
/// ```
#[derive(Clone, Default)]
pub enum Filter {
    /// Matches every event
    #[default]
    Any,

    /// Matches events carrying this tag
    Tag(String),

    /// Matches events carrying at least one of these tags
    TagList(Vec<String>),

    /// Matches events with at least one tag matching the pattern
    Pattern(Regex),

    /// Matches events whose attributes contain every entry of the map
    Attributes(Attributes),

    /// Matches events for which the predicate returns true
    Predicate(Predicate),
}

impl Filter {
    /// Filter matching every event
    pub fn any() -> Self {
        Filter::Any
    }

    /// Filter on a single tag.
    ///
    /// The name is not validated. A name that is not a valid [`Tag`] can never
    /// be carried by an event, so such a filter matches nothing; use
    /// [`Filter::try_tag`] to reject it up front.
    pub fn tag(tag: impl Into<String>) -> Self {
        Filter::Tag(tag.into())
    }

    /// Filter on a single tag, failing with `InvalidTag` if it is not symbolic
    pub fn try_tag(tag: impl Into<String>) -> Result<Self> {
        Ok(Filter::Tag(Tag::new(tag)?.into()))
    }

    /// Filter on any of several tags.
    ///
    /// Like [`Filter::tag`], the names are not validated and invalid ones never
    /// match.
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::TagList(tags.into_iter().map(Into::into).collect())
    }

    /// Filter on any of several tags, failing on the first one that is not symbolic
    pub fn try_tags<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags
            .into_iter()
            .map(|tag| Tag::new(tag).map(String::from))
            .collect::<Result<Vec<_>>>()?;
        Ok(Filter::TagList(tags))
    }

    /// Filter on a regular expression tested against every tag
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Filter::Pattern(Regex::new(pattern)?))
    }

    /// Filter on an already compiled regular expression
    pub fn regex(regex: Regex) -> Self {
        Filter::Pattern(regex)
    }

    /// Filter on attribute values; every pair must be present and equal.
    ///
    /// Numbers compare by value, so `1` matches an attribute holding `1.0`.
    pub fn attributes<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Filter::Attributes(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Filter on an arbitrary predicate
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Arc::new(predicate))
    }

    /// Resolve a filter declared as data.
    ///
    /// Shapes are checked in a fixed order: `null` matches everything, a
    /// string written as `/regex/` is a pattern, an object is an attribute
    /// map, an array is a tag list, and any other string is a single tag.
    pub fn from_value(value: &Value) -> Result<Self> {
        value::resolve(value)
    }

    /// Short name of the filter shape, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::Any => "any",
            Filter::Tag(_) => "tag",
            Filter::TagList(_) => "tag_list",
            Filter::Pattern(_) => "pattern",
            Filter::Attributes(_) => "attributes",
            Filter::Predicate(_) => "predicate",
        }
    }

    /// Check whether an event satisfies this filter.
    ///
    /// A panic raised by a predicate propagates to the caller.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Filter::Any => true,
            Filter::Tag(tag) => event.has_tag(tag),
            Filter::TagList(tags) => tags.iter().any(|tag| event.has_tag(tag)),
            Filter::Pattern(regex) => event.tags().iter().any(|tag| regex.is_match(tag.as_str())),
            Filter::Attributes(expected) => expected
                .iter()
                .all(|(name, value)| {
                    event
                        .attribute(name)
                        .is_some_and(|actual| attribute_eq(actual, value))
                }),
            Filter::Predicate(predicate) => predicate(event),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Any => f.write_str("Any"),
            Filter::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Filter::TagList(tags) => f.debug_tuple("TagList").field(tags).finish(),
            Filter::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Filter::Attributes(map) => f.debug_tuple("Attributes").field(map).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Unvalidated, as [`Filter::tag`].
impl From<&str> for Filter {
    fn from(tag: &str) -> Self {
        Filter::Tag(tag.to_string())
    }
}

impl From<String> for Filter {
    fn from(tag: String) -> Self {
        Filter::Tag(tag)
    }
}

impl From<Tag> for Filter {
    fn from(tag: Tag) -> Self {
        Filter::Tag(tag.into())
    }
}

impl<S: Into<String>> From<Vec<S>> for Filter {
    fn from(tags: Vec<S>) -> Self {
        Filter::tags(tags)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Filter {
    fn from(tags: [S; N]) -> Self {
        Filter::tags(tags)
    }
}

impl From<Regex> for Filter {
    fn from(regex: Regex) -> Self {
        Filter::Pattern(regex)
    }
}

impl From<Attributes> for Filter {
    fn from(map: Attributes) -> Self {
        Filter::Attributes(map)
    }
}

impl From<Option<Filter>> for Filter {
    fn from(filter: Option<Filter>) -> Self {
        filter.unwrap_or_default()
    }
}
