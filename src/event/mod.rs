//! Events and tags.
//!
//! An [`Event`] is an immutable value carrying an ordered set of [`Tag`]s and a
//! mapping of named attributes. Events are cheap to clone: every clone shares
//! the same underlying value, so the event a publisher gets back from
//! `publish` is the very event each subscriber observed.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub mod builder;
pub mod metadata;

pub use builder::EventBuilder;
pub use metadata::EventMetadata;

/// Attribute mapping carried by an event.
pub type Attributes = Map<String, Value>;

/// A symbolic identifier classifying an event.
///
/// Tags are non-empty and contain no whitespace or control characters.
///
/// # Example
///
/// ```rust
/// use event_stream::Tag;
///
/// let tag = Tag::new("user_registered").unwrap();
/// assert_eq!(tag.as_str(), "user_registered");
/// assert!(Tag::new("two words").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Create a tag, validating that it is symbolic
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::invalid_tag(tag, "tag is empty"));
        }
        if tag.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::invalid_tag(
                tag,
                "tag contains whitespace or control characters",
            ));
        }
        Ok(Self(tag))
    }

    /// Get the string form of this tag
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Tag::new(value)
    }
}

impl TryFrom<&str> for Tag {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Tag::new(value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Conversion into the raw tag list of a new event.
///
/// Implemented for a single tag (`&str`, `String`, [`Tag`]) and for lists of
/// them, so `publish("saved", ..)` and `publish(["a", "b"], ..)` both work.
/// Validation happens when the event is built.
pub trait IntoTags {
    /// Convert into raw tag strings
    fn into_tags(self) -> Vec<String>;
}

impl IntoTags for &str {
    fn into_tags(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoTags for String {
    fn into_tags(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoTags for &String {
    fn into_tags(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoTags for Tag {
    fn into_tags(self) -> Vec<String> {
        vec![self.0]
    }
}

impl<S: Into<String>> IntoTags for Vec<S> {
    fn into_tags(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoTags for [S; N] {
    fn into_tags(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: AsRef<str>> IntoTags for &[S] {
    fn into_tags(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

#[derive(Debug, Serialize)]
struct EventInner {
    tags: Vec<Tag>,
    attributes: Attributes,
    metadata: EventMetadata,
}

/// An immutable, tagged, attribute-bearing event.
///
/// # Example
///
/// ```rust
/// use event_stream::Event;
/// use serde_json::json;
///
/// let event = Event::new(["order", "paid"], json!({ "amount": 42 })).unwrap();
/// assert!(event.has_tag("paid"));
/// assert_eq!(event.attribute("amount"), Some(&json!(42)));
/// ```
#[derive(Clone)]
pub struct Event {
    inner: Arc<EventInner>,
}

impl Event {
    /// Construct an event from one or more tags and an attribute object.
    ///
    /// `attributes` must be a JSON object or `null`. Duplicate tags are
    /// collapsed, keeping the first occurrence.
    pub fn new(tags: impl IntoTags, attributes: Value) -> Result<Self> {
        let attributes = match attributes {
            Value::Object(map) => map,
            Value::Null => Attributes::new(),
            other => return Err(Error::InvalidAttributes(value_kind(&other).to_string())),
        };
        Self::with_attributes(tags, attributes)
    }

    /// Construct an event from tags and an already-built attribute map
    pub fn with_attributes(tags: impl IntoTags, attributes: Attributes) -> Result<Self> {
        Self::from_parts(tags.into_tags(), attributes, EventMetadata::new())
    }

    /// Start building an event with its first tag
    pub fn builder(tag: impl Into<String>) -> EventBuilder {
        EventBuilder::new(tag)
    }

    pub(crate) fn from_parts(
        raw_tags: Vec<String>,
        attributes: Attributes,
        metadata: EventMetadata,
    ) -> Result<Self> {
        let mut tags: Vec<Tag> = Vec::with_capacity(raw_tags.len());
        for raw in raw_tags {
            let tag = Tag::new(raw)?;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.is_empty() {
            return Err(Error::invalid_tag("", "event must carry at least one tag"));
        }

        Ok(Self {
            inner: Arc::new(EventInner {
                tags,
                attributes,
                metadata,
            }),
        })
    }

    /// Tags in construction order
    pub fn tags(&self) -> &[Tag] {
        &self.inner.tags
    }

    /// Check whether the event carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.inner.tags.iter().any(|t| t == tag)
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.inner.attributes.get(name)
    }

    /// Look up an attribute, failing with [`Error::AttributeNotFound`] when absent
    pub fn require_attribute(&self, name: &str) -> Result<&Value> {
        self.attribute(name).ok_or_else(|| Error::AttributeNotFound {
            name: name.to_string(),
        })
    }

    /// All attributes
    pub fn attributes(&self) -> &Attributes {
        &self.inner.attributes
    }

    /// Event metadata
    pub fn metadata(&self) -> &EventMetadata {
        &self.inner.metadata
    }

    /// Unique id of this event
    pub fn id(&self) -> Uuid {
        self.inner.metadata.event_id
    }

    /// When the event was constructed
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.inner.metadata.timestamp
    }

    /// Check whether two handles refer to the very same event value
    pub fn ptr_eq(&self, other: &Event) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Serialize this event to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize an event from JSON, validating its tags
    pub fn from_json(json: &str) -> Result<Self> {
        let repr: EventRepr = serde_json::from_str(json)?;
        repr.into_event()
    }
}

/// Tags compare as sets, attributes as mappings; metadata is ignored.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.inner.tags.len() == other.inner.tags.len()
            && self.inner.tags.iter().all(|t| other.inner.tags.contains(t))
            && attributes_eq(&self.inner.attributes, &other.inner.attributes)
    }
}

impl Eq for Event {}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("tags", &self.inner.tags)
            .field("attributes", &self.inner.attributes)
            .field("event_id", &self.inner.metadata.event_id)
            .finish()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.inner.tags.iter().map(Tag::as_str).collect();
        write!(f, "[{}]", tags.join(", "))?;
        if !self.inner.attributes.is_empty() {
            write!(f, " {}", Value::Object(self.inner.attributes.clone()))?;
        }
        Ok(())
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        EventRepr::deserialize(deserializer)?
            .into_event()
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Deserialize)]
struct EventRepr {
    tags: Vec<String>,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    metadata: Option<EventMetadata>,
}

impl EventRepr {
    fn into_event(self) -> Result<Event> {
        let metadata = self.metadata.unwrap_or_default();
        Event::from_parts(self.tags, self.attributes, metadata)
    }
}

/// Compare attribute values numerically: `1` and `1.0` are equal.
///
/// Arrays and objects compare element-wise under the same rule.
pub(crate) fn attribute_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| attribute_eq(x, y))
        }
        (Value::Object(x), Value::Object(y)) => attributes_eq(x, y),
        _ => a == b,
    }
}

pub(crate) fn attributes_eq(a: &Attributes, b: &Attributes) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(name, value)| b.get(name).is_some_and(|other| attribute_eq(value, other)))
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
