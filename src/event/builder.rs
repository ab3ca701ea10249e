//! Builder for constructing events step by step.

use crate::event::{Attributes, Event, EventMetadata};
use crate::Result;
use serde_json::Value;

/// Builder for creating events with several tags, attributes and a source
///
/// # Example
///
/// ```rust
/// use event_stream::Event;
///
/// let event = Event::builder("order")
///     .tag("paid")
///     .attribute("amount", 42)
///     .source("checkout")
///     .build()
///     .unwrap();
///
/// assert!(event.has_tag("order"));
/// assert!(event.has_tag("paid"));
/// ```
#[derive(Debug, Clone)]
pub struct EventBuilder {
    tags: Vec<String>,
    attributes: Attributes,
    metadata: EventMetadata,
}

impl EventBuilder {
    /// Create a new event builder with its first tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tags: vec![tag.into()],
            attributes: Attributes::new(),
            metadata: EventMetadata::new(),
        }
    }

    /// Add a tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set an attribute, replacing any previous value under the same name
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the event source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.metadata = self.metadata.set_source(source);
        self
    }

    /// Build the event, validating its tags
    pub fn build(self) -> Result<Event> {
        Event::from_parts(self.tags, self.attributes, self.metadata)
    }
}
