//! Stream registry: named streams plus one default stream.
//!
//! The registry maps names to [`Stream`]s in a thread-safe manner and routes
//! unqualified operations to its default stream. Once a caller holds a
//! `Stream`, dispatch on it no longer touches the registry.

use crate::filter::Filter;
use crate::stream::{Publication, Stream, StreamConfig};
use crate::subscription::{HandlerResult, SubscriptionHandle};
use crate::{Error, Event, Result};
use dashmap::DashMap;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

pub mod global;

/// Name under which the default stream is reachable
pub const DEFAULT_STREAM_NAME: &str = "default";

/// A table of named streams plus a default stream.
///
/// Registering a name that is already bound replaces the binding. The
/// replaced stream is returned and keeps its subscribers; it simply stops
/// being reachable through the registry.
///
/// # Example
///
/// ```rust
/// use event_stream::{Stream, StreamRegistry};
///
/// let registry = StreamRegistry::new();
/// let audit = Stream::new();
/// registry.register_stream("audit", audit.clone()).unwrap();
///
/// assert_eq!(registry.lookup("audit").unwrap(), audit);
/// assert!(registry.lookup("missing").is_err());
/// ```
pub struct StreamRegistry {
    default: Stream,
    streams: DashMap<String, Stream>,
}

impl StreamRegistry {
    /// Create a registry with a fresh default stream
    pub fn new() -> Self {
        Self::with_default(Stream::with_config(
            StreamConfig::new().name(DEFAULT_STREAM_NAME),
        ))
    }

    /// Create a registry around an existing default stream
    pub fn with_default(default: Stream) -> Self {
        Self {
            default,
            streams: DashMap::new(),
        }
    }

    /// The default stream used by unqualified operations
    pub fn default_stream(&self) -> &Stream {
        &self.default
    }

    /// Bind `name` to `stream`, returning the stream previously bound to it
    pub fn register_stream(
        &self,
        name: impl Into<String>,
        stream: Stream,
    ) -> Result<Option<Stream>> {
        let name = name.into();
        if name == DEFAULT_STREAM_NAME {
            return Err(Error::ReservedStreamName { name });
        }

        debug!(stream = %name, "Registering stream");
        let previous = self.streams.insert(name.clone(), stream);
        if previous.is_some() {
            warn!(stream = %name, "Replaced existing stream binding");
        }
        Ok(previous)
    }

    /// Find a stream by name; the reserved default name yields the default stream
    pub fn lookup(&self, name: &str) -> Result<Stream> {
        self.get(name).ok_or_else(|| Error::UnknownStream {
            name: name.to_string(),
        })
    }

    /// Find a stream by name, if bound
    pub fn get(&self, name: &str) -> Option<Stream> {
        if name == DEFAULT_STREAM_NAME {
            return Some(self.default.clone());
        }
        self.streams.get(name).map(|entry| entry.value().clone())
    }

    /// Check whether a name is bound
    pub fn contains(&self, name: &str) -> bool {
        name == DEFAULT_STREAM_NAME || self.streams.contains_key(name)
    }

    /// Unbind a name. The stream itself keeps running for existing holders.
    pub fn remove_stream(&self, name: &str) -> Option<Stream> {
        let removed = self.streams.remove(name).map(|(_, stream)| stream);
        if removed.is_some() {
            debug!(stream = %name, "Removed stream");
        }
        removed
    }

    /// Registered names in sorted order, excluding the default stream
    pub fn stream_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.streams.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered named streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Check whether no named stream is registered
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Publish on the default stream
    pub fn publish(&self, item: impl Into<Publication>, attributes: Value) -> Result<Event> {
        self.default.publish(item, attributes)
    }

    /// Publish without attributes on the default stream
    pub fn emit(&self, item: impl Into<Publication>) -> Result<Event> {
        self.default.emit(item)
    }

    /// Subscribe on the default stream
    pub fn subscribe<F>(&self, filter: impl Into<Filter>, handler: F) -> SubscriptionHandle
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.default.subscribe(filter, handler)
    }

    /// Subscribe a fallible handler on the default stream
    pub fn try_subscribe<F>(&self, filter: impl Into<Filter>, handler: F) -> SubscriptionHandle
    where
        F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
    {
        self.default.try_subscribe(filter, handler)
    }

    /// Unsubscribe from the default stream
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) -> bool {
        self.default.unsubscribe(handle)
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StreamRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamRegistry")
            .field("default", &self.default)
            .field("streams", &self.stream_names())
            .finish()
    }
}
