//! Process-wide registry backing the crate-level free functions.
//!
//! The registry and its default stream are created on first use and live
//! until process exit. Code that wants isolation (tests, embedded
//! subsystems) should own a [`StreamRegistry`] instead.

use super::StreamRegistry;
use crate::filter::Filter;
use crate::stream::{Publication, Stream};
use crate::subscription::{HandlerResult, SubscriptionHandle};
use crate::{Event, Result};
use serde_json::Value;
use std::sync::LazyLock;

static GLOBAL: LazyLock<StreamRegistry> = LazyLock::new(StreamRegistry::new);

/// The process-wide registry
pub fn global() -> &'static StreamRegistry {
    &GLOBAL
}

/// The process-wide default stream
pub fn default_stream() -> &'static Stream {
    GLOBAL.default_stream()
}

/// Publish on the process-wide default stream
pub fn publish(item: impl Into<Publication>, attributes: Value) -> Result<Event> {
    GLOBAL.publish(item, attributes)
}

/// Publish without attributes on the process-wide default stream
pub fn emit(item: impl Into<Publication>) -> Result<Event> {
    GLOBAL.emit(item)
}

/// Subscribe on the process-wide default stream
pub fn subscribe<F>(filter: impl Into<Filter>, handler: F) -> SubscriptionHandle
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    GLOBAL.subscribe(filter, handler)
}

/// Subscribe a fallible handler on the process-wide default stream
pub fn try_subscribe<F>(filter: impl Into<Filter>, handler: F) -> SubscriptionHandle
where
    F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
{
    GLOBAL.try_subscribe(filter, handler)
}

/// Unsubscribe from the process-wide default stream
pub fn unsubscribe(handle: &SubscriptionHandle) -> bool {
    GLOBAL.unsubscribe(handle)
}

/// Bind a name in the process-wide registry
pub fn register_stream(name: impl Into<String>, stream: Stream) -> Result<Option<Stream>> {
    GLOBAL.register_stream(name, stream)
}

/// Find a stream in the process-wide registry
pub fn lookup(name: &str) -> Result<Stream> {
    GLOBAL.lookup(name)
}
