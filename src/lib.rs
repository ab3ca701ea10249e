//! # event-stream
//!
//! Synchronous in-process event streams. Producers publish tagged,
//! attribute-bearing events; consumers subscribe with a filter and are called
//! back, in subscription order, before `publish` returns.
//!
//! ## Features
//!
//! - **Filters** on a tag, any of several tags, a regex over tags, attribute
//!   values, or an arbitrary predicate
//! - **Named streams** in a registry, plus a default stream for unqualified calls
//! - **Fail loud**: a handler error stops dispatch and is returned to the publisher
//! - **Thread-safe**: streams and registries are `Send + Sync`
//!
//! ## Quick Example
//!
//! ```rust
//! use event_stream::{Filter, Stream};
//! use serde_json::json;
//! use std::sync::{Arc, Mutex};
//!
//! let stream = Stream::new();
//! let totals = Arc::new(Mutex::new(0));
//!
//! let sink = totals.clone();
//! stream.subscribe(Filter::pattern("^order").unwrap(), move |event| {
//!     if let Some(amount) = event.attribute("amount").and_then(|v| v.as_i64()) {
//!         *sink.lock().unwrap() += amount;
//!     }
//! });
//!
//! stream.publish("order_paid", json!({ "amount": 40 })).unwrap();
//! stream.publish(["order_paid", "priority"], json!({ "amount": 2 })).unwrap();
//! stream.emit("user_registered").unwrap();
//!
//! assert_eq!(*totals.lock().unwrap(), 42);
//! ```
//!
//! The crate-level [`publish`], [`subscribe`] and friends operate on a
//! process-wide registry; own a [`StreamRegistry`] for isolated setups.

#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    unreachable_pub
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Error types and result aliases
pub mod error;

/// Events, tags and event construction
pub mod event;

/// Subscription filters and matching
pub mod filter;

/// Subscriptions, handlers and handles
pub mod subscription;

/// Streams: publish and subscribe
pub mod stream;

/// Named stream registry and the process-wide default
pub mod registry;

pub use error::{Error, Result};
pub use event::{Attributes, Event, EventBuilder, EventMetadata, IntoTags, Tag};
pub use filter::Filter;
pub use registry::global::{
    default_stream, emit, global, lookup, publish, register_stream, subscribe, try_subscribe,
    unsubscribe,
};
pub use registry::{StreamRegistry, DEFAULT_STREAM_NAME};
pub use stream::{Publication, Stream, StreamBuilder, StreamConfig};
pub use subscription::{EventHandler, HandlerResult, SubscriptionHandle, SubscriptionStats};

/// Prelude module for convenient imports
///
/// # Example
/// ```rust
/// use event_stream::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::event::{Event, Tag};
    pub use crate::filter::Filter;
    pub use crate::registry::StreamRegistry;
    pub use crate::stream::Stream;
    pub use crate::subscription::{EventHandler, SubscriptionHandle};
}
