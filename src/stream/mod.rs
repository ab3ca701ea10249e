//! Event streams.
//!
//! A [`Stream`] is an independent pub/sub channel. It owns an ordered list of
//! subscriptions; publishing an event runs every matching handler
//! synchronously, in subscription order, before `publish` returns.

use crate::event::{Event, IntoTags, Tag};
use crate::filter::Filter;
use crate::subscription::{
    EventHandler, FallibleHandler, FunctionHandler, HandlerResult, Subscription,
    SubscriptionHandle, SubscriptionStats,
};
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace, warn};
use uuid::Uuid;

pub mod builder;
pub mod config;

pub use builder::StreamBuilder;
pub use config::StreamConfig;

/// What a publish call sends: a ready-made event or the tags of a new one.
#[derive(Debug, Clone)]
pub enum Publication {
    /// Publish this event as is
    Event(Event),

    /// Build a new event from these raw tags
    Tags(Vec<String>),
}

impl From<Event> for Publication {
    fn from(event: Event) -> Self {
        Publication::Event(event)
    }
}

impl From<&Event> for Publication {
    fn from(event: &Event) -> Self {
        Publication::Event(event.clone())
    }
}

impl From<&str> for Publication {
    fn from(tag: &str) -> Self {
        Publication::Tags(tag.into_tags())
    }
}

impl From<String> for Publication {
    fn from(tag: String) -> Self {
        Publication::Tags(tag.into_tags())
    }
}

impl From<Tag> for Publication {
    fn from(tag: Tag) -> Self {
        Publication::Tags(tag.into_tags())
    }
}

impl<S: Into<String>> From<Vec<S>> for Publication {
    fn from(tags: Vec<S>) -> Self {
        Publication::Tags(tags.into_tags())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Publication {
    fn from(tags: [S; N]) -> Self {
        Publication::Tags(tags.into_tags())
    }
}

impl<S: AsRef<str>> From<&[S]> for Publication {
    fn from(tags: &[S]) -> Self {
        Publication::Tags(tags.into_tags())
    }
}

/// State shared between a stream and the handles pointing at it
pub(crate) struct StreamShared {
    config: StreamConfig,
    subscriptions: RwLock<Vec<Arc<Subscription>>>,
    events_published: AtomicU64,
    handler_invocations: AtomicU64,
    handler_failures: AtomicU64,
}

impl StreamShared {
    // Handlers never run under the lock, so a poisoned lock still guards a
    // consistent list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Subscription>>> {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Subscription>>> {
        self.subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn remove(&self, id: Uuid) -> bool {
        let mut subscriptions = self.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id() != id);
        let removed = subscriptions.len() != before;
        drop(subscriptions);

        if removed {
            debug!(stream = %self.label(), subscription_id = %id, "Subscription removed");
        }
        removed
    }

    pub(crate) fn contains(&self, id: Uuid) -> bool {
        self.read().iter().any(|s| s.id() == id)
    }

    fn label(&self) -> &str {
        self.config.name.as_deref().unwrap_or("anonymous")
    }
}

/// An independent publish/subscribe channel.
///
/// `Stream` is a cheap handle: clones address the same subscriber list, and
/// two handles compare equal only if they point at the same stream.
///
/// # Example
///
/// ```rust
/// use event_stream::{Filter, Stream};
/// use serde_json::json;
/// use std::sync::{Arc, Mutex};
///
/// let stream = Stream::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = seen.clone();
/// stream.subscribe(Filter::attributes([("y", "attr")]), move |event| {
///     sink.lock().unwrap().push(event.clone());
/// });
///
/// stream.publish("test", json!({ "x": 1, "y": "attr" })).unwrap();
/// stream.publish("test", json!({ "x": 1, "y": "other" })).unwrap();
///
/// assert_eq!(seen.lock().unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct Stream {
    shared: Arc<StreamShared>,
}

impl Stream {
    /// Create a stream with the default configuration
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Create a stream with a custom configuration
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            shared: Arc::new(StreamShared {
                config,
                subscriptions: RwLock::new(Vec::new()),
                events_published: AtomicU64::new(0),
                handler_invocations: AtomicU64::new(0),
                handler_failures: AtomicU64::new(0),
            }),
        }
    }

    /// Create a new Stream builder
    pub fn builder() -> StreamBuilder {
        StreamBuilder::new()
    }

    /// Name given in the stream configuration
    pub fn name(&self) -> Option<&str> {
        self.shared.config.name.as_deref()
    }

    /// Stream configuration
    pub fn config(&self) -> &StreamConfig {
        &self.shared.config
    }

    /// Subscribe a closure to events matching `filter`
    pub fn subscribe<F>(&self, filter: impl Into<Filter>, handler: F) -> SubscriptionHandle
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.add(None, filter.into(), Arc::new(FunctionHandler::new(handler)))
    }

    /// Subscribe a named closure; the name shows up in logs and handler errors
    pub fn subscribe_named<F>(
        &self,
        name: impl Into<String>,
        filter: impl Into<Filter>,
        handler: F,
    ) -> SubscriptionHandle
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.add(
            Some(name.into()),
            filter.into(),
            Arc::new(FunctionHandler::new(handler)),
        )
    }

    /// Subscribe a closure whose errors abort the publish that triggered them
    pub fn try_subscribe<F>(&self, filter: impl Into<Filter>, handler: F) -> SubscriptionHandle
    where
        F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
    {
        self.add(None, filter.into(), Arc::new(FallibleHandler::new(handler)))
    }

    /// Subscribe a custom handler implementation
    pub fn subscribe_handler<H>(&self, filter: impl Into<Filter>, handler: H) -> SubscriptionHandle
    where
        H: EventHandler,
    {
        self.add(None, filter.into(), Arc::new(handler))
    }

    fn add(
        &self,
        name: Option<String>,
        filter: Filter,
        handler: Arc<dyn EventHandler>,
    ) -> SubscriptionHandle {
        let handle = SubscriptionHandle::new(Uuid::new_v4(), name, Arc::downgrade(&self.shared));

        debug!(
            stream = %self.shared.label(),
            subscription_id = %handle.id(),
            filter = filter.kind(),
            handler_name = handler.name(),
            "Subscribing handler"
        );

        self.shared.write().push(Arc::new(Subscription {
            handle: handle.clone(),
            filter,
            handler,
        }));

        handle
    }

    /// Remove a subscription.
    ///
    /// Returns `false` if it was not registered here, e.g. already removed.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) -> bool {
        self.shared.remove(handle.id())
    }

    /// Remove every subscription
    pub fn clear_subscribers(&self) {
        let removed = {
            let mut subscriptions = self.shared.write();
            let count = subscriptions.len();
            subscriptions.clear();
            count
        };
        debug!(stream = %self.shared.label(), removed, "Cleared subscribers");
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.shared.read().len()
    }

    /// Check if the stream has no subscriptions
    pub fn is_empty(&self) -> bool {
        self.shared.read().is_empty()
    }

    /// Publish an event, or build one from tags and `attributes` and publish it.
    ///
    /// When `item` is already an [`Event`], `attributes` is ignored. Returns the
    /// published event. Every matching handler runs before this returns; the
    /// first handler error stops dispatch and is returned after the handlers
    /// before it have completed.
    pub fn publish(&self, item: impl Into<Publication>, attributes: Value) -> Result<Event> {
        let event = match item.into() {
            Publication::Event(event) => event,
            Publication::Tags(tags) => Event::new(tags, attributes)?,
        };
        self.dispatch(&event)?;
        Ok(event)
    }

    /// Publish a pre-constructed event as is
    pub fn publish_event(&self, event: Event) -> Result<Event> {
        self.dispatch(&event)?;
        Ok(event)
    }

    /// Publish without attributes
    pub fn emit(&self, item: impl Into<Publication>) -> Result<Event> {
        self.publish(item, Value::Null)
    }

    fn dispatch(&self, event: &Event) -> Result<()> {
        let tracing = self.shared.config.enable_tracing;
        let snapshot: Vec<Arc<Subscription>> = self.shared.read().clone();

        self.shared.events_published.fetch_add(1, Ordering::Relaxed);
        if tracing {
            trace!(
                stream = %self.shared.label(),
                event_id = %event.id(),
                event = %event,
                subscriptions = snapshot.len(),
                "Publishing event"
            );
        }

        for subscription in snapshot {
            if !subscription.matches(event) {
                continue;
            }
            // Counted before the call so a panicking handler is still recorded
            self.shared.handler_invocations.fetch_add(1, Ordering::Relaxed);

            match subscription.invoke(event) {
                Ok(()) => {
                    if tracing {
                        trace!(
                            subscription_id = %subscription.id(),
                            event_id = %event.id(),
                            "Handler executed successfully"
                        );
                    }
                }
                Err(source) => {
                    self.shared.handler_failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        stream = %self.shared.label(),
                        subscription_id = %subscription.id(),
                        event_id = %event.id(),
                        error = %source,
                        "Handler execution failed"
                    );
                    return Err(Error::handler(subscription.handle.reference(), source));
                }
            }
        }

        Ok(())
    }

    /// Get statistics about this stream
    pub fn stats(&self) -> SubscriptionStats {
        SubscriptionStats {
            active_subscriptions: self.subscriber_count(),
            events_published: self.shared.events_published.load(Ordering::Relaxed),
            handler_invocations: self.shared.handler_invocations.load(Ordering::Relaxed),
            handler_failures: self.shared.handler_failures.load(Ordering::Relaxed),
        }
    }

    /// Check whether two handles address the same stream
    pub fn ptr_eq(&self, other: &Stream) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Stream {}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("name", &self.shared.config.name)
            .field("subscriptions", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::panic::AssertUnwindSafe;
    use std::sync::Mutex;

    /// Subscribe with `filter`, publish, and return the event the subscriber saw.
    fn pub_sub(
        item: impl Into<Publication>,
        attributes: Value,
        filter: impl Into<Filter>,
    ) -> Option<Event> {
        let stream = Stream::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        stream.subscribe(filter, move |e| {
            *sink.lock().unwrap() = Some(e.clone());
        });
        stream.publish(item, attributes).unwrap();
        let event = seen.lock().unwrap().take();
        event
    }

    fn recorder(
        stream: &Stream,
        filter: impl Into<Filter>,
        label: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> SubscriptionHandle {
        let log = log.clone();
        stream.subscribe(filter, move |_| log.lock().unwrap().push(label))
    }

    #[test]
    fn test_publish_and_consume() {
        let event = pub_sub("test", Value::Null, Filter::Any).unwrap();
        assert_eq!(event.tags(), &[Tag::new("test").unwrap()]);
    }

    #[test]
    fn test_publish_pre_constructed_event() {
        let event = Event::new("test", json!({ "a": 1 })).unwrap();
        let seen = pub_sub(event.clone(), Value::Null, Filter::Any).unwrap();
        assert_eq!(seen, event);
        assert!(seen.ptr_eq(&event));
    }

    #[test]
    fn test_pre_constructed_event_ignores_attributes() {
        let stream = Stream::new();
        let event = Event::new("test", json!({ "a": 1 })).unwrap();
        let returned = stream.publish(event.clone(), json!({ "b": 2 })).unwrap();
        assert!(returned.ptr_eq(&event));
        assert!(returned.attribute("b").is_none());
    }

    #[test]
    fn test_attributes_visible_to_subscriber() {
        let event = pub_sub("test", json!({ "x": 1 }), Filter::Any).unwrap();
        assert_eq!(event.attribute("x"), Some(&json!(1)));
    }

    #[test]
    fn test_filter_by_tag() {
        assert!(pub_sub("test", Value::Null, "test").is_some());
        assert!(pub_sub("test", Value::Null, "other_name").is_none());
    }

    #[test]
    fn test_filter_by_pattern() {
        assert!(pub_sub("test_event", Value::Null, Filter::pattern("test").unwrap()).is_some());
        assert!(pub_sub("test_event", Value::Null, Filter::pattern("no_match").unwrap()).is_none());
    }

    #[test]
    fn test_filter_by_attributes() {
        let filter = Filter::attributes([("y", "attr")]);
        assert!(pub_sub("test", json!({ "x": 1, "y": "attr" }), filter.clone()).is_some());
        assert!(pub_sub("test", json!({ "x": 1, "y": "other" }), filter).is_none());
    }

    #[test]
    fn test_filter_by_predicate() {
        let predicate = Filter::predicate(|e| {
            e.attribute("x")
                .and_then(Value::as_i64)
                .is_some_and(|x| x > 1)
        });
        assert!(pub_sub("test", json!({ "x": 2, "y": "attr" }), predicate.clone()).is_some());
        assert!(pub_sub("test", json!({ "x": 1, "y": "attr" }), predicate).is_none());
    }

    #[test]
    fn test_filter_by_tag_list() {
        assert!(pub_sub(["a", "b", "c"], Value::Null, ["a", "b"]).is_some());
        assert!(pub_sub(["a", "b", "c"], Value::Null, ["d", "e"]).is_none());
    }

    #[test]
    fn test_handler_invoked_once_per_publish() {
        let stream = Stream::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        stream.subscribe("test", move |e| {
            assert!(e.has_tag("test"));
            counter.fetch_add(1, Ordering::SeqCst);
        });

        stream.emit("test").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        stream.emit(["other", "test"]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        stream.emit("unrelated").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dispatch_in_subscription_order() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&stream, Filter::Any, "first", &log);
        recorder(&stream, "skip", "skipped", &log);
        recorder(&stream, "test", "second", &log);
        recorder(&stream, Filter::Any, "third", &log);

        stream.emit("test").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_last_write_wins_across_handlers() {
        let stream = Stream::new();
        let value = Arc::new(Mutex::new(""));
        for label in ["a", "b", "c"] {
            let value = value.clone();
            stream.subscribe(Filter::Any, move |_| *value.lock().unwrap() = label);
        }

        stream.emit("test").unwrap();
        assert_eq!(*value.lock().unwrap(), "c");
    }

    #[test]
    fn test_unsubscribe() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = recorder(&stream, Filter::Any, "first", &log);
        recorder(&stream, Filter::Any, "second", &log);

        assert!(stream.unsubscribe(&first));
        assert!(!stream.unsubscribe(&first));
        stream.emit("test").unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["second"]);
        assert_eq!(stream.subscriber_count(), 1);
    }

    #[test]
    fn test_unsubscribe_foreign_handle_is_noop() {
        let a = Stream::new();
        let b = Stream::new();
        let handle = a.subscribe(Filter::Any, |_| {});

        assert!(!b.unsubscribe(&handle));
        assert_eq!(a.subscriber_count(), 1);
    }

    #[test]
    fn test_clear_subscribers() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&stream, Filter::Any, "first", &log);
        recorder(&stream, "test", "second", &log);

        stream.clear_subscribers();
        assert!(stream.is_empty());
        stream.emit("test").unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_subscribe_during_publish_waits_for_next_publish() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_stream = stream.clone();
        let inner_log = log.clone();
        stream.subscribe(Filter::Any, move |_| {
            let log = inner_log.clone();
            inner_stream.subscribe(Filter::Any, move |_| log.lock().unwrap().push("late"));
        });

        stream.emit("test").unwrap();
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(stream.subscriber_count(), 2);

        stream.emit("test").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["late"]);
    }

    #[test]
    fn test_unsubscribe_during_publish_keeps_snapshot() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let victim: Arc<Mutex<Option<SubscriptionHandle>>> = Arc::new(Mutex::new(None));

        let remover = victim.clone();
        stream.subscribe(Filter::Any, move |_| {
            if let Some(handle) = remover.lock().unwrap().take() {
                handle.unsubscribe();
            }
        });
        let handle = recorder(&stream, Filter::Any, "victim", &log);
        *victim.lock().unwrap() = Some(handle);

        stream.emit("test").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["victim"]);

        stream.emit("test").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["victim"]);
        assert_eq!(stream.subscriber_count(), 1);
    }

    #[test]
    fn test_handler_may_publish_reentrantly() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&stream, "second", "second", &log);

        let inner = stream.clone();
        stream.subscribe("first", move |_| {
            inner.emit("second").unwrap();
        });

        stream.emit("first").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn test_handler_error_propagates_after_earlier_handlers() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&stream, Filter::Any, "before", &log);
        let failing = stream.try_subscribe(Filter::Any, |_| Err("boom".into()));
        recorder(&stream, Filter::Any, "after", &log);

        let err = stream.emit("test").unwrap_err();
        match err {
            Error::Handler { subscription, source } => {
                assert_eq!(subscription.id, failing.id());
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["before"]);

        let stats = stream.stats();
        assert_eq!(stats.handler_invocations, 2);
        assert_eq!(stats.handler_failures, 1);
    }

    #[test]
    #[should_panic(expected = "handler panicked")]
    fn test_handler_panic_propagates() {
        let stream = Stream::new();
        stream.subscribe(Filter::Any, |_| panic!("handler panicked"));
        let _ = stream.emit("test");
    }

    #[test]
    fn test_stream_usable_after_handler_panic() {
        let stream = Stream::new();
        stream.subscribe("boom", |_| panic!("handler panicked"));
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| stream.emit("boom")));
        assert!(result.is_err());

        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        stream.subscribe("ok", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        stream.emit("ok").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_handler_counts_as_invocation() {
        let stream = Stream::new();
        stream.subscribe("boom", |_| panic!("handler panicked"));
        stream.subscribe(Filter::predicate(|_| panic!("filter panicked")), |_| {});

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| stream.emit("boom")));
        assert!(result.is_err());

        let stats = stream.stats();
        assert_eq!(stats.events_published, 1);
        assert_eq!(stats.handler_invocations, 1);
        assert_eq!(stats.handler_failures, 0);

        stream.clear_subscribers();
        stream.subscribe("boom", |_| {});
        stream.subscribe(Filter::predicate(|_| panic!("filter panicked")), |_| {});
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| stream.emit("boom")));
        assert!(result.is_err());
        assert_eq!(stream.stats().handler_invocations, 2);
    }

    #[test]
    fn test_invalid_tags_fail_before_dispatch() {
        let stream = Stream::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&stream, Filter::Any, "any", &log);

        let empty: Vec<&str> = Vec::new();
        assert!(matches!(
            stream.emit(empty),
            Err(Error::InvalidTag { ref tag, .. }) if tag.is_empty()
        ));
        assert!(matches!(stream.emit("not a tag"), Err(Error::InvalidTag { .. })));
        assert!(matches!(
            stream.publish("test", json!("scalar")),
            Err(Error::InvalidAttributes(_))
        ));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(stream.stats().events_published, 0);
    }

    #[test]
    fn test_publish_returns_constructed_event() {
        let stream = Stream::new();
        let event = stream.publish(["a", "b"], json!({ "x": 1 })).unwrap();
        assert!(event.has_tag("a"));
        assert!(event.has_tag("b"));
        assert_eq!(event.attribute("x"), Some(&json!(1)));
    }

    #[test]
    fn test_publish_event() {
        let stream = Stream::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        stream.subscribe("test", move |e| *sink.lock().unwrap() = Some(e.id()));

        let event = Event::builder("test").attribute("x", 1).build().unwrap();
        let returned = stream.publish_event(event.clone()).unwrap();

        assert!(returned.ptr_eq(&event));
        assert_eq!(*seen.lock().unwrap(), Some(event.id()));
    }

    #[test]
    fn test_subscribe_handler() {
        struct Tally(AtomicU64);

        impl EventHandler for Tally {
            fn handle(&self, _event: &Event) -> HandlerResult {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }

            fn name(&self) -> &str {
                "tally"
            }
        }

        let stream = Stream::new();
        stream.subscribe_handler(["a", "b"], Tally(AtomicU64::new(0)));
        stream.emit("a").unwrap();
        stream.emit("c").unwrap();

        assert_eq!(stream.stats().handler_invocations, 1);
    }

    #[test]
    fn test_stats() {
        let stream = Stream::builder().name("stats").quiet().build();
        stream.subscribe("a", |_| {});
        stream.subscribe(Filter::Any, |_| {});

        stream.emit("a").unwrap();
        stream.emit("b").unwrap();

        assert_eq!(
            stream.stats(),
            SubscriptionStats {
                active_subscriptions: 2,
                events_published: 2,
                handler_invocations: 3,
                handler_failures: 0,
            }
        );
    }

    #[test]
    fn test_stream_identity() {
        let a = Stream::new();
        let b = Stream::new();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_concurrent_publish_and_subscribe() {
        let stream = Stream::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        stream.subscribe("tick", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        stream.emit("tick").unwrap();
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..50 {
                    let handle = stream.subscribe("other", |_| {});
                    stream.unsubscribe(&handle);
                }
            });
        });

        assert_eq!(count.load(Ordering::SeqCst), 400);
        assert_eq!(stream.subscriber_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_publish_from_tokio_tasks() {
        let stream = Stream::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        stream.subscribe(Filter::pattern("^job_").unwrap(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut tasks = Vec::new();
        for i in 0..8 {
            let stream = stream.clone();
            tasks.push(tokio::spawn(async move {
                stream.emit(format!("job_{i}")).unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(count.load(Ordering::SeqCst), 8);
    }
}
