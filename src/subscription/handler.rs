//! Event handler traits and implementations.

use crate::error::BoxError;
use crate::Event;
use std::fmt;

/// Result returned by a handler invocation
pub type HandlerResult = std::result::Result<(), BoxError>;

/// Trait for event handlers invoked synchronously at publish time.
///
/// Closures are wrapped automatically by `Stream::subscribe` and
/// `Stream::try_subscribe`; implement this trait directly for handlers that
/// carry their own state or want a stable name in diagnostics.
///
/// # Example
///
/// ```rust
/// use event_stream::{Event, EventHandler, HandlerResult, Stream};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl EventHandler for Counter {
///     fn handle(&self, _event: &Event) -> HandlerResult {
///         self.0.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "counter"
///     }
/// }
///
/// let stream = Stream::new();
/// stream.subscribe_handler("tick", Counter::default());
/// stream.emit("tick").unwrap();
/// ```
pub trait EventHandler: Send + Sync + 'static {
    /// Process an event
    fn handle(&self, event: &Event) -> HandlerResult;

    /// Get the handler name for debugging
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// A closure-based handler that cannot fail.
pub struct FunctionHandler<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    function: F,
}

impl<F> FunctionHandler<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    /// Create a new function handler
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F> EventHandler for FunctionHandler<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn handle(&self, event: &Event) -> HandlerResult {
        (self.function)(event);
        Ok(())
    }

    fn name(&self) -> &str {
        "FunctionHandler"
    }
}

impl<F> fmt::Debug for FunctionHandler<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionHandler")
    }
}

/// A closure-based handler whose failures are reported to the publisher.
pub struct FallibleHandler<F>
where
    F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
{
    function: F,
}

impl<F> FallibleHandler<F>
where
    F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
{
    /// Create a new fallible handler
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F> EventHandler for FallibleHandler<F>
where
    F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, event: &Event) -> HandlerResult {
        (self.function)(event)
    }

    fn name(&self) -> &str {
        "FallibleHandler"
    }
}

impl<F> fmt::Debug for FallibleHandler<F>
where
    F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FallibleHandler")
    }
}
