//! Subscriptions: the binding of a filter to a handler within a stream.

use crate::filter::Filter;
use crate::Event;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub mod handle;
pub mod handler;

pub use handle::SubscriptionHandle;
pub use handler::{EventHandler, FallibleHandler, FunctionHandler, HandlerResult};

/// A single subscription owned by a stream.
pub(crate) struct Subscription {
    pub(crate) handle: SubscriptionHandle,
    pub(crate) filter: Filter,
    pub(crate) handler: Arc<dyn EventHandler>,
}

impl Subscription {
    pub(crate) fn id(&self) -> Uuid {
        self.handle.id()
    }

    /// Whether the event passes this subscription's filter
    pub(crate) fn matches(&self, event: &Event) -> bool {
        self.filter.matches(event)
    }

    /// Run the handler; the filter is not consulted
    pub(crate) fn invoke(&self, event: &Event) -> HandlerResult {
        self.handler.handle(event)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.handle.id())
            .field("name", &self.handle.name())
            .field("filter", &self.filter)
            .field("handler", &self.handler.name())
            .finish()
    }
}

/// Statistics about a stream's subscriptions and dispatch activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionStats {
    /// Number of live subscriptions
    pub active_subscriptions: usize,

    /// Number of publish calls that reached dispatch
    pub events_published: u64,

    /// Number of handler invocations
    pub handler_invocations: u64,

    /// Number of handler invocations that returned an error
    pub handler_failures: u64,
}

impl fmt::Display for SubscriptionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} subscriptions, {} events published, {} handler invocations ({} failed)",
            self.active_subscriptions,
            self.events_published,
            self.handler_invocations,
            self.handler_failures
        )
    }
}
