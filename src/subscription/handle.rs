//! Subscription handle for managing subscription lifecycle.

use crate::error::SubscriptionRef;
use crate::stream::StreamShared;
use std::fmt;
use std::sync::Weak;
use uuid::Uuid;

/// A handle to a subscription on a stream.
///
/// Dropping the handle does not unsubscribe; call [`SubscriptionHandle::unsubscribe`]
/// or `Stream::unsubscribe`. The handle only holds a weak reference to its
/// stream, so it never keeps a stream alive.
#[derive(Clone)]
pub struct SubscriptionHandle {
    /// Unique ID for this subscription
    id: Uuid,

    /// Optional name for debugging
    name: Option<String>,

    /// Stream that owns the subscription
    stream: Weak<StreamShared>,
}

impl SubscriptionHandle {
    pub(crate) fn new(id: Uuid, name: Option<String>, stream: Weak<StreamShared>) -> Self {
        Self { id, name, stream }
    }

    /// Get the subscription ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the subscription name if set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Remove this subscription from its stream.
    ///
    /// Returns `false` if it was already removed or the stream is gone.
    pub fn unsubscribe(&self) -> bool {
        self.stream
            .upgrade()
            .is_some_and(|stream| stream.remove(self.id))
    }

    /// Check if this subscription is still registered on a live stream
    pub fn is_active(&self) -> bool {
        self.stream
            .upgrade()
            .is_some_and(|stream| stream.contains(self.id))
    }

    pub(crate) fn reference(&self) -> SubscriptionRef {
        SubscriptionRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl PartialEq for SubscriptionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SubscriptionHandle {}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reference(), f)
    }
}
