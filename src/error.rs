//! Error types for the event-stream library.

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by fallible handlers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for event-stream
#[derive(Error, Debug)]
pub enum Error {
    /// A tag is not a symbolic identifier, or an event was given no tags
    #[error("Invalid tag {tag:?}: {reason}")]
    InvalidTag {
        /// The rejected tag; empty when the tag list itself was empty
        tag: String,
        /// Why the tag was rejected
        reason: &'static str,
    },

    /// Event attributes were not a mapping
    #[error("Invalid attributes: expected an object, got {0}")]
    InvalidAttributes(String),

    /// Attribute lookup on an event failed
    #[error("Attribute not found: {name}")]
    AttributeNotFound {
        /// Requested attribute name
        name: String,
    },

    /// A pattern filter could not be compiled
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A filter declared as data has an unsupported shape
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Registry lookup on a name that was never registered
    #[error("Unknown stream: {name}")]
    UnknownStream {
        /// Requested stream name
        name: String,
    },

    /// Attempt to bind the name reserved for the default stream
    #[error("Stream name is reserved: {name}")]
    ReservedStreamName {
        /// The reserved name
        name: String,
    },

    /// A subscriber's handler failed during publish
    #[error("Handler error in {subscription}: {source}")]
    Handler {
        /// Subscription whose handler failed
        subscription: SubscriptionRef,
        /// Error returned by the handler
        #[source]
        source: BoxError,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid tag error
    pub fn invalid_tag(tag: impl Into<String>, reason: &'static str) -> Self {
        Error::InvalidTag {
            tag: tag.into(),
            reason,
        }
    }

    /// Create a new handler error for the given subscription
    pub fn handler(subscription: SubscriptionRef, source: impl Into<BoxError>) -> Self {
        Error::Handler {
            subscription,
            source: source.into(),
        }
    }

    /// Check if this error was raised by a subscriber's handler
    pub fn is_handler_error(&self) -> bool {
        matches!(self, Error::Handler { .. })
    }

    /// Check if this error comes from building an event or a filter
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidTag { .. }
                | Error::InvalidAttributes(_)
                | Error::InvalidPattern(_)
                | Error::InvalidFilter(_)
        )
    }
}

/// Identifies the subscription a handler error came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRef {
    /// Subscription ID
    pub id: Uuid,
    /// Subscription name, if one was given
    pub name: Option<String>,
}

impl fmt::Display for SubscriptionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "subscription '{}' ({})", name, self.id),
            None => write!(f, "subscription {}", self.id),
        }
    }
}
