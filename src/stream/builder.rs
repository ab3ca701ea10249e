//! Builder pattern for constructing Stream instances.

use crate::stream::config::StreamConfig;
use crate::Stream;

/// Builder for creating Stream instances
#[derive(Debug, Default)]
pub struct StreamBuilder {
    config: StreamConfig,
}

impl StreamBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom configuration
    pub fn config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure the stream
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(StreamConfig) -> StreamConfig,
    {
        self.config = f(self.config);
        self
    }

    /// Name the stream for log output
    pub fn name(self, name: impl Into<String>) -> Self {
        self.configure(|c| c.name(name))
    }

    /// Build with the quiet configuration
    pub fn quiet(self) -> Self {
        self.configure(|c| c.enable_tracing(false))
    }

    /// Build the Stream
    pub fn build(self) -> Stream {
        Stream::with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let stream = StreamBuilder::new().build();
        assert!(stream.name().is_none());
        assert!(stream.is_empty());
    }

    #[test]
    fn test_builder_configurations() {
        let stream = StreamBuilder::new().name("audit").quiet().build();
        assert_eq!(stream.name(), Some("audit"));
        assert!(!stream.config().enable_tracing);

        let stream = StreamBuilder::new()
            .config(StreamConfig::quiet())
            .configure(|c| c.name("metrics"))
            .build();
        assert_eq!(stream.name(), Some("metrics"));
        assert!(!stream.config().enable_tracing);
    }
}
