//! Configuration for event streams.

/// Configuration for a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Name used in log output
    pub name: Option<String>,

    /// Emit `trace`-level records for every publish and handler invocation
    pub enable_tracing: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            name: None,
            enable_tracing: true,
        }
    }
}

impl StreamConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stream name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }
}

/// Preset configurations for common use cases
impl StreamConfig {
    /// Configuration for high-volume streams where per-event traces are noise
    pub fn quiet() -> Self {
        Self::default().enable_tracing(false)
    }
}
