use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// Startup configuration.
pub mod config;
/// Error taxonomy shared by transport and commands.
pub mod error;
/// Parsed command messages.
pub mod invocation;
/// Handler-facing platform operations.
pub mod transport;
/// `Transport` backed by twilight.
pub mod twilight;

pub use config::Config;
pub use error::{CommandError, CommandResult, TransportError, TransportErrorKind, TransportResult};
pub use invocation::Invocation;
pub use transport::{Reply, Transport};

/// Shared application context passed into command handlers.
///
/// Immutable after startup and cheap to clone.
#[derive(Clone)]
pub struct Context {
    pub transport: Arc<dyn Transport>,
    started_at: Instant,
}

impl Context {
    /// Create a context whose uptime starts now.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_start(transport, Instant::now())
    }

    pub fn with_start(transport: Arc<dyn Transport>, started_at: Instant) -> Self {
        Self {
            transport,
            started_at,
        }
    }

    /// Time since the process started, from a monotonic clock.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
