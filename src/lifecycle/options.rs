//! Construction options for the lifecycle components

use std::fmt;
use std::sync::Arc;

/// Sink receiving one human-readable line per lifecycle transition
pub type TransitionLog = Arc<dyn Fn(&str) + Send + Sync>;

/// Options recognised when building an [`IndiceManager`](crate::IndiceManager)
#[derive(Clone)]
pub struct ManagerOptions {
    pub(crate) log: Option<TransitionLog>,
    pub(crate) serialize_per_indice: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            log: None,
            serialize_per_indice: true,
        }
    }
}

impl fmt::Debug for ManagerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerOptions")
            .field("log", &self.log.is_some())
            .field("serialize_per_indice", &self.serialize_per_indice)
            .finish()
    }
}

impl ManagerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report transitions through `log`
    pub fn with_log<F>(mut self, log: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log = Some(Arc::new(log));
        self
    }

    /// Report transitions as `tracing` info events
    pub fn with_tracing_log(self) -> Self {
        self.with_log(|message| tracing::info!(target: "indice_manager::transitions", "{}", message))
    }

    /// Serialize create/reindex/swap/clear calls per logical indice
    pub fn serialize_per_indice(mut self, enabled: bool) -> Self {
        self.serialize_per_indice = enabled;
        self
    }
}

/// Shared handle used by components to report transitions
#[derive(Clone, Default)]
pub(crate) struct TransitionLogger {
    sink: Option<TransitionLog>,
}

impl TransitionLogger {
    pub(crate) fn new(sink: Option<TransitionLog>) -> Self {
        Self { sink }
    }

    pub(crate) fn emit(&self, message: impl AsRef<str>) {
        if let Some(sink) = &self.sink {
            sink(message.as_ref());
        }
    }
}
