//! Error types for Veneer core systems.

use std::fmt;

/// The error type a listener returns to abort event delivery.
///
/// Any error type that is `Send + Sync` can be boxed into this.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the callback registry.
#[derive(Debug)]
pub enum CallbackError {
    /// The event name was never enabled on this registry.
    UnknownEvent(String),
    /// A listener failed while the event was being fired.
    ///
    /// Listeners registered after the failing one were not invoked.
    Listener {
        /// The event being fired.
        event: String,
        /// The error returned by the listener.
        source: ListenerError,
    },
}

impl CallbackError {
    /// The event name this error refers to.
    pub fn event(&self) -> &str {
        match self {
            Self::UnknownEvent(name) => name,
            Self::Listener { event, .. } => event,
        }
    }

    /// Returns `true` if this is an unknown-event error.
    pub fn is_unknown_event(&self) -> bool {
        matches!(self, Self::UnknownEvent(_))
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEvent(name) => write!(f, "Unknown event '{name}'"),
            Self::Listener { event, source } => {
                write!(f, "Listener for event '{event}' failed: {source}")
            }
        }
    }
}

impl std::error::Error for CallbackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Listener { source, .. } => Some(source.as_ref()),
            Self::UnknownEvent(_) => None,
        }
    }
}

/// Timer-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid, has already fired, or was cancelled.
    InvalidTimerId,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimerId => write!(f, "Invalid or expired timer ID"),
        }
    }
}

impl std::error::Error for TimerError {}
