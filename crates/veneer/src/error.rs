//! Error types for the widget wrapper layer.

use std::path::PathBuf;

use veneer_core::CallbackError;

use crate::backend::BackendError;

/// Result type alias for wrapper operations.
pub type Result<T> = std::result::Result<T, VeneerError>;

/// Errors that can occur while operating on wrapped widgets.
#[derive(Debug, thiserror::Error)]
pub enum VeneerError {
    /// An event name was used that the widget never enabled, or a listener
    /// failed during delivery.
    #[error(transparent)]
    Callback(#[from] CallbackError),

    /// A widget was removed from a container that does not own it.
    #[error("Widget is not a child of this container")]
    NotAChild,

    /// The widget was already destroyed.
    #[error("Widget has been destroyed")]
    Disposed,

    /// A child was added while it still belongs to another container.
    #[error("Widget already belongs to a container; remove it first")]
    AlreadyParented,

    /// Unsupported enum-like argument, such as an unknown widget tag.
    #[error("Invalid argument '{value}': {message}")]
    InvalidArgument { value: String, message: String },

    /// A numeric value outside the control's configured bounds.
    #[error("Value {value} is outside the range [{min}, {max}]")]
    Range { value: f64, min: f64, max: f64 },

    /// A registry lookup failed.
    #[error("No window registered under '{0}'")]
    NotFound(String),

    /// A window id is already taken.
    #[error("A window is already registered under '{0}'")]
    DuplicateWindow(String),

    /// An index outside a container or model.
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A native toolkit call failed.
    #[error("Native backend error: {0}")]
    Backend(BackendError),

    /// Configuration could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Tree data could not be decoded.
    #[error("Invalid tree data: {0}")]
    TreeData(String),
}

impl VeneerError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a range error.
    pub fn range(value: f64, min: f64, max: f64) -> Self {
        Self::Range { value, min, max }
    }

    /// Create a tree-data error.
    pub fn tree_data(message: impl Into<String>) -> Self {
        Self::TreeData(message.into())
    }

    /// Returns `true` for [`CallbackError::UnknownEvent`] failures.
    pub fn is_unknown_event(&self) -> bool {
        matches!(self, Self::Callback(e) if e.is_unknown_event())
    }
}

impl From<BackendError> for VeneerError {
    fn from(err: BackendError) -> Self {
        match err {
            // A listener behind a native signal failed; surface the original
            // error instead of the transport wrapper.
            BackendError::Handler(source) => match source.downcast::<VeneerError>() {
                Ok(inner) => *inner,
                Err(source) => match source.downcast::<CallbackError>() {
                    Ok(inner) => Self::Callback(*inner),
                    Err(source) => Self::Backend(BackendError::Handler(source)),
                },
            },
            other => Self::Backend(other),
        }
    }
}
