//! Logging and debugging facilities for Veneer.
//!
//! Veneer uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! The [`targets`] constants can be used in `EnvFilter` directives, e.g.
//! `RUST_LOG=veneer::container=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "veneer_core";
    /// Callback registry target.
    pub const CALLBACKS: &str = "veneer_core::callbacks";
    /// Timer queue target.
    pub const TIMER: &str = "veneer_core::timer";
    /// Native backend target.
    pub const BACKEND: &str = "veneer::backend";
    /// Widget lifecycle target.
    pub const WIDGET: &str = "veneer::widget";
    /// Container mutation target.
    pub const CONTAINER: &str = "veneer::container";
    /// Tree view target.
    pub const TREE_VIEW: &str = "veneer::tree_view";
    /// Window registry target.
    pub const APPLICATION: &str = "veneer::application";
    /// Dialog target.
    pub const DIALOG: &str = "veneer::dialog";
    /// Configuration loading target.
    pub const CONFIG: &str = "veneer::config";
}

/// Style options for widget tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

impl TreeStyle {
    /// Branch prefix for a child, depending on whether it is the last sibling.
    pub fn branch(&self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (Self::Ascii, false) => "|-- ",
            (Self::Ascii, true) => "`-- ",
            (Self::Unicode, false) => "├── ",
            (Self::Unicode, true) => "└── ",
            (Self::Compact, _) => "",
        }
    }

    /// Continuation prefix drawn below a child.
    pub fn continuation(&self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (Self::Ascii, false) => "|   ",
            (Self::Unicode, false) => "│   ",
            (Self::Ascii | Self::Unicode, true) => "    ",
            (Self::Compact, _) => "",
        }
    }
}

/// Configuration for widget tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show native handle IDs.
    pub show_ids: bool,
    /// Whether to show visibility/enabled/disposed flags.
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_state: false,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_state: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_state: false,
            ..Default::default()
        }
    }
}
