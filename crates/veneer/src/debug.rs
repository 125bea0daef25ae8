//! Textual dumps of the wrapper ownership tree.
//!
//! ```
//! use std::sync::Arc;
//! use veneer::backend::{Backend, HeadlessBackend};
//! use veneer::debug::WidgetTreeDebug;
//! use veneer::logging::{TreeFormatOptions, TreeStyle};
//! use veneer::{Button, Container, VBox};
//!
//! let backend: Backend = Arc::new(HeadlessBackend::new());
//! let vbox = VBox::new(&backend);
//! vbox.add_widget(&Button::new(&backend, "ok")).unwrap();
//!
//! let debug = WidgetTreeDebug::with_options(TreeFormatOptions {
//!     style: TreeStyle::Compact,
//!     ..TreeFormatOptions::minimal()
//! });
//! assert_eq!(debug.format(&vbox), "VBox(Button)");
//! ```

use std::sync::Arc;

use veneer_core::logging::{TreeFormatOptions, TreeStyle, targets};

use crate::widget::Widget;

/// Formats a widget and everything it owns.
#[derive(Debug, Clone, Default)]
pub struct WidgetTreeDebug {
    options: TreeFormatOptions,
}

impl WidgetTreeDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Render `root` and its descendants.
    pub fn format(&self, root: &dyn Widget) -> String {
        let mut output = String::new();
        match self.options.style {
            TreeStyle::Compact => self.format_compact(root, 0, &mut output),
            TreeStyle::Ascii | TreeStyle::Unicode => self.format_lines(root, 0, "", &mut output),
        }
        output
    }

    /// Emit the rendered tree at debug level.
    pub fn log(&self, root: &dyn Widget) {
        tracing::debug!(target: targets::WIDGET, "widget tree:\n{}", self.format(root));
    }

    fn children_of(&self, widget: &dyn Widget, depth: usize) -> Vec<Arc<dyn Widget>> {
        match self.options.max_depth {
            Some(max) if depth >= max => Vec::new(),
            _ => widget.widget_base().children(),
        }
    }

    fn describe(&self, widget: &dyn Widget) -> String {
        let mut line = widget.type_name().to_string();
        if self.options.show_ids {
            line.push_str(&format!(" [{:?}]", widget.native_id()));
        }
        if self.options.show_state {
            if widget.is_disposed() {
                line.push_str(" (disposed)");
            } else {
                let visible = widget.is_visible().unwrap_or(false);
                let enabled = widget.is_enabled().unwrap_or(false);
                line.push_str(&format!(
                    " ({}, {})",
                    if visible { "visible" } else { "hidden" },
                    if enabled { "enabled" } else { "disabled" }
                ));
            }
        }
        line
    }

    fn format_lines(&self, widget: &dyn Widget, depth: usize, indent: &str, output: &mut String) {
        output.push_str(&self.describe(widget));
        output.push('\n');

        let children = self.children_of(widget, depth);
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let is_last = i + 1 == count;
            output.push_str(indent);
            output.push_str(self.options.style.branch(is_last));
            let nested = format!("{indent}{}", self.options.style.continuation(is_last));
            self.format_lines(child.as_ref(), depth + 1, &nested, output);
        }
    }

    fn format_compact(&self, widget: &dyn Widget, depth: usize, output: &mut String) {
        output.push_str(&self.describe(widget));
        let children = self.children_of(widget, depth);
        if children.is_empty() {
            return;
        }
        output.push('(');
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            self.format_compact(child.as_ref(), depth + 1, output);
        }
        output.push(')');
    }
}
