//! Multi-line text area with bounded scroll-back.
//!
//! A [`TextArea`] can keep at most `limit` lines: after every append the
//! oldest lines are dropped until the buffer is back within the limit. A
//! limit of zero keeps everything.
//!
//! Lines are counted the way a text buffer counts them: the number of
//! newline characters plus one, so a trailing newline opens a new, empty
//! last line.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{Backend, NativeKind, PropValue, Property};
use crate::error::Result;
use crate::widget::{Font, WidgetBase, impl_widget};

/// Number of lines in `text`, counted like a text buffer does.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Drop leading lines of `text` until at most `limit` remain.
fn trim_to_limit(text: &str, limit: usize) -> &str {
    if limit == 0 {
        return text;
    }
    let excess = line_count(text).saturating_sub(limit);
    if excess == 0 {
        return text;
    }
    // Byte offset just past the `excess`-th newline.
    let cut = text
        .match_indices('\n')
        .nth(excess - 1)
        .map_or(0, |(idx, _)| idx + 1);
    &text[cut..]
}

/// A multi-line text view.
#[derive(Clone)]
pub struct TextArea {
    base: Arc<WidgetBase>,
    limit: Arc<Mutex<usize>>,
}

impl TextArea {
    /// Create an empty text area.
    pub fn new(backend: &Backend, wrap: bool, editable: bool) -> Self {
        let base = WidgetBase::new(backend, NativeKind::TextView, "TextArea");
        base.init(Property::Wrap, PropValue::Bool(wrap));
        base.init(Property::Editable, PropValue::Bool(editable));
        Self {
            base,
            limit: Arc::new(Mutex::new(0)),
        }
    }

    /// Builder form of [`set_limit`](Self::set_limit).
    pub fn with_limit(self, lines: usize) -> Self {
        *self.limit.lock() = lines;
        self
    }

    /// Append `text` at the end, trim to the line limit, and optionally
    /// scroll the view to the end.
    pub fn append_text(&self, text: &str, autoscroll: bool) -> Result<()> {
        let mut buffer = self.get_text()?;
        buffer.push_str(text);
        self.store(&buffer)?;
        if autoscroll {
            self.base.set(Property::VScroll, PropValue::Float(1.0))?;
        }
        Ok(())
    }

    /// The whole buffer.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Text)
    }

    /// Empty the buffer.
    pub fn clear(&self) -> Result<()> {
        self.base.set(Property::Text, PropValue::Text(String::new()))
    }

    /// Replace the buffer and scroll to the end.
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.clear()?;
        self.append_text(text, true)
    }

    /// Set the line limit (0 for unbounded) and trim immediately.
    pub fn set_limit(&self, lines: usize) -> Result<()> {
        *self.limit.lock() = lines;
        let buffer = self.get_text()?;
        self.store(&buffer)
    }

    /// The current line limit.
    pub fn limit(&self) -> usize {
        *self.limit.lock()
    }

    /// Number of lines currently in the buffer.
    pub fn num_lines(&self) -> Result<usize> {
        Ok(line_count(&self.get_text()?))
    }

    /// Toggle word wrapping.
    pub fn set_wrap(&self, wrap: bool) -> Result<()> {
        self.base.set(Property::Wrap, PropValue::Bool(wrap))
    }

    /// Allow or forbid editing.
    pub fn set_editable(&self, editable: bool) -> Result<()> {
        self.base.set(Property::Editable, PropValue::Bool(editable))
    }

    /// Set the font.
    pub fn set_font(&self, font: &Font) -> Result<()> {
        self.base.set(Property::Font, PropValue::Text(font.description()))
    }

    fn store(&self, buffer: &str) -> Result<()> {
        let limit = self.limit();
        let trimmed = trim_to_limit(buffer, limit);
        if trimmed.len() != buffer.len() {
            tracing::trace!(
                target: veneer_core::logging::targets::WIDGET,
                limit,
                dropped_bytes = buffer.len() - trimmed.len(),
                "trimmed text area history"
            );
        }
        self.base.set(Property::Text, PropValue::Text(trimmed.to_string()))
    }
}

impl_widget!(TextArea, base);
