//! Single-line text entry widgets.

use std::sync::Arc;

use veneer_core::EventArgs;

use crate::backend::{Backend, NativeKind, NativeSignal, Packing, PropValue, Property};
use crate::error::Result;
use crate::widget::{Font, Orientation, Widget, WidgetBase, events, impl_widget, redirect};

use super::button::Button;

/// A single-line text entry.
///
/// Fires `activated` (no payload) when the user presses Enter.
#[derive(Clone)]
pub struct TextEntry {
    base: Arc<WidgetBase>,
}

impl TextEntry {
    /// Create an entry holding `text`.
    pub fn new(backend: &Backend, text: &str) -> Self {
        let base = WidgetBase::new(backend, NativeKind::Entry, "TextEntry");
        base.init(Property::Text, PropValue::Text(text.to_string()));
        base.enable_events(&[events::ACTIVATED]);
        let result = base.connect(
            NativeSignal::Activate,
            redirect(&base, |base, _| base.fire(events::ACTIVATED, EventArgs::None)),
        );
        base.check_init(result);
        Self { base }
    }

    /// The current text.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Text)
    }

    /// Replace the text.
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.base.set(Property::Text, PropValue::Text(text.to_string()))
    }

    /// Set the font.
    pub fn set_font(&self, font: &Font) -> Result<()> {
        self.base.set(Property::Font, PropValue::Text(font.description()))
    }

    /// Set the visible width in characters. Does not limit the text length.
    pub fn set_length(&self, chars: u32) -> Result<()> {
        self.base.set(Property::WidthChars, PropValue::Int(i64::from(chars)))
    }

    /// Allow or forbid editing.
    pub fn set_editable(&self, editable: bool) -> Result<()> {
        self.base.set(Property::Editable, PropValue::Bool(editable))
    }
}

impl_widget!(TextEntry, base);

/// An entry with a "Set" button next to it.
///
/// Pressing Enter in the entry and clicking the button both fire
/// `activated` (no payload).
#[derive(Clone)]
pub struct TextEntrySet {
    base: Arc<WidgetBase>,
    entry: TextEntry,
    button: Button,
}

impl TextEntrySet {
    /// Create the pair, with `text` in the entry.
    pub fn new(backend: &Backend, text: &str) -> Self {
        let base = WidgetBase::new(
            backend,
            NativeKind::Box(Orientation::Horizontal),
            "TextEntrySet",
        );
        base.init(Property::Spacing, PropValue::Int(4));
        base.enable_events(&[events::ACTIVATED]);

        let entry = TextEntry::new(backend, text);
        let button = Button::new(backend, "Set");

        for (child, fill) in [(&entry as &dyn Widget, true), (&button as &dyn Widget, false)] {
            let packed = backend.pack(
                base.native_id(),
                child.native_id(),
                Packing::Linear { expand: fill, fill },
            );
            base.check_init(packed);
        }
        base.check_init(base.adopt(Arc::new(entry.clone())));
        base.check_init(base.adopt(Arc::new(button.clone())));

        for source in [entry.callbacks(), button.callbacks()] {
            let weak = Arc::downgrade(&base);
            let result = source.register_listener(events::ACTIVATED, move |_| match weak.upgrade() {
                Some(base) => base.fire(events::ACTIVATED, EventArgs::None),
                None => Ok(()),
            });
            base.check_init(result);
        }

        Self {
            base,
            entry,
            button,
        }
    }

    /// The current text.
    pub fn get_text(&self) -> Result<String> {
        self.entry.get_text()
    }

    /// Replace the text.
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.entry.set_text(text)
    }

    /// Set the entry font.
    pub fn set_font(&self, font: &Font) -> Result<()> {
        self.entry.set_font(font)
    }

    /// Set the visible entry width in characters.
    pub fn set_length(&self, chars: u32) -> Result<()> {
        self.entry.set_length(chars)
    }

    /// The embedded entry.
    pub fn entry(&self) -> &TextEntry {
        &self.entry
    }

    /// The embedded "Set" button.
    pub fn button(&self) -> &Button {
        &self.button
    }
}

impl_widget!(TextEntrySet, base);
