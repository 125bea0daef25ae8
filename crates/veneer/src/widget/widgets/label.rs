//! Text labels that can be clicked and carry a context menu.

use std::sync::Arc;

use veneer_core::EventArgs;

use crate::backend::{Backend, NativeEvent, NativeId, NativeKind, NativeSignal, Packing, PropValue, Property};
use crate::error::{Result, VeneerError};
use crate::widget::{Font, Justify, WidgetBase, events, impl_widget, redirect};

use super::menu::{ContextMenu, Menu};

/// Visual style of a [`Label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// Plain text.
    #[default]
    Normal,
    /// Text inside a raised frame, looking like a button.
    Clickable,
}

impl std::str::FromStr for LabelStyle {
    type Err = VeneerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "clickable" => Ok(Self::Clickable),
            other => Err(VeneerError::invalid_argument(
                other,
                "expected 'normal' or 'clickable'",
            )),
        }
    }
}

/// A text label.
///
/// The label sits in an event box so it can receive pointer presses. A
/// primary-button press fires `activated` (no payload). A secondary-button
/// press pops up the attached context menu, if any, and fires nothing.
#[derive(Clone)]
pub struct Label {
    base: Arc<WidgetBase>,
    text: NativeId,
    menu: Arc<ContextMenu>,
}

impl Label {
    /// Create a left-justified plain label.
    pub fn new(backend: &Backend, text: &str) -> Self {
        Self::with_style(backend, text, Justify::Left, LabelStyle::Normal)
    }

    /// Create a label with explicit justification and style.
    pub fn with_style(backend: &Backend, text: &str, justify: Justify, style: LabelStyle) -> Self {
        let base = WidgetBase::new(backend, NativeKind::EventBox, "Label");
        let label = backend.create(NativeKind::Label);
        base.init_on(label, Property::Label, PropValue::Text(text.to_string()));
        base.init_on(label, Property::Justify, PropValue::Text(justify.as_str().to_string()));

        let packed = match style {
            LabelStyle::Normal => backend.pack(base.native_id(), label, Packing::Single),
            LabelStyle::Clickable => {
                let frame = backend.create(NativeKind::Frame);
                base.init_on(frame, Property::Shadow, PropValue::Text("out".to_string()));
                backend
                    .pack(frame, label, Packing::Single)
                    .and_then(|()| backend.pack(base.native_id(), frame, Packing::Single))
            }
        };
        base.check_init(packed);

        base.enable_events(&[events::ACTIVATED]);
        let menu = Arc::new(ContextMenu::default());
        let weak = Arc::downgrade(&base);
        let result = base.connect(
            NativeSignal::ButtonPress,
            redirect(&menu, move |menu, event| {
                let (Some(base), NativeEvent::Button { button, x, y }) = (weak.upgrade(), event) else {
                    return Ok(());
                };
                match button {
                    1 => base.fire(events::ACTIVATED, EventArgs::None),
                    3 => {
                        menu.popup(*x, *y)?;
                        Ok(())
                    }
                    _ => Ok(()),
                }
            }),
        );
        base.check_init(result);

        Self {
            base,
            text: label,
            menu,
        }
    }

    /// The label text.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.text, Property::Label)
    }

    /// Replace the label text.
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.base.set_on(self.text, Property::Label, PropValue::Text(text.to_string()))
    }

    /// Set the horizontal justification.
    pub fn set_justify(&self, justify: Justify) -> Result<()> {
        self.base
            .set_on(self.text, Property::Justify, PropValue::Text(justify.as_str().to_string()))
    }

    /// Position the text inside its allocation; `0.0` is left/top, `1.0`
    /// right/bottom.
    pub fn set_alignment(&self, x: f32, y: f32) -> Result<()> {
        self.base.set_on(self.text, Property::Alignment, PropValue::Pair(x, y))
    }

    /// Set the font.
    pub fn set_font(&self, font: &Font) -> Result<()> {
        self.base.set_on(self.text, Property::Font, PropValue::Text(font.description()))
    }

    /// Set the text and background colors, as color names or `#rrggbb`.
    pub fn set_color(&self, foreground: &str, background: &str) -> Result<()> {
        self.base
            .set_on(self.text, Property::Foreground, PropValue::Text(foreground.to_string()))?;
        self.base
            .set(Property::Background, PropValue::Text(background.to_string()))
    }

    /// Attach (or with `None`, detach) a context menu.
    pub fn set_menu(&self, menu: Option<&Menu>) -> Result<()> {
        self.base.ensure_alive()?;
        self.menu.attach(menu.cloned());
        Ok(())
    }

    /// Returns `true` if a context menu is attached.
    pub fn has_menu(&self) -> bool {
        self.menu.is_attached()
    }
}

impl_widget!(Label, base);
