//! Scrollable viewport.

use std::sync::Arc;

use veneer_core::EventArgs;

use crate::backend::{Backend, NativeEvent, NativeKind, NativeSignal, Packing, PropValue, Property};
use crate::error::{Result, VeneerError};
use crate::widget::{Container, Widget, WidgetBase, events, impl_widget, redirect};

/// A viewport scrolling one child.
///
/// Fires `configure` with the new viewport size as [`EventArgs::Size`]
/// whenever the toolkit allocates it.
#[derive(Clone)]
pub struct ScrollArea {
    base: Arc<WidgetBase>,
}

impl ScrollArea {
    /// Create an empty viewport.
    pub fn new(backend: &Backend) -> Self {
        let base = WidgetBase::new(backend, NativeKind::ScrolledWindow, "ScrollArea");
        base.enable_events(&[events::CONFIGURE]);
        let result = base.connect(
            NativeSignal::SizeAllocate,
            redirect(&base, |base, event| match event {
                NativeEvent::Allocation { width, height } => base.fire(
                    events::CONFIGURE,
                    EventArgs::Size {
                        width: *width,
                        height: *height,
                    },
                ),
                _ => Ok(()),
            }),
        );
        base.check_init(result);
        Self { base }
    }

    /// Replace the child.
    pub fn set_widget<W: Widget + Clone>(&self, child: &W) -> Result<()> {
        self.add_widget(child)
    }

    /// Scroll vertically to `fraction` of the content (0 is the top).
    pub fn scroll_to(&self, fraction: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(VeneerError::range(fraction, 0.0, 1.0));
        }
        self.base.set(Property::VScroll, PropValue::Float(fraction))
    }

    /// Scroll to the bottom of the content.
    pub fn scroll_to_end(&self) -> Result<()> {
        self.scroll_to(1.0)
    }
}

impl_widget!(ScrollArea, base);

impl Container for ScrollArea {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        self.base
            .backend()
            .pack(self.base.native_id(), child.native_id(), Packing::Single)?;
        Ok(())
    }

    fn replaces_child(&self) -> bool {
        true
    }
}
