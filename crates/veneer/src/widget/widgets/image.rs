//! Images that act as click regions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use veneer_core::EventArgs;

use crate::backend::{Backend, NativeEvent, NativeId, NativeKind, NativeSignal, Packing, PropValue, Property};
use crate::error::Result;
use crate::widget::{WidgetBase, events, impl_widget, redirect};

use super::menu::{ContextMenu, Menu};

#[derive(Default)]
struct ClickState {
    /// A primary press landed and was not cancelled yet.
    armed: AtomicBool,
    menu: ContextMenu,
}

/// An image inside an event box.
///
/// A primary-button press followed by a release over the same image fires
/// `activated` (no payload). Leaving the image in between cancels the click.
/// A secondary-button press pops up the attached context menu.
#[derive(Clone)]
pub struct Image {
    base: Arc<WidgetBase>,
    image: NativeId,
    state: Arc<ClickState>,
}

impl Image {
    /// Create an image showing `source` (a file path or icon name).
    pub fn new(backend: &Backend, source: &str) -> Self {
        let base = WidgetBase::new(backend, NativeKind::EventBox, "Image");
        let image = backend.create(NativeKind::Image);
        base.init_on(image, Property::Image, PropValue::Text(source.to_string()));
        base.check_init(backend.pack(base.native_id(), image, Packing::Single));
        base.enable_events(&[events::ACTIVATED]);

        let state = Arc::new(ClickState::default());

        let press = base.connect(
            NativeSignal::ButtonPress,
            redirect(&state, |state, event| {
                match event {
                    NativeEvent::Button { button: 1, .. } => state.armed.store(true, Ordering::SeqCst),
                    NativeEvent::Button { button: 3, x, y } => {
                        state.menu.popup(*x, *y)?;
                    }
                    _ => {}
                }
                Ok(())
            }),
        );
        base.check_init(press);

        let weak = Arc::downgrade(&base);
        let release = base.connect(
            NativeSignal::ButtonRelease,
            redirect(&state, move |state, event| {
                if !matches!(event, NativeEvent::Button { button: 1, .. }) {
                    return Ok(());
                }
                let clicked = state.armed.swap(false, Ordering::SeqCst);
                match weak.upgrade() {
                    Some(base) if clicked => base.fire(events::ACTIVATED, EventArgs::None),
                    _ => Ok(()),
                }
            }),
        );
        base.check_init(release);

        let leave = base.connect(
            NativeSignal::LeaveNotify,
            redirect(&state, |state, _| {
                state.armed.store(false, Ordering::SeqCst);
                Ok(())
            }),
        );
        base.check_init(leave);

        Self { base, image, state }
    }

    /// Show a different image.
    pub fn set_image(&self, source: &str) -> Result<()> {
        self.base
            .set_on(self.image, Property::Image, PropValue::Text(source.to_string()))
    }

    /// The current image source.
    pub fn get_image(&self) -> Result<String> {
        self.base.get_text_on(self.image, Property::Image)
    }

    /// Attach (or with `None`, detach) a context menu.
    pub fn set_menu(&self, menu: Option<&Menu>) -> Result<()> {
        self.base.ensure_alive()?;
        self.state.menu.attach(menu.cloned());
        Ok(())
    }
}

impl_widget!(Image, base);
