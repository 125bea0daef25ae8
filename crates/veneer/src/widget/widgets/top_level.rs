//! Top-level windows.
//!
//! A [`TopLevel`] fires `closed` exactly once, however it goes away: an
//! explicit [`close`](TopLevel::close), the window manager's close button,
//! or [`delete`](crate::Widget::delete). Closing does not remove the window
//! from the [`Application`] it was registered with; callers deregister it
//! themselves.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use veneer_core::EventArgs;
use veneer_core::logging::targets;

use crate::application::{Application, WeakApplication};
use crate::backend::{Backend, NativeKind, NativeSignal, Packing, PropValue, Property, WindowCommand};
use crate::error::Result;
use crate::widget::{Container, Widget, WidgetBase, events, impl_widget, redirect};

struct Registration {
    id: String,
    application: WeakApplication,
}

#[derive(Default)]
struct WindowState {
    closing: AtomicBool,
    registration: Mutex<Option<Registration>>,
}

fn close_window(base: &WidgetBase, state: &WindowState) -> Result<()> {
    if state.closing.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let id = state.registration.lock().as_ref().map(|r| r.id.clone());
    tracing::debug!(target: targets::APPLICATION, window = ?id, "closing window");

    // The window goes away even when a listener fails.
    let fired = base.callbacks().fire_event(events::CLOSED, EventArgs::None);
    if !base.is_disposed() {
        base.dispose()?;
    }
    fired?;
    Ok(())
}

/// A top-level window holding one child.
#[derive(Clone)]
pub struct TopLevel {
    base: Arc<WidgetBase>,
    state: Arc<WindowState>,
}

impl TopLevel {
    /// Create a hidden window titled `title`.
    pub fn new(backend: &Backend, title: &str) -> Self {
        let base = WidgetBase::new(backend, NativeKind::Window, "TopLevel");
        base.init(Property::Title, PropValue::Text(title.to_string()));
        base.enable_events(&[events::CLOSED]);

        let state = Arc::new(WindowState::default());
        for signal in [NativeSignal::DeleteEvent, NativeSignal::Destroy] {
            let weak = Arc::downgrade(&base);
            let result = base.connect(
                signal,
                redirect(&state, move |state, _| match weak.upgrade() {
                    Some(base) => Ok(close_window(&base, state)?),
                    None => Ok(()),
                }),
            );
            base.check_init(result);
        }

        Self { base, state }
    }

    /// Fire `closed` (once) and destroy the window.
    pub fn close(&self) -> Result<()> {
        if self.state.closing.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.base.ensure_alive()?;
        close_window(&self.base, &self.state)
    }

    /// Returns `true` once the window started closing.
    pub fn is_closing(&self) -> bool {
        self.state.closing.load(Ordering::SeqCst)
    }

    /// Replace the child.
    pub fn set_widget<W: Widget + Clone>(&self, child: &W) -> Result<()> {
        self.add_widget(child)
    }

    /// Show the window and everything in it.
    pub fn show_all(&self) -> Result<()> {
        self.base.show_all()
    }

    /// The window title.
    pub fn get_title(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Title)
    }

    /// Replace the window title.
    pub fn set_title(&self, title: &str) -> Result<()> {
        self.base.set(Property::Title, PropValue::Text(title.to_string()))
    }

    /// Raise the window above its siblings.
    pub fn raise_window(&self) -> Result<()> {
        self.command(WindowCommand::Raise)
    }

    /// Lower the window below its siblings.
    pub fn lower(&self) -> Result<()> {
        self.command(WindowCommand::Lower)
    }

    /// Give the window input focus.
    pub fn focus(&self) -> Result<()> {
        self.command(WindowCommand::Focus)
    }

    /// Move the window to screen position `(x, y)`.
    pub fn move_to(&self, x: i32, y: i32) -> Result<()> {
        self.command(WindowCommand::Move { x, y })
    }

    pub fn maximize(&self) -> Result<()> {
        self.command(WindowCommand::Maximize)
    }

    pub fn unmaximize(&self) -> Result<()> {
        self.command(WindowCommand::Unmaximize)
    }

    pub fn fullscreen(&self) -> Result<()> {
        self.command(WindowCommand::Fullscreen)
    }

    pub fn unfullscreen(&self) -> Result<()> {
        self.command(WindowCommand::Unfullscreen)
    }

    pub fn iconify(&self) -> Result<()> {
        self.command(WindowCommand::Iconify)
    }

    pub fn uniconify(&self) -> Result<()> {
        self.command(WindowCommand::Uniconify)
    }

    /// The id this window is registered under, if any.
    pub fn window_id(&self) -> Option<String> {
        self.state.registration.lock().as_ref().map(|r| r.id.clone())
    }

    /// The application this window is registered with, while it exists.
    pub fn application(&self) -> Option<Application> {
        self.state
            .registration
            .lock()
            .as_ref()
            .and_then(|r| r.application.upgrade())
    }

    pub(crate) fn stamp(&self, id: &str, application: WeakApplication) {
        *self.state.registration.lock() = Some(Registration {
            id: id.to_string(),
            application,
        });
    }

    fn command(&self, command: WindowCommand) -> Result<()> {
        self.base.ensure_alive()?;
        self.base.backend().window_command(self.base.native_id(), command)?;
        Ok(())
    }
}

impl_widget!(TopLevel, base);

impl Container for TopLevel {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::error::VeneerError;
    use crate::widget::widgets::{Button, VBox};
    use std::sync::atomic::AtomicUsize;

    fn setup() -> (Arc<HeadlessBackend>, Backend) {
        let headless = Arc::new(HeadlessBackend::new());
        let backend: Backend = headless.clone();
        (headless, backend)
    }

    fn count_closed(window: &TopLevel) -> Arc<AtomicUsize> {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        window
            .add_callback(events::CLOSED, move |_| {
                hits_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        hits
    }

    #[test]
    fn test_close_fires_once() {
        let (headless, backend) = setup();
        let window = TopLevel::new(&backend, "Main");
        let closed = count_closed(&window);

        window.close().unwrap();
        window.close().unwrap();

        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert!(window.is_disposed());
        assert_eq!(headless.widget_count(), 0);
    }

    #[test]
    fn test_failing_closed_listener_still_disposes() {
        let (headless, backend) = setup();
        let window = TopLevel::new(&backend, "Main");
        let closed = count_closed(&window);
        window
            .add_callback(events::CLOSED, |_| Err("still saving".into()))
            .unwrap();

        assert!(matches!(window.close(), Err(VeneerError::Callback(_))));
        assert!(window.is_disposed());
        assert_eq!(headless.widget_count(), 0);

        window.close().unwrap();
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_window_manager_close() {
        let (headless, backend) = setup();
        let window = TopLevel::new(&backend, "Main");
        let body = VBox::new(&backend);
        body.add_widget(&Button::new(&backend, "ok")).unwrap();
        window.set_widget(&body).unwrap();
        let closed = count_closed(&window);

        headless.request_close(window.native_id()).unwrap();

        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert!(body.is_disposed());
        assert_eq!(headless.widget_count(), 0);
    }

    #[test]
    fn test_delete_fires_closed() {
        let (_headless, backend) = setup();
        let window = TopLevel::new(&backend, "Main");
        let closed = count_closed(&window);

        window.delete().unwrap();
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert!(window.is_closing());
        assert!(matches!(window.set_title("x"), Err(VeneerError::Disposed)));
    }

    #[test]
    fn test_window_commands() {
        let (headless, backend) = setup();
        let window = TopLevel::new(&backend, "Main");
        window.raise_window().unwrap();
        window.move_to(10, 20).unwrap();
        window.fullscreen().unwrap();

        assert_eq!(
            headless.window_commands(),
            vec![
                (window.native_id(), WindowCommand::Raise),
                (window.native_id(), WindowCommand::Move { x: 10, y: 20 }),
                (window.native_id(), WindowCommand::Fullscreen),
            ]
        );
    }

    #[test]
    fn test_title_and_show() {
        let (_headless, backend) = setup();
        let window = TopLevel::new(&backend, "Before");
        window.set_title("After").unwrap();
        assert_eq!(window.get_title().unwrap(), "After");

        window.show_all().unwrap();
        assert!(window.is_visible().unwrap());
        assert_eq!(window.window_id(), None);
    }
}
