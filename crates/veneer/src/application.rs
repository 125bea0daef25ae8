//! The application object and its window registry.
//!
//! An [`Application`] owns the backend handle, the configuration, and a
//! registry of top-level windows keyed by id. Windows registered without an
//! explicit id receive generated ids (`win0`, `win1`, ...). Closing a window
//! does not deregister it; call [`Application::remove_window`] for that.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::Mutex;
use veneer_core::logging::targets;

use crate::backend::Backend;
use crate::config::VeneerConfig;
use crate::error::{Result, VeneerError};
use crate::widget::Widget;
use crate::widget::widgets::TopLevel;

struct AppInner {
    backend: Backend,
    config: VeneerConfig,
    windows: Mutex<IndexMap<String, TopLevel>>,
    next_id: AtomicU64,
}

/// Shared application state.
///
/// Cloning is cheap; clones refer to the same registry.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use veneer::backend::{Backend, HeadlessBackend};
/// use veneer::{Application, VeneerConfig};
///
/// let backend: Backend = Arc::new(HeadlessBackend::new());
/// let app = Application::new(backend, VeneerConfig::default());
///
/// let main = app.make_window("Main", None).unwrap();
/// assert_eq!(main.window_id().as_deref(), Some("win0"));
/// assert!(app.has_window("win0"));
/// ```
#[derive(Clone)]
pub struct Application {
    inner: Arc<AppInner>,
}

/// A non-owning reference to an [`Application`], held by its windows.
#[derive(Clone)]
pub struct WeakApplication {
    inner: Weak<AppInner>,
}

impl WeakApplication {
    /// The application, if it still exists.
    pub fn upgrade(&self) -> Option<Application> {
        self.inner.upgrade().map(|inner| Application { inner })
    }
}

impl Application {
    /// Create an application over `backend`.
    pub fn new(backend: Backend, config: VeneerConfig) -> Self {
        Self {
            inner: Arc::new(AppInner {
                backend,
                config,
                windows: Mutex::new(IndexMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// The backend windows are created on.
    pub fn backend(&self) -> &Backend {
        &self.inner.backend
    }

    /// The configuration handed to widgets.
    pub fn config(&self) -> &VeneerConfig {
        &self.inner.config
    }

    /// A weak reference to this application.
    pub fn downgrade(&self) -> WeakApplication {
        WeakApplication {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Register `window`, under `id` if given or a generated id otherwise.
    ///
    /// Returns the id. Fails with [`VeneerError::DuplicateWindow`] if `id` is
    /// taken.
    pub fn add_window(&self, window: &TopLevel, id: Option<&str>) -> Result<String> {
        window.widget_base().ensure_alive()?;
        let id = {
            let mut windows = self.inner.windows.lock();
            let id = match id {
                Some(id) if windows.contains_key(id) => {
                    return Err(VeneerError::DuplicateWindow(id.to_string()));
                }
                Some(id) => id.to_string(),
                None => loop {
                    let n = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                    let candidate = format!("{}{n}", self.inner.config.window_id_prefix);
                    if !windows.contains_key(&candidate) {
                        break candidate;
                    }
                },
            };
            windows.insert(id.clone(), window.clone());
            id
        };

        window.stamp(&id, self.downgrade());
        tracing::debug!(target: targets::APPLICATION, window = %id, "registered window");
        Ok(id)
    }

    /// Create a window titled `title` and register it.
    pub fn make_window(&self, title: &str, id: Option<&str>) -> Result<TopLevel> {
        let window = TopLevel::new(&self.inner.backend, title);
        if let Err(err) = self.add_window(&window, id) {
            window.delete()?;
            return Err(err);
        }
        Ok(window)
    }

    /// The window registered under `id`.
    pub fn get_window(&self, id: &str) -> Result<TopLevel> {
        self.inner
            .windows
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| VeneerError::NotFound(id.to_string()))
    }

    /// Returns `true` if a window is registered under `id`.
    pub fn has_window(&self, id: &str) -> bool {
        self.inner.windows.lock().contains_key(id)
    }

    /// Registered ids in registration order.
    pub fn get_wids(&self) -> Vec<String> {
        self.inner.windows.lock().keys().cloned().collect()
    }

    /// Alias of [`get_wids`](Self::get_wids).
    pub fn window_ids(&self) -> Vec<String> {
        self.get_wids()
    }

    /// Number of registered windows.
    pub fn num_windows(&self) -> usize {
        self.inner.windows.lock().len()
    }

    /// Deregister the window under `id` and return it. The window stays open.
    pub fn remove_window(&self, id: &str) -> Result<TopLevel> {
        let window = self
            .inner
            .windows
            .lock()
            .shift_remove(id)
            .ok_or_else(|| VeneerError::NotFound(id.to_string()))?;
        tracing::debug!(target: targets::APPLICATION, window = %id, "deregistered window");
        Ok(window)
    }

    /// Dimensions of the default screen.
    ///
    /// Falls back to the configured size when the toolkit has no screen.
    pub fn screen_size(&self) -> (u32, u32) {
        self.inner.backend.screen_size().unwrap_or_else(|| {
            let fallback = self.inner.config.fallback_screen;
            tracing::debug!(
                target: targets::APPLICATION,
                width = fallback.width,
                height = fallback.height,
                "no default screen; using fallback size"
            );
            (fallback.width, fallback.height)
        })
    }

    /// Process every pending toolkit event. Returns the number processed.
    pub fn process_events(&self) -> usize {
        self.inner.backend.process_pending()
    }

    /// Ask the toolkit's main loop to stop.
    pub fn process_end(&self) {
        tracing::debug!(target: targets::APPLICATION, "stopping main loop");
        self.inner.backend.quit();
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("windows", &self.get_wids())
            .finish()
    }
}

static_assertions::assert_impl_all!(Application: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::config::ScreenSize;

    fn setup() -> (Arc<HeadlessBackend>, Application) {
        let headless = Arc::new(HeadlessBackend::new());
        let app = Application::new(headless.clone(), VeneerConfig::default());
        (headless, app)
    }

    #[test]
    fn test_generated_ids() {
        let (_headless, app) = setup();
        let first = app.make_window("a", None).unwrap();
        let second = app.make_window("b", None).unwrap();
        assert_eq!(first.window_id().as_deref(), Some("win0"));
        assert_eq!(second.window_id().as_deref(), Some("win1"));
        assert_eq!(app.get_wids(), vec!["win0", "win1"]);
    }

    #[test]
    fn test_generated_ids_skip_taken() {
        let (_headless, app) = setup();
        app.make_window("named", Some("win0")).unwrap();
        let window = app.make_window("auto", None).unwrap();
        assert_eq!(window.window_id().as_deref(), Some("win1"));
    }

    #[test]
    fn test_lookup_errors() {
        let (headless, app) = setup();
        assert!(matches!(app.get_window("nope"), Err(VeneerError::NotFound(_))));
        assert!(matches!(app.remove_window("nope"), Err(VeneerError::NotFound(_))));

        app.make_window("a", Some("main")).unwrap();
        let before = headless.widget_count();
        assert!(matches!(
            app.make_window("b", Some("main")),
            Err(VeneerError::DuplicateWindow(_))
        ));
        // The rejected window was destroyed again.
        assert_eq!(headless.widget_count(), before);
    }

    #[test]
    fn test_window_back_reference() {
        let (_headless, app) = setup();
        let window = app.make_window("a", None).unwrap();
        let owner = window.application().unwrap();
        assert!(owner.has_window("win0"));

        let looked_up = app.get_window("win0").unwrap();
        assert_eq!(looked_up.native_id(), window.native_id());
    }

    #[test]
    fn test_close_keeps_registration() {
        let (_headless, app) = setup();
        let window = app.make_window("a", None).unwrap();
        window.close().unwrap();
        assert!(app.has_window("win0"));

        app.remove_window("win0").unwrap();
        assert!(!app.has_window("win0"));
        assert_eq!(app.num_windows(), 0);
    }

    #[test]
    fn test_screen_size_fallback() {
        let headless = Arc::new(HeadlessBackend::with_screen_size(800, 600));
        let mut config = VeneerConfig::default();
        config.fallback_screen = ScreenSize { width: 1024, height: 768 };
        let app = Application::new(headless.clone(), config);

        assert_eq!(app.screen_size(), (800, 600));
        headless.set_screen_size(None);
        assert_eq!(app.screen_size(), (1024, 768));
    }

    #[test]
    fn test_event_pump_and_quit() {
        let (headless, app) = setup();
        headless.queue_events(3);
        assert_eq!(app.process_events(), 3);
        assert_eq!(app.process_events(), 0);

        app.process_end();
        assert!(headless.quit_requested());
    }
}
