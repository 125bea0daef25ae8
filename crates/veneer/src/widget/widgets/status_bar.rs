//! Status bar with auto-expiring messages.
//!
//! Every [`StatusBar::set_message`] replaces the message shown and restarts
//! the clear timer: at most one clear is pending at any time.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use veneer_core::TimerId;
use veneer_core::logging::targets;

use crate::backend::{Backend, NativeKind, PropValue, Property};
use crate::config::VeneerConfig;
use crate::error::Result;
use crate::widget::{WidgetBase, impl_widget};

/// A status bar.
#[derive(Clone)]
pub struct StatusBar {
    base: Arc<WidgetBase>,
    delay: Duration,
    pending: Arc<Mutex<Option<TimerId>>>,
}

impl StatusBar {
    /// Create a status bar clearing messages after the default delay.
    pub fn new(backend: &Backend) -> Self {
        Self::with_delay(backend, VeneerConfig::default().status_clear_delay())
    }

    /// Create a status bar clearing messages after `delay`.
    pub fn with_delay(backend: &Backend, delay: Duration) -> Self {
        Self {
            base: WidgetBase::new(backend, NativeKind::Statusbar, "StatusBar"),
            delay,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Show `text`, replacing the current message, and schedule it to be
    /// cleared. A clear scheduled by an earlier message is cancelled.
    pub fn set_message(&self, text: &str) -> Result<()> {
        self.cancel_pending();
        self.base.set(Property::Text, PropValue::Text(text.to_string()))?;

        let weak_base = Arc::downgrade(&self.base);
        let weak_pending = Arc::downgrade(&self.pending);
        let timer = self.base.backend().schedule(
            self.delay,
            Box::new(move || {
                if let Some(pending) = weak_pending.upgrade() {
                    pending.lock().take();
                }
                let Some(base) = weak_base.upgrade() else {
                    return;
                };
                if base.is_disposed() {
                    return;
                }
                tracing::debug!(target: targets::TIMER, "clearing status message");
                if let Err(err) = base.set(Property::Text, PropValue::Text(String::new())) {
                    tracing::warn!(target: targets::TIMER, %err, "failed to clear status message");
                }
            }),
        );
        *self.pending.lock() = Some(timer);
        tracing::debug!(target: targets::TIMER, ?timer, delay = ?self.delay, "scheduled status clear");
        Ok(())
    }

    /// The message currently shown.
    pub fn get_message(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Text)
    }

    /// Clear the message now and cancel the pending clear.
    pub fn clear(&self) -> Result<()> {
        self.cancel_pending();
        self.base.set(Property::Text, PropValue::Text(String::new()))
    }

    /// Returns `true` while an automatic clear is scheduled.
    pub fn has_pending_clear(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// The delay before a message is cleared.
    pub fn clear_delay(&self) -> Duration {
        self.delay
    }

    fn cancel_pending(&self) {
        if let Some(timer) = self.pending.lock().take() {
            let cancelled = self.base.backend().cancel(timer);
            tracing::trace!(target: targets::TIMER, ?timer, cancelled, "cancelled status clear");
        }
    }
}

impl_widget!(StatusBar, base);
