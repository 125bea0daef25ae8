//! Base widget implementation.
//!
//! [`WidgetBase`] holds exclusive ownership of one native widget and
//! provides the bookkeeping every wrapper shares: the callback registry, the
//! disposed flag, and the ordered list of owned children.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use veneer_core::logging::targets;
use veneer_core::{Callbacks, EventArgs, ListenerError};

use crate::backend::{Backend, HandlerId, NativeEvent, NativeHandler, NativeId, NativeKind, NativeSignal, PropValue, Property, handler};
use crate::error::{Result, VeneerError};

use super::traits::Widget;

#[derive(Default)]
struct BaseState {
    disposed: bool,
    parent: Option<Weak<WidgetBase>>,
    children: Vec<Arc<dyn Widget>>,
}

/// Common state of every wrapped control.
pub struct WidgetBase {
    backend: Backend,
    native: NativeId,
    type_name: &'static str,
    callbacks: Callbacks,
    state: Mutex<BaseState>,
}

impl WidgetBase {
    /// Create a native widget of `kind` and take ownership of it.
    pub fn new(backend: &Backend, kind: NativeKind, type_name: &'static str) -> Arc<Self> {
        let native = backend.create(kind);
        Self::adopt_native(backend, native, type_name)
    }

    /// Take ownership of an existing native widget.
    pub fn adopt_native(backend: &Backend, native: NativeId, type_name: &'static str) -> Arc<Self> {
        tracing::trace!(target: targets::WIDGET, ?native, type_name, "wrapping native widget");
        Arc::new(Self {
            backend: Arc::clone(backend),
            native,
            type_name,
            callbacks: Callbacks::new(),
            state: Mutex::new(BaseState::default()),
        })
    }

    /// The backend owning the native widget.
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// The native widget handle.
    pub fn native_id(&self) -> NativeId {
        self.native
    }

    /// Wrapper type name used in logs and debug trees.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The event registry of this widget.
    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Enable every name in `events`.
    pub fn enable_events(&self, events: &[&str]) {
        for name in events {
            self.callbacks.enable_event(name);
        }
    }

    /// Fire an event from inside a native handler.
    pub fn fire(&self, name: &str, args: EventArgs) -> std::result::Result<(), ListenerError> {
        self.callbacks.fire_event(name, args)?;
        Ok(())
    }

    /// Returns `true` once the widget was destroyed.
    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    /// Fail with [`VeneerError::Disposed`] if the widget was destroyed.
    pub fn ensure_alive(&self) -> Result<()> {
        if self.is_disposed() {
            Err(VeneerError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Apply construction-time state to the native widget.
    ///
    /// The widget was just created, so failures are logged rather than
    /// returned.
    pub(crate) fn init(&self, prop: Property, value: PropValue) {
        self.init_on(self.native, prop, value);
    }

    /// Apply construction-time state to an auxiliary native widget.
    pub(crate) fn init_on(&self, native: NativeId, prop: Property, value: PropValue) {
        let result = self.backend.set_property(native, prop, value);
        self.check_init(result);
    }

    /// Log a failed construction step.
    pub(crate) fn check_init<T, E: std::fmt::Display>(&self, result: std::result::Result<T, E>) {
        if let Err(err) = result {
            tracing::warn!(
                target: targets::WIDGET,
                type_name = self.type_name,
                %err,
                "native widget setup failed"
            );
        }
    }

    /// Set a property on the native widget.
    pub fn set(&self, prop: Property, value: PropValue) -> Result<()> {
        self.set_on(self.native, prop, value)
    }

    /// Set a property on an auxiliary native widget this wrapper owns.
    pub fn set_on(&self, native: NativeId, prop: Property, value: PropValue) -> Result<()> {
        self.ensure_alive()?;
        self.backend.set_property(native, prop, value)?;
        Ok(())
    }

    /// Read a property of the native widget.
    pub fn get(&self, prop: Property) -> Result<Option<PropValue>> {
        self.get_on(self.native, prop)
    }

    /// Read a property of an auxiliary native widget this wrapper owns.
    pub fn get_on(&self, native: NativeId, prop: Property) -> Result<Option<PropValue>> {
        self.ensure_alive()?;
        Ok(self.backend.property(native, prop)?)
    }

    /// Read a text property, defaulting to the empty string.
    pub fn get_text_on(&self, native: NativeId, prop: Property) -> Result<String> {
        Ok(self
            .get_on(native, prop)?
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_default())
    }

    /// Read a boolean property, defaulting to `false`.
    pub fn get_bool(&self, prop: Property) -> Result<bool> {
        Ok(self.get(prop)?.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Connect a handler to a native signal of `native`.
    pub fn connect_on(&self, native: NativeId, signal: NativeSignal, handler: NativeHandler) -> Result<HandlerId> {
        Ok(self.backend.connect(native, signal, handler)?)
    }

    /// Connect a handler to a native signal of this widget.
    pub fn connect(&self, signal: NativeSignal, handler: NativeHandler) -> Result<HandlerId> {
        self.connect_on(self.native, signal, handler)
    }

    /// Make the widget and its subtree visible.
    pub fn show_all(&self) -> Result<()> {
        self.ensure_alive()?;
        self.backend.show_all(self.native)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Ownership
    // -------------------------------------------------------------------------

    /// Snapshot of the owned children, in insertion order.
    pub fn children(&self) -> Vec<Arc<dyn Widget>> {
        self.state.lock().children.clone()
    }

    /// Number of owned children.
    pub fn child_count(&self) -> usize {
        self.state.lock().children.len()
    }

    /// Returns `true` if `native` belongs to an owned child.
    pub fn has_child(&self, native: NativeId) -> bool {
        self.state
            .lock()
            .children
            .iter()
            .any(|c| c.widget_base().native_id() == native)
    }

    /// The owning container, if any.
    pub fn parent(&self) -> Option<Arc<WidgetBase>> {
        self.state.lock().parent.as_ref().and_then(Weak::upgrade)
    }

    /// Record `child` as owned by this widget.
    ///
    /// A child has exactly one owner; adding a child that still belongs to
    /// another container fails with [`VeneerError::AlreadyParented`].
    pub fn adopt(self: &Arc<Self>, child: Arc<dyn Widget>) -> Result<()> {
        self.check_adoptable(child.widget_base(), false)?;
        child.widget_base().state.lock().parent = Some(Arc::downgrade(self));
        self.state.lock().children.push(child);
        Ok(())
    }

    /// Check that `child` could be adopted here without touching either side.
    ///
    /// With `own_ok`, a child already owned by this widget passes.
    pub(crate) fn check_adoptable(self: &Arc<Self>, child: &Arc<WidgetBase>, own_ok: bool) -> Result<()> {
        self.ensure_alive()?;
        if Arc::ptr_eq(self, child) {
            return Err(VeneerError::invalid_argument(
                self.type_name,
                "a widget cannot contain itself",
            ));
        }
        let child_state = child.state.lock();
        if child_state.disposed {
            return Err(VeneerError::Disposed);
        }
        match child_state.parent.as_ref().and_then(Weak::upgrade) {
            Some(parent) if !(own_ok && Arc::ptr_eq(&parent, self)) => Err(VeneerError::AlreadyParented),
            _ => Ok(()),
        }
    }

    /// Forget an owned child and return it.
    ///
    /// Fails with [`VeneerError::NotAChild`] if `native` is not owned here.
    pub fn release(&self, native: NativeId) -> Result<Arc<dyn Widget>> {
        let child = {
            let mut state = self.state.lock();
            let pos = state
                .children
                .iter()
                .position(|c| c.widget_base().native_id() == native)
                .ok_or(VeneerError::NotAChild)?;
            state.children.remove(pos)
        };
        child.widget_base().state.lock().parent = None;
        Ok(child)
    }

    /// Destroy the native widget and mark this wrapper and every owned
    /// descendant as disposed.
    pub fn dispose(&self) -> Result<()> {
        let (children, parent) = {
            let mut state = self.state.lock();
            if state.disposed {
                return Err(VeneerError::Disposed);
            }
            state.disposed = true;
            (std::mem::take(&mut state.children), state.parent.take())
        };

        if let Some(parent) = parent.and_then(|p| p.upgrade()) {
            parent
                .state
                .lock()
                .children
                .retain(|c| c.widget_base().native_id() != self.native);
        }
        for child in &children {
            child.widget_base().mark_disposed();
        }

        tracing::debug!(
            target: targets::WIDGET,
            native = ?self.native,
            type_name = self.type_name,
            children = children.len(),
            "disposing widget"
        );
        self.backend.destroy(self.native)?;
        Ok(())
    }

    fn mark_disposed(&self) {
        let children = {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.parent = None;
            std::mem::take(&mut state.children)
        };
        for child in children {
            child.widget_base().mark_disposed();
        }
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("WidgetBase")
            .field("type_name", &self.type_name)
            .field("native", &self.native)
            .field("disposed", &state.disposed)
            .field("children", &state.children.len())
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

static_assertions::assert_impl_all!(WidgetBase: Send, Sync);

/// Build a native handler that forwards to `shared` while it is alive.
///
/// The handler only holds a weak reference, so the native side never keeps a
/// wrapper alive.
pub(crate) fn redirect<T, F>(shared: &Arc<T>, f: F) -> NativeHandler
where
    T: Send + Sync + 'static,
    F: Fn(&T, &NativeEvent) -> std::result::Result<(), ListenerError> + Send + Sync + 'static,
{
    let weak = Arc::downgrade(shared);
    handler(move |event| match weak.upgrade() {
        Some(shared) => f(&shared, event),
        None => Ok(()),
    })
}
