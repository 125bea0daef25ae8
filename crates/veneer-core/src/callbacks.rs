//! Named-event callback registry.
//!
//! Every wrapped control owns one [`Callbacks`] registry. An event name has to
//! be *enabled* before listeners can attach to it; firing runs every listener
//! for that name synchronously, in registration order.
//!
//! # Key Types
//!
//! - [`Callbacks`] - The registry itself
//! - [`EventArgs`] - Payload handed to every listener
//! - [`ListenerId`] - Returned by [`Callbacks::register_listener`], used to remove a listener
//!
//! # Re-entrancy
//!
//! Firing takes a snapshot of the listener list and releases the registry lock
//! before invoking anything. A listener may therefore fire other events,
//! register or remove listeners, or mutate the widget it was triggered from.
//! Listeners added during a firing are not called for that firing; listeners
//! removed during a firing still receive it.
//!
//! # Example
//!
//! ```
//! use veneer_core::{Callbacks, EventArgs};
//!
//! let callbacks = Callbacks::new();
//! callbacks.enable_event("activated");
//!
//! callbacks
//!     .register_listener("activated", |args| {
//!         println!("activated with {:?}", args);
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! callbacks.fire_event("activated", EventArgs::Bool(true)).unwrap();
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{CallbackError, ListenerError};
use crate::logging::targets;

new_key_type! {
    /// Identifies one registered listener.
    ///
    /// Valid until the listener is removed via [`Callbacks::remove_listener`]
    /// or [`Callbacks::clear_listeners`].
    pub struct ListenerId;
}

/// Payload delivered to listeners when an event fires.
///
/// Each wrapped control documents which variant its events carry.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventArgs {
    /// No payload (plain buttons, menu actions, `closed`).
    #[default]
    None,
    /// A new boolean state (check boxes, toggle and radio buttons).
    Bool(bool),
    /// An integer index (combo box entry, notebook page).
    Index(i32),
    /// A numeric value (spin boxes, sliders, scroll bars).
    Value(f64),
    /// A text payload.
    Text(String),
    /// A width/height pair (scroll area `configure`).
    Size {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// A tree view selection: the owning branch key and the selected item.
    Selection {
        /// Key of the branch that owns the selected row.
        group: String,
        /// Key of the selected row.
        item: String,
    },
}

impl EventArgs {
    /// The boolean payload, if this is [`EventArgs::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The index payload, if this is [`EventArgs::Index`].
    pub fn as_index(&self) -> Option<i32> {
        match self {
            Self::Index(v) => Some(*v),
            _ => None,
        }
    }

    /// The numeric payload, if this is [`EventArgs::Value`].
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// The text payload, if this is [`EventArgs::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The `(width, height)` payload, if this is [`EventArgs::Size`].
    pub fn as_size(&self) -> Option<(u32, u32)> {
        match self {
            Self::Size { width, height } => Some((*width, *height)),
            _ => None,
        }
    }

    /// The `(group, item)` payload, if this is [`EventArgs::Selection`].
    pub fn as_selection(&self) -> Option<(&str, &str)> {
        match self {
            Self::Selection { group, item } => Some((group, item)),
            _ => None,
        }
    }
}

impl From<()> for EventArgs {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl From<bool> for EventArgs {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for EventArgs {
    fn from(v: i32) -> Self {
        Self::Index(v)
    }
}

impl From<f64> for EventArgs {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<String> for EventArgs {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for EventArgs {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

type Listener = Arc<dyn Fn(&EventArgs) -> Result<(), ListenerError> + Send + Sync>;

/// One enabled event and its ordered listeners.
struct EventEntry {
    name: String,
    listeners: Vec<(ListenerId, Listener)>,
}

struct Registry {
    /// Enabled events, in the order they were enabled.
    events: Vec<EventEntry>,
    /// Maps every live listener to the event it is attached to.
    owners: SlotMap<ListenerId, usize>,
}

impl Registry {
    fn position(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|e| e.name == name)
    }
}

/// A registry of named events and their listeners.
///
/// `Callbacks` is `Send + Sync`; listeners must be too.
pub struct Callbacks {
    registry: Mutex<Registry>,
    blocked: AtomicBool,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl Callbacks {
    /// Create an empty registry with no enabled events.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                events: Vec::new(),
                owners: SlotMap::with_key(),
            }),
            blocked: AtomicBool::new(false),
        }
    }

    /// Register `name` as a known event. Enabling twice is a no-op.
    pub fn enable_event(&self, name: &str) {
        let mut registry = self.registry.lock();
        if registry.position(name).is_none() {
            registry.events.push(EventEntry {
                name: name.to_string(),
                listeners: Vec::new(),
            });
        }
    }

    /// Returns `true` if `name` has been enabled.
    pub fn has_event(&self, name: &str) -> bool {
        self.registry.lock().position(name).is_some()
    }

    /// Names of all enabled events, in the order they were enabled.
    pub fn event_names(&self) -> Vec<String> {
        self.registry
            .lock()
            .events
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    /// Append a listener to the listeners of `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`CallbackError::UnknownEvent`] if `name` was never enabled.
    pub fn register_listener<F>(&self, name: &str, listener: F) -> Result<ListenerId, CallbackError>
    where
        F: Fn(&EventArgs) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let Some(pos) = registry.position(name) else {
            return Err(CallbackError::UnknownEvent(name.to_string()));
        };
        let id = registry.owners.insert(pos);
        registry.events[pos].listeners.push((id, Arc::new(listener)));
        Ok(id)
    }

    /// Remove one listener. Returns `true` if it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.lock();
        let Some(pos) = registry.owners.remove(id) else {
            return false;
        };
        registry.events[pos].listeners.retain(|(lid, _)| *lid != id);
        true
    }

    /// Remove every listener attached to `name`. The event stays enabled.
    pub fn clear_listeners(&self, name: &str) -> Result<(), CallbackError> {
        let mut registry = self.registry.lock();
        let Some(pos) = registry.position(name) else {
            return Err(CallbackError::UnknownEvent(name.to_string()));
        };
        let removed: Vec<ListenerId> = registry.events[pos]
            .listeners
            .drain(..)
            .map(|(id, _)| id)
            .collect();
        for id in removed {
            registry.owners.remove(id);
        }
        Ok(())
    }

    /// Number of listeners attached to `name` (zero for unknown events).
    pub fn listener_count(&self, name: &str) -> usize {
        let registry = self.registry.lock();
        registry
            .position(name)
            .map_or(0, |pos| registry.events[pos].listeners.len())
    }

    /// Temporarily suppress delivery.
    ///
    /// While blocked, [`fire_event`](Self::fire_event) still validates the
    /// event name but invokes nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Returns `true` if delivery is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every listener of `name` in registration order.
    ///
    /// # Errors
    ///
    /// - [`CallbackError::UnknownEvent`] if `name` was never enabled.
    /// - [`CallbackError::Listener`] with the first listener error; remaining
    ///   listeners are skipped.
    #[tracing::instrument(skip(self, args), target = "veneer_core::callbacks", level = "trace")]
    pub fn fire_event(&self, name: &str, args: EventArgs) -> Result<(), CallbackError> {
        let snapshot: Vec<Listener> = {
            let registry = self.registry.lock();
            let Some(pos) = registry.position(name) else {
                return Err(CallbackError::UnknownEvent(name.to_string()));
            };
            registry.events[pos]
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };

        if self.is_blocked() {
            tracing::trace!(target: targets::CALLBACKS, event = name, "callbacks blocked, skipping");
            return Ok(());
        }

        tracing::trace!(
            target: targets::CALLBACKS,
            event = name,
            listener_count = snapshot.len(),
            "firing event"
        );

        for listener in snapshot {
            listener(&args).map_err(|source| CallbackError::Listener {
                event: name.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Shorthand for firing an event without payload.
    pub fn fire(&self, name: &str) -> Result<(), CallbackError> {
        self.fire_event(name, EventArgs::None)
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        let mut map = f.debug_map();
        for entry in &registry.events {
            map.entry(&entry.name, &entry.listeners.len());
        }
        map.finish()
    }
}

static_assertions::assert_impl_all!(Callbacks: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_enable_is_idempotent() {
        let callbacks = Callbacks::new();
        callbacks.enable_event("activated");
        callbacks.enable_event("activated");
        assert_eq!(callbacks.event_names(), vec!["activated".to_string()]);
    }

    #[test]
    fn test_register_unknown_event_fails() {
        let callbacks = Callbacks::new();
        let err = callbacks.register_listener("nope", |_| Ok(())).unwrap_err();
        assert!(err.is_unknown_event());
        assert_eq!(err.event(), "nope");
    }

    #[test]
    fn test_fire_unknown_event_fails() {
        let callbacks = Callbacks::new();
        assert!(callbacks.fire("nope").unwrap_err().is_unknown_event());
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let callbacks = Callbacks::new();
        callbacks.enable_event("value-changed");
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            callbacks
                .register_listener("value-changed", move |args| {
                    seen.lock().push((tag, args.as_value()));
                    Ok(())
                })
                .unwrap();
        }

        callbacks.fire_event("value-changed", 2.5.into()).unwrap();
        assert_eq!(
            *seen.lock(),
            vec![("first", Some(2.5)), ("second", Some(2.5)), ("third", Some(2.5))]
        );
    }

    #[test]
    fn test_listener_error_aborts_delivery() {
        let callbacks = Callbacks::new();
        callbacks.enable_event("activated");
        let later = Arc::new(AtomicUsize::new(0));

        callbacks
            .register_listener("activated", |_| Err("boom".into()))
            .unwrap();
        let later_clone = later.clone();
        callbacks
            .register_listener("activated", move |_| {
                later_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        let err = callbacks.fire("activated").unwrap_err();
        assert!(matches!(err, CallbackError::Listener { ref event, .. } if event == "activated"));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_listener() {
        let callbacks = Callbacks::new();
        callbacks.enable_event("activated");
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let id = callbacks
            .register_listener("activated", move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        assert!(callbacks.remove_listener(id));
        assert!(!callbacks.remove_listener(id));
        callbacks.fire("activated").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(callbacks.listener_count("activated"), 0);
    }

    #[test]
    fn test_reentrant_fire_and_register() {
        let callbacks = Arc::new(Callbacks::new());
        callbacks.enable_event("outer");
        callbacks.enable_event("inner");
        let inner_hits = Arc::new(AtomicUsize::new(0));

        let inner_clone = inner_hits.clone();
        callbacks
            .register_listener("inner", move |_| {
                inner_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        let cb = callbacks.clone();
        callbacks
            .register_listener("outer", move |_| {
                // registering during a firing must not deadlock
                cb.register_listener("outer", |_| Ok(()))?;
                cb.fire("inner")?;
                Ok(())
            })
            .unwrap();

        callbacks.fire("outer").unwrap();
        assert_eq!(inner_hits.load(Ordering::SeqCst), 1);
        assert_eq!(callbacks.listener_count("outer"), 2);
    }

    #[test]
    fn test_blocked_skips_listeners() {
        let callbacks = Callbacks::new();
        callbacks.enable_event("activated");
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        callbacks
            .register_listener("activated", move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        callbacks.set_blocked(true);
        callbacks.fire("activated").unwrap();
        assert!(callbacks.fire("unknown").is_err());
        callbacks.set_blocked(false);
        callbacks.fire("activated").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_listeners_keeps_event() {
        let callbacks = Callbacks::new();
        callbacks.enable_event("activated");
        callbacks.register_listener("activated", |_| Ok(())).unwrap();
        callbacks.register_listener("activated", |_| Ok(())).unwrap();

        callbacks.clear_listeners("activated").unwrap();
        assert!(callbacks.has_event("activated"));
        assert_eq!(callbacks.listener_count("activated"), 0);
    }

    #[test]
    fn test_event_args_accessors() {
        let sel = EventArgs::Selection {
            group: "g1".into(),
            item: "x".into(),
        };
        assert_eq!(sel.as_selection(), Some(("g1", "x")));
        assert_eq!(EventArgs::from(3).as_index(), Some(3));
        assert_eq!(EventArgs::from(true).as_bool(), Some(true));
        assert_eq!(EventArgs::from("hi").as_text(), Some("hi"));
        assert_eq!(EventArgs::None.as_bool(), None);
    }
}
