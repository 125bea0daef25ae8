//! Drop-down selection of text entries.
//!
//! The wrapper keeps its own copy of the entry list and mirrors it into the
//! native `Items` property after every mutation. Selecting an entry, by the
//! user or through [`ComboBox::set_index`], fires `activated` with the
//! entry's index as [`EventArgs::Index`].

use std::sync::Arc;

use parking_lot::Mutex;
use veneer_core::EventArgs;

use crate::backend::{Backend, NativeEvent, NativeKind, NativeSignal, PropValue, Property};
use crate::error::{Result, VeneerError};
use crate::widget::{WidgetBase, events, impl_widget, redirect};

/// Position at which `text` keeps an ascending list ascending.
///
/// Scans for the first entry greater than `text`; equal entries keep their
/// insertion order.
fn alpha_position(entries: &[String], text: &str) -> usize {
    entries
        .iter()
        .position(|entry| entry.as_str() > text)
        .unwrap_or(entries.len())
}

/// A combo box, optionally with an editable entry.
#[derive(Clone)]
pub struct ComboBox {
    base: Arc<WidgetBase>,
    entries: Arc<Mutex<Vec<String>>>,
}

impl ComboBox {
    /// Create an empty combo box. An editable combo box lets the user type
    /// text that is not in the list.
    pub fn new(backend: &Backend, editable: bool) -> Self {
        let kind = if editable {
            NativeKind::ComboBoxEntry
        } else {
            NativeKind::ComboBox
        };
        let base = WidgetBase::new(backend, kind, "ComboBox");
        base.enable_events(&[events::ACTIVATED]);
        let result = base.connect(
            NativeSignal::Changed,
            redirect(&base, |base, event| match event {
                NativeEvent::Index(index) if *index >= 0 => {
                    base.fire(events::ACTIVATED, EventArgs::Index(*index))
                }
                _ => Ok(()),
            }),
        );
        base.check_init(result);
        Self {
            base,
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a combo box holding `items`, in order.
    pub fn with_items<I, S>(backend: &Backend, editable: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let combo = Self::new(backend, editable);
        combo.entries.lock().extend(items.into_iter().map(Into::into));
        let result = combo.sync();
        combo.base.check_init(result);
        combo
    }

    /// Append an entry.
    pub fn append_text(&self, text: &str) -> Result<()> {
        self.base.ensure_alive()?;
        self.entries.lock().push(text.to_string());
        self.sync()
    }

    /// Insert an entry at `index`.
    pub fn insert_text(&self, index: usize, text: &str) -> Result<()> {
        self.base.ensure_alive()?;
        {
            let mut entries = self.entries.lock();
            if index > entries.len() {
                return Err(VeneerError::IndexOutOfBounds {
                    index,
                    len: entries.len(),
                });
            }
            entries.insert(index, text.to_string());
        }
        self.shift_selection(index, 1)?;
        self.sync()
    }

    /// Insert an entry keeping the list in ascending order.
    ///
    /// Only meaningful if every entry was added this way. Duplicates are
    /// allowed.
    pub fn insert_alpha(&self, text: &str) -> Result<()> {
        let index = alpha_position(&self.entries.lock(), text);
        self.insert_text(index, text)
    }

    /// Remove the first entry equal to `text`. Returns `false` if there is
    /// none.
    pub fn delete_alpha(&self, text: &str) -> Result<bool> {
        self.base.ensure_alive()?;
        let removed = {
            let mut entries = self.entries.lock();
            let position = entries.iter().position(|entry| entry == text);
            if let Some(index) = position {
                entries.remove(index);
            }
            position
        };
        let Some(index) = removed else {
            return Ok(false);
        };

        let active = self.get_index()?;
        if active == Some(index) {
            self.base.set(Property::ActiveIndex, PropValue::Int(-1))?;
        } else {
            self.shift_selection(index + 1, -1)?;
        }
        self.sync()?;
        Ok(true)
    }

    /// The entry at `index`.
    pub fn get_alpha(&self, index: usize) -> Result<String> {
        self.base.ensure_alive()?;
        let entries = self.entries.lock();
        entries
            .get(index)
            .cloned()
            .ok_or(VeneerError::IndexOutOfBounds {
                index,
                len: entries.len(),
            })
    }

    /// Snapshot of every entry, in display order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove every entry and clear the selection.
    pub fn clear(&self) -> Result<()> {
        self.base.ensure_alive()?;
        self.entries.lock().clear();
        self.base.set(Property::ActiveIndex, PropValue::Int(-1))?;
        self.sync()
    }

    /// Select the first entry equal to `text`. Returns `false` if there is
    /// none.
    pub fn show_text(&self, text: &str) -> Result<bool> {
        let position = self.entries.lock().iter().position(|entry| entry == text);
        match position {
            Some(index) => {
                self.set_index(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Select the entry at `index`, firing `activated` if the selection
    /// changed.
    pub fn set_index(&self, index: usize) -> Result<()> {
        self.base.ensure_alive()?;
        let len = self.len();
        if index >= len {
            return Err(VeneerError::IndexOutOfBounds { index, len });
        }
        self.base.set(Property::ActiveIndex, PropValue::Int(index as i64))
    }

    /// The selected index, if any.
    pub fn get_index(&self) -> Result<Option<usize>> {
        let index = self
            .base
            .get(Property::ActiveIndex)?
            .and_then(|v| v.as_int())
            .unwrap_or(-1);
        Ok(usize::try_from(index).ok())
    }

    /// Text of the selected entry, if any.
    pub fn get_text(&self) -> Result<Option<String>> {
        Ok(self
            .get_index()?
            .and_then(|index| self.entries.lock().get(index).cloned()))
    }

    fn sync(&self) -> Result<()> {
        let items = self.entries.lock().clone();
        self.base.set(Property::Items, PropValue::List(items))
    }

    /// Keep the selection on the same entry after entries at or after
    /// `from` moved by `delta`. Listeners are not told: the selected text
    /// did not change.
    fn shift_selection(&self, from: usize, delta: i64) -> Result<()> {
        let Some(active) = self.get_index()? else {
            return Ok(());
        };
        if active < from {
            return Ok(());
        }
        let callbacks = self.base.callbacks();
        let was_blocked = callbacks.is_blocked();
        callbacks.set_blocked(true);
        let result = self
            .base
            .set(Property::ActiveIndex, PropValue::Int(active as i64 + delta));
        callbacks.set_blocked(was_blocked);
        result
    }
}

impl_widget!(ComboBox, base);
