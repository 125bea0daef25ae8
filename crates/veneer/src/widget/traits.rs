//! Core widget trait definitions.
//!
//! - [`Widget`] - Base trait for every wrapped control
//! - [`Container`] - Widgets that own an ordered list of children

use std::any::Any;
use std::sync::Arc;

use veneer_core::logging::targets;
use veneer_core::{Callbacks, EventArgs, ListenerError, ListenerId};

use crate::backend::{NativeId, PropValue, Property};
use crate::error::Result;

use super::base::WidgetBase;

/// The base trait for all wrapped controls.
///
/// Implementors are cheap, clonable handles: cloning a widget yields another
/// handle to the same native widget. Every operation fails with
/// [`VeneerError::Disposed`](crate::VeneerError::Disposed) once the widget
/// was deleted.
pub trait Widget: Send + Sync + 'static {
    /// Get a reference to the widget base.
    fn widget_base(&self) -> &Arc<WidgetBase>;

    /// Upcast for downcasting owned children back to their concrete type.
    fn as_any(&self) -> &dyn Any;

    /// The native widget handle.
    fn native_id(&self) -> NativeId {
        self.widget_base().native_id()
    }

    /// The event registry of this widget.
    fn callbacks(&self) -> &Callbacks {
        self.widget_base().callbacks()
    }

    /// Attach a listener to one of this widget's events.
    fn add_callback<F>(&self, event: &str, listener: F) -> Result<ListenerId>
    where
        Self: Sized,
        F: Fn(&EventArgs) -> std::result::Result<(), ListenerError> + Send + Sync + 'static,
    {
        Ok(self.callbacks().register_listener(event, listener)?)
    }

    /// Fire one of this widget's events with `args`.
    fn make_callback(&self, event: &str, args: EventArgs) -> Result<()> {
        self.widget_base().ensure_alive()?;
        Ok(self.callbacks().fire_event(event, args)?)
    }

    /// The current allocation as `(width, height)`.
    fn get_size(&self) -> Result<(u32, u32)> {
        let base = self.widget_base();
        base.ensure_alive()?;
        Ok(base.backend().allocation(base.native_id())?)
    }

    /// Request a size for the widget.
    fn resize(&self, width: u32, height: u32) -> Result<()> {
        self.widget_base()
            .set(Property::SizeRequest, PropValue::Size(width, height))
    }

    /// Make the widget visible.
    fn show(&self) -> Result<()> {
        self.widget_base().set(Property::Visible, PropValue::Bool(true))
    }

    /// Hide the widget.
    fn hide(&self) -> Result<()> {
        self.widget_base().set(Property::Visible, PropValue::Bool(false))
    }

    /// Returns `true` if the widget is visible.
    fn is_visible(&self) -> Result<bool> {
        self.widget_base().get_bool(Property::Visible)
    }

    /// Enable or disable user interaction.
    fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.widget_base()
            .set(Property::Sensitive, PropValue::Bool(enabled))
    }

    /// Returns `true` if the widget accepts user interaction.
    fn is_enabled(&self) -> Result<bool> {
        self.widget_base().get_bool(Property::Sensitive)
    }

    /// Set the tooltip text.
    fn set_tooltip(&self, text: &str) -> Result<()> {
        self.widget_base()
            .set(Property::Tooltip, PropValue::Text(text.to_string()))
    }

    /// Destroy the native widget and every child it owns.
    fn delete(&self) -> Result<()> {
        self.widget_base().dispose()
    }

    /// Returns `true` once the widget was deleted.
    fn is_disposed(&self) -> bool {
        self.widget_base().is_disposed()
    }

    /// Wrapper type name used in logs and debug trees.
    fn type_name(&self) -> &'static str {
        self.widget_base().type_name()
    }
}

/// Widgets that own an ordered sequence of children.
///
/// Each child has exactly one owner. Re-parenting requires an explicit
/// [`remove`](Container::remove) from the old container first. Every mutation
/// shows the container's full native subtree afterwards.
pub trait Container: Widget {
    /// Attach an adopted child to the native container.
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()>;

    /// Detach a released child from the native container.
    fn unpack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        let base = self.widget_base();
        base.backend().unpack(child.native_id())?;
        Ok(())
    }

    /// Single-slot containers replace their child instead of appending.
    fn replaces_child(&self) -> bool {
        false
    }

    /// Add a child (or replace the child, for single-slot containers).
    fn add_widget<W: Widget + Clone>(&self, child: &W) -> Result<()>
    where
        Self: Sized,
    {
        self.insert_child(Arc::new(child.clone()))
    }

    /// Type-erased form of [`add_widget`](Container::add_widget).
    fn insert_child(&self, child: Arc<dyn Widget>) -> Result<()> {
        attach_child(self, child, |child| self.pack_child(child))
    }

    /// Remove `child`. Fails with
    /// [`VeneerError::NotAChild`](crate::VeneerError::NotAChild) if this
    /// container does not own it.
    fn remove(&self, child: &dyn Widget) -> Result<()> {
        let base = self.widget_base();
        base.ensure_alive()?;
        let child = base.release(child.native_id())?;
        self.unpack_child(&child)?;

        tracing::debug!(
            target: targets::CONTAINER,
            container = base.type_name(),
            child = child.type_name(),
            count = base.child_count(),
            "removed child"
        );
        base.show_all()
    }

    /// Remove every child, in current order.
    fn remove_all(&self) -> Result<()> {
        self.widget_base().ensure_alive()?;
        for child in self.get_children() {
            self.remove(child.as_ref())?;
        }
        Ok(())
    }

    /// Snapshot of the owned children, in insertion order.
    fn get_children(&self) -> Vec<Arc<dyn Widget>> {
        self.widget_base().children()
    }

    /// Number of owned children.
    fn num_children(&self) -> usize {
        self.widget_base().child_count()
    }

    /// Set the border around the children, in pixels.
    fn set_border_width(&self, pixels: u32) -> Result<()> {
        self.widget_base()
            .set(Property::BorderWidth, PropValue::Int(i64::from(pixels)))
    }

    /// Set the margins around the children.
    ///
    /// Toolkits with a single border width use `left` for every edge.
    fn set_margins(&self, left: u32, _right: u32, _top: u32, _bottom: u32) -> Result<()> {
        self.set_border_width(left)
    }
}

/// Adopt `child` into `container` and attach it natively with `pack`.
///
/// Single-slot containers drop their current child first, once `child` is
/// known to be adoptable. If `pack` fails
/// the child is released again, so ownership never diverges from the native
/// tree.
pub(crate) fn attach_child<C, F>(container: &C, child: Arc<dyn Widget>, pack: F) -> Result<()>
where
    C: Container + ?Sized,
    F: FnOnce(&Arc<dyn Widget>) -> Result<()>,
{
    let base = container.widget_base();
    base.ensure_alive()?;
    child.widget_base().ensure_alive()?;
    if container.replaces_child() {
        base.check_adoptable(child.widget_base(), true)?;
        container.remove_all()?;
    }

    base.adopt(Arc::clone(&child))?;
    if let Err(err) = pack(&child) {
        base.release(child.native_id())?;
        return Err(err);
    }

    tracing::debug!(
        target: targets::CONTAINER,
        container = base.type_name(),
        child = child.type_name(),
        count = base.child_count(),
        "added child"
    );
    base.show_all()
}

/// Implements [`Widget`] for a handle whose base lives at `$($field).+`.
macro_rules! impl_widget {
    ($ty:ty, $($field:ident).+) => {
        impl $crate::widget::Widget for $ty {
            fn widget_base(&self) -> &::std::sync::Arc<$crate::widget::WidgetBase> {
                &self.$($field).+
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

pub(crate) use impl_widget;

/// A widget handle around a native widget that has no dedicated wrapper.
#[derive(Clone)]
pub struct Wrapped {
    base: Arc<WidgetBase>,
}

impl Wrapped {
    pub(crate) fn new(base: Arc<WidgetBase>) -> Self {
        Self { base }
    }
}

impl_widget!(Wrapped, base);
