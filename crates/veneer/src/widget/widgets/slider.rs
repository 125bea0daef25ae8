//! Sliders and scroll bars.

use std::sync::Arc;

use crate::backend::{Backend, NativeKind, PropValue, Property};
use crate::error::Result;
use crate::widget::{Orientation, WidgetBase, events, impl_widget};

use super::adjustment::{Adjustment, connect_value_changed};

fn ranged(
    backend: &Backend,
    kind: NativeKind,
    type_name: &'static str,
    (min, max, step, digits): (f64, f64, f64, u32),
) -> Result<Arc<WidgetBase>> {
    let base = WidgetBase::new(backend, kind, type_name);
    if let Err(err) = Adjustment::of(&base).configure(min, max, step, digits) {
        base.check_init(base.dispose());
        return Err(err);
    }
    Ok(base)
}

/// A slider over a numeric range.
///
/// Fires `value-changed` with the rounded value whenever it changes.
#[derive(Clone)]
pub struct Slider {
    base: Arc<WidgetBase>,
}

impl Slider {
    /// Create a slider over `[min, max]` moving by `step`, showing
    /// `digits` decimals. The value starts at `min`.
    pub fn new(
        backend: &Backend,
        orientation: Orientation,
        min: f64,
        max: f64,
        step: f64,
        digits: u32,
    ) -> Result<Self> {
        let base = ranged(
            backend,
            NativeKind::Scale(orientation),
            "Slider",
            (min, max, step, digits),
        )?;
        connect_value_changed(&base, events::VALUE_CHANGED);
        Ok(Self { base })
    }

    /// Set the value. Fails with
    /// [`VeneerError::Range`](crate::VeneerError::Range) outside the bounds.
    pub fn set_value(&self, value: f64) -> Result<()> {
        Adjustment::of(&self.base).set_value(value)
    }

    /// The current value.
    pub fn get_value(&self) -> Result<f64> {
        Adjustment::of(&self.base).value()
    }

    /// Reset the bounds and step, clamping the current value.
    pub fn set_limits(&self, min: f64, max: f64, step: f64) -> Result<()> {
        Adjustment::of(&self.base).set_limits(min, max, step)
    }

    /// Current bounds as `(min, max)`.
    pub fn get_limits(&self) -> Result<(f64, f64)> {
        Adjustment::of(&self.base).bounds()
    }

    /// Change the number of decimals.
    pub fn set_decimals(&self, digits: u32) -> Result<()> {
        Adjustment::of(&self.base).set_digits(digits)
    }

    /// With tracking on, the value updates continuously while dragging;
    /// otherwise only when the drag ends.
    pub fn set_tracking(&self, continuous: bool) -> Result<()> {
        self.base.set(Property::Tracking, PropValue::Bool(continuous))
    }
}

impl_widget!(Slider, base);

/// A scroll bar.
///
/// Fires `activated` with the new position as
/// [`EventArgs::Value`](veneer_core::EventArgs::Value).
#[derive(Clone)]
pub struct ScrollBar {
    base: Arc<WidgetBase>,
}

impl ScrollBar {
    /// Create a scroll bar over `[min, max]` moving by `step`.
    pub fn new(backend: &Backend, orientation: Orientation, min: f64, max: f64, step: f64) -> Result<Self> {
        let base = ranged(
            backend,
            NativeKind::ScrollBar(orientation),
            "ScrollBar",
            (min, max, step, 0),
        )?;
        connect_value_changed(&base, events::ACTIVATED);
        Ok(Self { base })
    }

    /// Move the scroll bar. Fails with
    /// [`VeneerError::Range`](crate::VeneerError::Range) outside the bounds.
    pub fn set_value(&self, value: f64) -> Result<()> {
        Adjustment::of(&self.base).set_value(value)
    }

    /// The current position.
    pub fn get_value(&self) -> Result<f64> {
        Adjustment::of(&self.base).value()
    }

    /// Reset the bounds and step, clamping the current position.
    pub fn set_limits(&self, min: f64, max: f64, step: f64) -> Result<()> {
        Adjustment::of(&self.base).set_limits(min, max, step)
    }
}

impl_widget!(ScrollBar, base);
