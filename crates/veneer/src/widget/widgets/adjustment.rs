//! Bounded numeric value shared by spin boxes, sliders and scroll bars.
//!
//! Values outside `[lower, upper]` are rejected with
//! [`VeneerError::Range`]; they are never clamped silently. Changing the
//! limits is the one place a value moves on its own: the current value is
//! clamped into the new bounds.

use std::sync::Arc;

use veneer_core::EventArgs;

use crate::backend::{NativeEvent, NativeSignal, PropValue, Property};
use crate::error::{Result, VeneerError};
use crate::widget::{WidgetBase, redirect};

/// Round `value` to `digits` decimal places.
pub(crate) fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits.min(15) as i32);
    (value * scale).round() / scale
}

/// Accessor for the range properties of one native widget.
pub(crate) struct Adjustment<'a> {
    base: &'a WidgetBase,
}

impl<'a> Adjustment<'a> {
    pub(crate) fn of(base: &'a WidgetBase) -> Self {
        Self { base }
    }

    /// Validate and store bounds, step and precision, then clamp the value.
    pub(crate) fn configure(&self, lower: f64, upper: f64, step: f64, digits: u32) -> Result<()> {
        self.base.set(Property::Digits, PropValue::Int(i64::from(digits)))?;
        self.set_limits(lower, upper, step)
    }

    /// Current bounds as `(lower, upper)`.
    pub(crate) fn bounds(&self) -> Result<(f64, f64)> {
        Ok((self.float(Property::Lower)?, self.float(Property::Upper)?))
    }

    /// The step increment.
    pub(crate) fn step(&self) -> Result<f64> {
        self.float(Property::Step)
    }

    /// Number of decimal places.
    pub(crate) fn digits(&self) -> Result<u32> {
        let digits = self
            .base
            .get(Property::Digits)?
            .and_then(|v| v.as_int())
            .unwrap_or(0);
        Ok(u32::try_from(digits).unwrap_or(0))
    }

    /// Change the precision and re-round the current value.
    pub(crate) fn set_digits(&self, digits: u32) -> Result<()> {
        self.base.set(Property::Digits, PropValue::Int(i64::from(digits)))?;
        let value = self.value()?;
        self.base
            .set(Property::Value, PropValue::Float(round_to(value, digits)))
    }

    /// The current value.
    pub(crate) fn value(&self) -> Result<f64> {
        self.float(Property::Value)
    }

    /// Set the value, rounded to the configured precision.
    pub(crate) fn set_value(&self, value: f64) -> Result<()> {
        let (lower, upper) = self.bounds()?;
        if !(lower..=upper).contains(&value) {
            return Err(VeneerError::range(value, lower, upper));
        }
        let digits = self.digits()?;
        self.base
            .set(Property::Value, PropValue::Float(round_to(value, digits)))
    }

    /// Reset bounds and step, clamping the current value into the new
    /// bounds.
    pub(crate) fn set_limits(&self, lower: f64, upper: f64, step: f64) -> Result<()> {
        if !(lower <= upper) {
            return Err(VeneerError::invalid_argument(
                format!("{lower}..{upper}"),
                "lower bound must not exceed upper bound",
            ));
        }
        if !(step > 0.0) {
            return Err(VeneerError::invalid_argument(
                step.to_string(),
                "step must be positive",
            ));
        }
        self.base.set(Property::Lower, PropValue::Float(lower))?;
        self.base.set(Property::Upper, PropValue::Float(upper))?;
        self.base.set(Property::Step, PropValue::Float(step))?;

        let digits = self.digits()?;
        let clamped = round_to(self.value()?.clamp(lower, upper), digits);
        self.base.set(Property::Value, PropValue::Float(clamped))
    }

    fn float(&self, prop: Property) -> Result<f64> {
        Ok(self.base.get(prop)?.and_then(|v| v.as_float()).unwrap_or(0.0))
    }
}

/// Forward native value changes to `event`, rounded to the precision
/// configured at the time of the change.
pub(crate) fn connect_value_changed(base: &Arc<WidgetBase>, event: &'static str) {
    base.enable_events(&[event]);
    let result = base.connect(
        NativeSignal::ValueChanged,
        redirect(base, move |base, native| {
            let NativeEvent::Value(value) = native else {
                return Ok(());
            };
            let digits = Adjustment::of(base).digits()?;
            base.fire(event, EventArgs::Value(round_to(*value, digits)))
        }),
    );
    base.check_init(result);
}
