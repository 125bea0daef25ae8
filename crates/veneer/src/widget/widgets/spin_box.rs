//! Numeric spin box.

use std::sync::Arc;

use crate::backend::{Backend, NativeKind};
use crate::error::Result;
use crate::widget::{WidgetBase, events, impl_widget};

use super::adjustment::{Adjustment, connect_value_changed};

/// A numeric entry with up/down arrows.
///
/// Fires `value-changed` with [`EventArgs::Value`](veneer_core::EventArgs)
/// rounded to the configured number of decimals. With zero decimals the
/// spin box behaves as an integer control.
#[derive(Clone)]
pub struct SpinBox {
    base: Arc<WidgetBase>,
}

impl SpinBox {
    /// Create a spin box over `[min, max]` moving by `step`, showing
    /// `digits` decimals. The value starts at `min`.
    pub fn new(backend: &Backend, min: f64, max: f64, step: f64, digits: u32) -> Result<Self> {
        let base = WidgetBase::new(backend, NativeKind::SpinButton, "SpinBox");
        let spin = Self { base };
        if let Err(err) = Adjustment::of(&spin.base).configure(min, max, step, digits) {
            spin.base.check_init(spin.base.dispose());
            return Err(err);
        }
        connect_value_changed(&spin.base, events::VALUE_CHANGED);
        Ok(spin)
    }

    /// Create an integer spin box.
    pub fn integer(backend: &Backend, min: i64, max: i64, step: i64) -> Result<Self> {
        Self::new(backend, min as f64, max as f64, step as f64, 0)
    }

    /// Set the value, firing `value-changed` if it changed.
    ///
    /// Fails with [`VeneerError::Range`](crate::VeneerError::Range) outside
    /// the configured bounds.
    pub fn set_value(&self, value: f64) -> Result<()> {
        Adjustment::of(&self.base).set_value(value)
    }

    /// The current value.
    pub fn get_value(&self) -> Result<f64> {
        Adjustment::of(&self.base).value()
    }

    /// The current value rounded to an integer.
    pub fn get_value_as_int(&self) -> Result<i64> {
        Ok(self.get_value()?.round() as i64)
    }

    /// Reset the bounds and step, clamping the current value.
    pub fn set_limits(&self, min: f64, max: f64, step: f64) -> Result<()> {
        Adjustment::of(&self.base).set_limits(min, max, step)
    }

    /// Current bounds as `(min, max)`.
    pub fn get_limits(&self) -> Result<(f64, f64)> {
        Adjustment::of(&self.base).bounds()
    }

    /// The step increment.
    pub fn get_step(&self) -> Result<f64> {
        Adjustment::of(&self.base).step()
    }

    /// Change the number of decimals shown.
    pub fn set_decimals(&self, digits: u32) -> Result<()> {
        Adjustment::of(&self.base).set_digits(digits)
    }

    /// The number of decimals shown.
    pub fn get_decimals(&self) -> Result<u32> {
        Adjustment::of(&self.base).digits()
    }
}

impl_widget!(SpinBox, base);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HeadlessBackend, PropValue, Property};
    use crate::error::VeneerError;
    use crate::widget::Widget;
    use parking_lot::Mutex;
    use veneer_core::EventArgs;

    fn setup() -> (Arc<HeadlessBackend>, Backend) {
        let headless = Arc::new(HeadlessBackend::new());
        let backend: Backend = headless.clone();
        (headless, backend)
    }

    fn record(spin: &SpinBox) -> Arc<Mutex<Vec<EventArgs>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        spin.add_callback(events::VALUE_CHANGED, move |args| {
            seen_clone.lock().push(args.clone());
            Ok(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn test_value_changed_uses_precision() {
        let (headless, backend) = setup();
        let spin = SpinBox::new(&backend, 0.0, 10.0, 0.5, 1).unwrap();
        let seen = record(&spin);

        spin.set_value(2.25).unwrap();
        headless
            .user_set(spin.native_id(), Property::Value, PropValue::Float(7.349))
            .unwrap();

        assert_eq!(*seen.lock(), vec![EventArgs::Value(2.3), EventArgs::Value(7.3)]);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let (_headless, backend) = setup();
        let spin = SpinBox::integer(&backend, 1, 5, 1).unwrap();
        let seen = record(&spin);

        let err = spin.set_value(6.0).unwrap_err();
        assert!(matches!(err, VeneerError::Range { min, max, .. } if min == 1.0 && max == 5.0));
        assert_eq!(spin.get_value().unwrap(), 1.0);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_set_limits_clamps_current_value() {
        let (_headless, backend) = setup();
        let spin = SpinBox::new(&backend, 0.0, 100.0, 1.0, 0).unwrap();
        spin.set_value(80.0).unwrap();
        let seen = record(&spin);

        spin.set_limits(0.0, 50.0, 5.0).unwrap();

        assert_eq!(spin.get_value().unwrap(), 50.0);
        assert_eq!(spin.get_limits().unwrap(), (0.0, 50.0));
        assert_eq!(spin.get_step().unwrap(), 5.0);
        assert_eq!(*seen.lock(), vec![EventArgs::Value(50.0)]);
    }

    #[test]
    fn test_invalid_limits() {
        let (headless, backend) = setup();
        assert!(SpinBox::new(&backend, 5.0, 1.0, 1.0, 0).is_err());
        assert_eq!(headless.widget_count(), 0);

        let spin = SpinBox::integer(&backend, 0, 10, 1).unwrap();
        assert!(matches!(
            spin.set_limits(0.0, 10.0, 0.0),
            Err(VeneerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_decimals() {
        let (_headless, backend) = setup();
        let spin = SpinBox::new(&backend, 0.0, 1.0, 0.001, 3).unwrap();
        spin.set_value(0.1234).unwrap();
        assert_eq!(spin.get_value().unwrap(), 0.123);

        spin.set_decimals(1).unwrap();
        assert_eq!(spin.get_decimals().unwrap(), 1);
        assert_eq!(spin.get_value().unwrap(), 0.1);
        assert_eq!(spin.get_value_as_int().unwrap(), 0);
    }
}
