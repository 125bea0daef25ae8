//! Progress indicator.

use std::sync::Arc;

use crate::backend::{Backend, NativeKind, PropValue, Property};
use crate::error::{Result, VeneerError};
use crate::widget::{WidgetBase, impl_widget};

/// Percentage text shown for `fraction`, with two decimals.
pub fn percent_text(fraction: f64) -> String {
    format!("{:.2} %", fraction * 100.0)
}

/// A progress bar showing a fraction and its percentage.
#[derive(Clone)]
pub struct ProgressBar {
    base: Arc<WidgetBase>,
}

impl ProgressBar {
    /// Create an empty progress bar.
    pub fn new(backend: &Backend) -> Self {
        let base = WidgetBase::new(backend, NativeKind::ProgressBar, "ProgressBar");
        base.init(Property::ShowText, PropValue::Bool(true));
        base.init(Property::Text, PropValue::Text(percent_text(0.0)));
        Self { base }
    }

    /// Show `fraction` of the work as done.
    ///
    /// Fails with [`VeneerError::Range`] unless `fraction` is in
    /// `[0.0, 1.0]`.
    pub fn set_value(&self, fraction: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(VeneerError::range(fraction, 0.0, 1.0));
        }
        self.base.set(Property::Fraction, PropValue::Float(fraction))?;
        self.base.set(Property::Text, PropValue::Text(percent_text(fraction)))
    }

    /// The fraction shown.
    pub fn get_value(&self) -> Result<f64> {
        Ok(self
            .base
            .get(Property::Fraction)?
            .and_then(|v| v.as_float())
            .unwrap_or(0.0))
    }

    /// The percentage text shown.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Text)
    }
}

impl_widget!(ProgressBar, base);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;

    #[test]
    fn test_percent_text() {
        assert_eq!(percent_text(0.0), "0.00 %");
        assert_eq!(percent_text(0.256), "25.60 %");
        assert_eq!(percent_text(1.0), "100.00 %");
    }

    #[test]
    fn test_set_value() {
        let backend: Backend = Arc::new(HeadlessBackend::new());
        let bar = ProgressBar::new(&backend);

        bar.set_value(0.5).unwrap();
        assert_eq!(bar.get_value().unwrap(), 0.5);
        assert_eq!(bar.get_text().unwrap(), "50.00 %");

        assert!(matches!(bar.set_value(1.01), Err(VeneerError::Range { .. })));
        assert!(matches!(bar.set_value(-0.1), Err(VeneerError::Range { .. })));
        assert_eq!(bar.get_value().unwrap(), 0.5);
    }
}
