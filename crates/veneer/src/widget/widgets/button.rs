//! Push buttons and two-state buttons.
//!
//! - [`Button`] fires `activated` with no payload when clicked.
//! - [`ToggleButton`], [`CheckBox`] and [`RadioButton`] fire `activated`
//!   with the new state as [`EventArgs::Bool`] whenever the state changes,
//!   whether by the user or through [`set_state`](CheckBox::set_state).

use std::sync::Arc;

use veneer_core::EventArgs;

use crate::backend::{Backend, NativeEvent, NativeKind, NativeSignal, PropValue, Property};
use crate::error::Result;
use crate::widget::{WidgetBase, events, impl_widget, redirect};

fn labelled(backend: &Backend, kind: NativeKind, text: &str, type_name: &'static str) -> Arc<WidgetBase> {
    let base = WidgetBase::new(backend, kind, type_name);
    base.init(Property::Label, PropValue::Text(text.to_string()));
    base.enable_events(&[events::ACTIVATED]);
    base
}

fn connect_toggled(base: &Arc<WidgetBase>) {
    let result = base.connect(
        NativeSignal::Toggled,
        redirect(base, |base, event| {
            let state = matches!(event, NativeEvent::Toggled(true));
            base.fire(events::ACTIVATED, EventArgs::Bool(state))
        }),
    );
    base.check_init(result);
}

/// A push button.
#[derive(Clone)]
pub struct Button {
    base: Arc<WidgetBase>,
}

impl Button {
    /// Create a button with a text label.
    pub fn new(backend: &Backend, text: &str) -> Self {
        let base = labelled(backend, NativeKind::Button, text, "Button");
        let result = base.connect(
            NativeSignal::Clicked,
            redirect(&base, |base, _| base.fire(events::ACTIVATED, EventArgs::None)),
        );
        base.check_init(result);
        Self { base }
    }

    /// Click the button programmatically.
    pub fn click(&self) -> Result<()> {
        self.base.ensure_alive()?;
        self.base.backend().activate(self.base.native_id())?;
        Ok(())
    }

    /// The button label.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Label)
    }

    /// Replace the button label.
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.base.set(Property::Label, PropValue::Text(text.to_string()))
    }

    /// Show an icon next to the label.
    pub fn set_icon(&self, source: &str) -> Result<()> {
        self.base.set(Property::Image, PropValue::Text(source.to_string()))
    }
}

impl_widget!(Button, base);

macro_rules! two_state_button {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            base: Arc<WidgetBase>,
        }

        impl $name {
            /// Create the button with a text label. It starts inactive.
            pub fn new(backend: &Backend, text: &str) -> Self {
                let base = labelled(backend, $kind, text, stringify!($name));
                connect_toggled(&base);
                Self { base }
            }

            /// Set the state, firing `activated` if it changed.
            pub fn set_state(&self, active: bool) -> Result<()> {
                self.base.set(Property::Active, PropValue::Bool(active))
            }

            /// The current state.
            pub fn get_state(&self) -> Result<bool> {
                self.base.get_bool(Property::Active)
            }

            /// The button label.
            pub fn get_text(&self) -> Result<String> {
                self.base.get_text_on(self.base.native_id(), Property::Label)
            }
        }

        impl_widget!($name, base);
    };
}

two_state_button!(
    /// A button that stays pressed until clicked again.
    ToggleButton,
    NativeKind::ToggleButton
);

two_state_button!(
    /// A check box with a label.
    CheckBox,
    NativeKind::CheckButton
);

/// A radio button. Buttons joined into one group are mutually exclusive.
#[derive(Clone)]
pub struct RadioButton {
    base: Arc<WidgetBase>,
}

impl RadioButton {
    /// Create a radio button, optionally joining the group of `group`.
    pub fn new(backend: &Backend, text: &str, group: Option<&RadioButton>) -> Self {
        let base = labelled(backend, NativeKind::RadioButton, text, "RadioButton");
        if let Some(peer) = group {
            base.init(Property::Group, PropValue::Widget(peer.base.native_id()));
        }
        connect_toggled(&base);
        Self { base }
    }

    /// Set the state. Activating a grouped button deactivates its peers.
    pub fn set_state(&self, active: bool) -> Result<()> {
        self.base.set(Property::Active, PropValue::Bool(active))
    }

    /// The current state.
    pub fn get_state(&self) -> Result<bool> {
        self.base.get_bool(Property::Active)
    }

    /// The button label.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Label)
    }
}

impl_widget!(RadioButton, base);
