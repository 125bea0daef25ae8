//! Widget system for Veneer.
//!
//! This module provides the wrapper architecture shared by every control:
//!
//! - [`Widget`] trait: geometry, visibility, enablement, tooltip, destruction
//! - [`Container`] trait: ordered child ownership with add/remove/remove-all
//! - [`WidgetBase`]: native handle ownership, event registry, child list
//!
//! # Overview
//!
//! Each control is a cheap, clonable handle. Constructing one creates exactly
//! one native widget, connects the native signal it cares about to a
//! *redirect shim*, and enables the events it publishes. The shim translates
//! the native payload into [`EventArgs`](veneer_core::EventArgs) and fires
//! the control's event registry.
//!
//! ```
//! use std::sync::Arc;
//! use veneer::backend::{Backend, HeadlessBackend};
//! use veneer::{events, Button, Container, VBox, Widget};
//!
//! let headless = Arc::new(HeadlessBackend::new());
//! let backend: Backend = headless.clone();
//!
//! let vbox = VBox::new(&backend);
//! let button = Button::new(&backend, "Apply");
//! button
//!     .add_callback(events::ACTIVATED, |_| {
//!         println!("apply!");
//!         Ok(())
//!     })
//!     .unwrap();
//! vbox.add_widget(&button).unwrap();
//!
//! headless.click(button.native_id()).unwrap();
//! ```

mod base;
mod geometry;
mod traits;
pub mod widgets;

pub use base::WidgetBase;
pub(crate) use base::redirect;
pub use geometry::{Font, Justify, Orientation, TabPosition};
pub(crate) use traits::{attach_child, impl_widget};
pub use traits::{Container, Widget, Wrapped};

/// Event names published by the wrapped controls.
pub mod events {
    /// Buttons, entries, labels, images, combo boxes, scroll bars, menu actions.
    pub const ACTIVATED: &str = "activated";
    /// Spin boxes and sliders.
    pub const VALUE_CHANGED: &str = "value-changed";
    /// Tab and stack widgets.
    pub const PAGE_SWITCH: &str = "page-switch";
    /// Tree views.
    pub const SELECTED: &str = "selected";
    /// Top-level windows.
    pub const CLOSED: &str = "closed";
    /// Scroll areas.
    pub const CONFIGURE: &str = "configure";
}
