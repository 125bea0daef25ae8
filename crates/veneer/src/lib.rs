//! Veneer - a toolkit-neutral wrapper layer over native GUI widget sets.
//!
//! Applications address buttons, text fields, containers, dialogs and
//! top-level windows through uniform handles, without depending on the
//! toolkit behind them. The toolkit is reached only through the
//! [`NativeBackend`](backend::NativeBackend) capability trait;
//! [`HeadlessBackend`](backend::HeadlessBackend) implements it in memory.
//!
//! This crate re-exports [`veneer_core`], so callbacks, event payloads and
//! logging targets are available from here too.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use veneer::backend::{Backend, HeadlessBackend};
//! use veneer::{events, Application, Button, Container, VBox, VeneerConfig, Widget};
//!
//! let headless = Arc::new(HeadlessBackend::new());
//! let backend: Backend = headless.clone();
//! let app = Application::new(backend.clone(), VeneerConfig::default());
//!
//! let window = app.make_window("Viewer", None).unwrap();
//! let body = VBox::new(&backend);
//! let quit = Button::new(&backend, "Quit");
//! let app_clone = app.clone();
//! quit.add_callback(events::ACTIVATED, move |_| {
//!     app_clone.process_end();
//!     Ok(())
//! })
//! .unwrap();
//! body.add_widget(&quit).unwrap();
//! window.set_widget(&body).unwrap();
//! window.show_all().unwrap();
//!
//! headless.click(quit.native_id()).unwrap();
//! assert!(headless.quit_requested());
//! ```

pub use veneer_core::*;

mod application;
pub mod backend;
mod config;
pub mod debug;
mod error;
pub mod factory;
mod file_dialog;
pub mod model;
pub mod widget;

pub use application::{Application, WeakApplication};
pub use config::{ScreenSize, TreeViewDefaults, VeneerConfig};
pub use error::{Result, VeneerError};
pub use file_dialog::SaveDialog;
pub use widget::widgets::*;
pub use widget::{Container, Font, Justify, Orientation, TabPosition, Widget, WidgetBase, Wrapped, events};
