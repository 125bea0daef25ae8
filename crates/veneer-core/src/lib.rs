//! Core systems for Veneer.
//!
//! This crate provides the toolkit-independent pieces of the Veneer widget
//! wrapper layer:
//!
//! - **Callbacks**: Named-event registry every wrapped control composes
//! - **Timers**: One-shot timers over a caller-driven clock
//! - **Logging**: `tracing` targets and tree-formatting options
//!
//! # Callback Example
//!
//! ```
//! use veneer_core::{Callbacks, EventArgs};
//!
//! let callbacks = Callbacks::new();
//! callbacks.enable_event("value-changed");
//!
//! let id = callbacks
//!     .register_listener("value-changed", |args| {
//!         println!("new value: {:?}", args.as_value());
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! callbacks.fire_event("value-changed", EventArgs::Value(0.5)).unwrap();
//! callbacks.remove_listener(id);
//! ```

pub mod callbacks;
mod error;
pub mod logging;
pub mod timer;

pub use callbacks::{Callbacks, EventArgs, ListenerId};
pub use error::{CallbackError, ListenerError, TimerError};
pub use logging::{TreeFormatOptions, TreeStyle};
pub use timer::{TimerId, TimerManager};
