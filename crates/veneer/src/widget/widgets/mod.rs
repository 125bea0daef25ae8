//! Concrete wrapped controls.
//!
//! # Leaf controls
//!
//! - [`Button`], [`ToggleButton`], [`CheckBox`], [`RadioButton`]
//! - [`TextEntry`], [`TextEntrySet`], [`TextArea`]
//! - [`Label`], [`Image`]
//! - [`ComboBox`]
//! - [`SpinBox`], [`Slider`], [`ScrollBar`]
//! - [`ProgressBar`], [`StatusBar`]
//! - [`TreeView`]
//!
//! # Containers
//!
//! - [`HBox`], [`VBox`], [`GridBox`]
//! - [`Frame`], [`Expander`], [`ScrollArea`]
//! - [`TabWidget`], [`StackWidget`]
//! - [`Splitter`]
//! - [`Toolbar`], [`Menu`], [`MenuBar`]
//! - [`TopLevel`]

mod adjustment;
mod box_layout;
mod button;
mod combo_box;
mod frame;
mod grid_box;
mod image;
mod label;
mod menu;
mod progress_bar;
mod scroll_area;
mod slider;
mod spin_box;
mod splitter;
mod status_bar;
mod tab_widget;
mod text_area;
mod text_entry;
mod tool_bar;
mod top_level;
mod tree_view;

pub use box_layout::{HBox, VBox};
pub use button::{Button, CheckBox, RadioButton, ToggleButton};
pub use combo_box::ComboBox;
pub use frame::{Expander, Frame};
pub use grid_box::GridBox;
pub use image::Image;
pub use label::{Label, LabelStyle};
pub use menu::{Menu, MenuAction, MenuBar};
pub use progress_bar::{ProgressBar, percent_text};
pub use scroll_area::ScrollArea;
pub use slider::{ScrollBar, Slider};
pub use spin_box::SpinBox;
pub use splitter::Splitter;
pub use status_bar::StatusBar;
pub use tab_widget::{StackWidget, TabWidget};
pub use text_area::{TextArea, line_count};
pub use text_entry::{TextEntry, TextEntrySet};
pub use tool_bar::Toolbar;
pub use top_level::TopLevel;
pub use tree_view::TreeView;
