//! Capability surface of the native toolkit.
//!
//! Wrapped controls never talk to a concrete toolkit. Everything they need
//! goes through [`NativeBackend`]: creating and destroying native widgets,
//! a property bag per widget, parent/child packing, native signal
//! connection, window commands, timers, and the modal file chooser.
//!
//! # Signals and properties
//!
//! Value-bearing properties behave like their native counterparts: setting
//! [`Property::Active`], [`Property::Value`], [`Property::ActiveIndex`],
//! [`Property::CurrentPage`] or [`Property::Cursor`] to a *different* value
//! emits the matching change signal synchronously, exactly as a user
//! interaction would. Wrappers therefore translate both user and
//! programmatic changes through a single redirect shim.
//!
//! A handler may fail; the first failure aborts emission and is returned to
//! whoever triggered the signal as [`BackendError::Handler`].

mod headless;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use slotmap::new_key_type;
use veneer_core::{ListenerError, TimerId};

use crate::widget::Orientation;

pub use headless::HeadlessBackend;

new_key_type! {
    /// Handle to one native widget owned by a backend.
    pub struct NativeId;
}

new_key_type! {
    /// Identifies a connected native signal handler.
    pub struct HandlerId;
}

/// Shared, type-erased backend.
pub type Backend = Arc<dyn NativeBackend>;

/// A native signal handler.
pub type NativeHandler = Arc<dyn Fn(&NativeEvent) -> Result<(), ListenerError> + Send + Sync>;

/// Wrap a closure as a [`NativeHandler`].
pub fn handler<F>(f: F) -> NativeHandler
where
    F: Fn(&NativeEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A deferred task run by the toolkit's timer source.
pub type TimerTask = Box<dyn FnOnce() + Send>;

/// The native widget classes the wrapper layer instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Window,
    Box(Orientation),
    Grid,
    Frame,
    Expander,
    Notebook,
    ScrolledWindow,
    Paned(Orientation),
    Toolbar,
    ToolSeparator,
    Menu,
    MenuBar,
    MenuItem,
    MenuSeparator,
    EventBox,
    Label,
    Button,
    ToggleButton,
    CheckButton,
    RadioButton,
    Entry,
    ComboBox,
    ComboBoxEntry,
    TextView,
    SpinButton,
    Scale(Orientation),
    ScrollBar(Orientation),
    ProgressBar,
    Statusbar,
    Image,
    TreeView,
}

impl NativeKind {
    /// Whether this kind holds at most one child.
    pub fn is_single_slot(&self) -> bool {
        matches!(
            self,
            Self::Window | Self::Frame | Self::Expander | Self::ScrolledWindow | Self::EventBox
        )
    }
}

/// Native signals a wrapper can connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeSignal {
    /// A button was clicked.
    Clicked,
    /// A toggle-like button changed state. Payload: [`NativeEvent::Toggled`].
    Toggled,
    /// An entry or menu item was activated.
    Activate,
    /// A combo box selection changed. Payload: [`NativeEvent::Index`].
    Changed,
    /// A ranged control's value changed. Payload: [`NativeEvent::Value`].
    ValueChanged,
    /// A notebook switched pages. Payload: [`NativeEvent::Index`].
    SwitchPage,
    /// Pointer button pressed. Payload: [`NativeEvent::Button`].
    ButtonPress,
    /// Pointer button released. Payload: [`NativeEvent::Button`].
    ButtonRelease,
    /// Pointer left the widget.
    LeaveNotify,
    /// The widget received a new allocation. Payload: [`NativeEvent::Allocation`].
    SizeAllocate,
    /// The tree view cursor moved. Payload: [`NativeEvent::Path`].
    CursorChanged,
    /// A tree view column header was clicked. Payload: [`NativeEvent::Column`].
    ColumnClicked,
    /// The window manager asked to close a window.
    DeleteEvent,
    /// The widget is being destroyed.
    Destroy,
}

/// Payload delivered with a native signal.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// No payload.
    Plain,
    /// New toggle state.
    Toggled(bool),
    /// New index (`-1` for no selection).
    Index(i32),
    /// New numeric value.
    Value(f64),
    /// Pointer button event in widget coordinates.
    Button { button: u32, x: f64, y: f64 },
    /// New allocation.
    Allocation { width: u32, height: u32 },
    /// A tree path (row indices from the root).
    Path(Vec<usize>),
    /// A column index.
    Column(usize),
}

/// Keys of the per-widget property bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Label,
    Text,
    Title,
    Tooltip,
    Visible,
    Sensitive,
    Active,
    Value,
    Lower,
    Upper,
    Step,
    Digits,
    ActiveIndex,
    Items,
    CurrentPage,
    TabPosition,
    ShowTabs,
    Cursor,
    Columns,
    SortColumn,
    Expanded,
    Justify,
    Alignment,
    Foreground,
    Background,
    Font,
    WidthChars,
    Editable,
    Wrap,
    VScroll,
    HScroll,
    Fraction,
    ShowText,
    Spacing,
    RowSpacing,
    ColumnSpacing,
    BorderWidth,
    SizeRequest,
    Shadow,
    Tracking,
    Image,
    Group,
}

/// Values stored in the property bag.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Path(Vec<usize>),
    Size(u32, u32),
    Pair(f32, f32),
    Widget(NativeId),
}

impl PropValue {
    /// The boolean value, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer value, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The float value, if any. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The text value, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The string list, if any.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// The tree path, if any.
    pub fn as_path(&self) -> Option<&[usize]> {
        match self {
            Self::Path(v) => Some(v),
            _ => None,
        }
    }
}

/// Slot of a binary split pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneSlot {
    First,
    Second,
}

/// How a child is attached to its native parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Packing {
    /// Appended to a linear container.
    Linear { expand: bool, fill: bool },
    /// The sole child of a single-slot container.
    Single,
    /// A cell of a grid.
    Cell { row: u32, column: u32, expand: bool },
    /// A notebook page with its tab label.
    Page { label: String },
    /// One slot of a split pane.
    Pane(PaneSlot),
    /// The submenu of a menu item.
    Submenu,
}

/// Commands sent to the window manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowCommand {
    Raise,
    Lower,
    Focus,
    Move { x: i32, y: i32 },
    Maximize,
    Unmaximize,
    Fullscreen,
    Unfullscreen,
    Iconify,
    Uniconify,
}

/// File chooser mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogAction {
    Open,
    Save,
}

/// A named glob filter shown in a file chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Label shown to the user.
    pub label: String,
    /// Glob pattern, e.g. `*.png`.
    pub pattern: String,
}

/// Parameters of a modal file chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialogRequest {
    pub title: String,
    pub action: FileDialogAction,
    pub filters: Vec<FileFilter>,
}

/// Errors reported by a native backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The native widget was destroyed or never existed.
    #[error("No such native widget")]
    NoSuchWidget,

    /// A single-slot parent (or pane slot) is already occupied.
    #[error("Parent slot is already occupied")]
    SlotOccupied,

    /// The child is already packed into another parent.
    #[error("Native widget is already packed")]
    AlreadyPacked,

    /// The widget is not packed into any parent.
    #[error("Native widget is not packed")]
    NotPacked,

    /// The operation does not apply to this widget kind.
    #[error("Operation not supported by {0:?}")]
    Unsupported(NativeKind),

    /// A signal handler failed.
    #[error("Signal handler failed: {0}")]
    Handler(#[source] ListenerError),
}

/// The native toolkit as seen by the wrapper layer.
///
/// Implementations are shared as [`Backend`] and must be usable from the
/// thread driving the toolkit's event loop. Handlers are always invoked with
/// no internal lock held, so they may call back into the backend.
pub trait NativeBackend: Send + Sync {
    /// Create a native widget.
    fn create(&self, kind: NativeKind) -> NativeId;

    /// Destroy a widget and every widget packed beneath it.
    ///
    /// [`NativeSignal::Destroy`] is emitted for each destroyed widget.
    fn destroy(&self, id: NativeId) -> Result<(), BackendError>;

    /// Returns `true` while `id` refers to a live widget.
    fn exists(&self, id: NativeId) -> bool;

    /// The kind `id` was created with.
    fn kind(&self, id: NativeId) -> Result<NativeKind, BackendError>;

    /// Set a property, emitting its change signal if it is value-bearing.
    fn set_property(&self, id: NativeId, prop: Property, value: PropValue) -> Result<(), BackendError>;

    /// Read a property.
    fn property(&self, id: NativeId, prop: Property) -> Result<Option<PropValue>, BackendError>;

    /// Attach `child` below `parent`.
    fn pack(&self, parent: NativeId, child: NativeId, packing: Packing) -> Result<(), BackendError>;

    /// Detach `child` from its parent. The child stays alive.
    fn unpack(&self, child: NativeId) -> Result<(), BackendError>;

    /// Native children of `parent`, in packing order.
    fn children(&self, parent: NativeId) -> Result<Vec<NativeId>, BackendError>;

    /// Native parent of `child`, if packed.
    fn parent(&self, child: NativeId) -> Result<Option<NativeId>, BackendError>;

    /// How `child` is packed into its parent.
    fn packing(&self, child: NativeId) -> Result<Option<Packing>, BackendError>;

    /// Make a widget and everything below it visible.
    fn show_all(&self, id: NativeId) -> Result<(), BackendError>;

    /// The current allocation of a widget.
    fn allocation(&self, id: NativeId) -> Result<(u32, u32), BackendError>;

    /// Connect a handler to a native signal.
    fn connect(&self, id: NativeId, signal: NativeSignal, handler: NativeHandler) -> Result<HandlerId, BackendError>;

    /// Disconnect a handler. Returns `true` if it was connected.
    fn disconnect(&self, handler: HandlerId) -> bool;

    /// Activate a widget as if the user triggered it (click, toggle, enter).
    fn activate(&self, id: NativeId) -> Result<(), BackendError>;

    /// Send a command to the window manager.
    fn window_command(&self, id: NativeId, command: WindowCommand) -> Result<(), BackendError>;

    /// Pop up a menu, at the pointer location if given.
    fn popup_menu(&self, menu: NativeId, at: Option<(f64, f64)>) -> Result<(), BackendError>;

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId;

    /// Cancel a scheduled task. Returns `true` if it was still pending.
    fn cancel(&self, timer: TimerId) -> bool;

    /// Dimensions of the default screen, if one is available.
    fn screen_size(&self) -> Option<(u32, u32)>;

    /// Process every pending native event. Returns the number processed.
    fn process_pending(&self) -> usize;

    /// Ask the toolkit's main loop to stop.
    fn quit(&self);

    /// Run a modal file chooser. Blocks until the user responds.
    ///
    /// Returns `None` when the dialog was cancelled.
    fn run_file_dialog(&self, request: &FileDialogRequest) -> Option<PathBuf>;
}

static_assertions::assert_obj_safe!(NativeBackend);
