//! Building widgets from string tags.
//!
//! Plugin code describes simple forms as caption grids: each row is a flat
//! list of `(title, tag)` pairs. [`build_info`] turns such a grid into a
//! laid-out container plus a name-keyed [`WidgetBunch`] of the controls:
//!
//! ```
//! use std::sync::Arc;
//! use veneer::backend::{Backend, HeadlessBackend};
//! use veneer::factory::build_info;
//! use veneer::{Orientation, TextEntry};
//!
//! let backend: Backend = Arc::new(HeadlessBackend::new());
//! let (_form, bunch) = build_info(
//!     &backend,
//!     &[&["Name:", "label", "Name", "entry"][..], &["Apply", "button"][..]],
//!     Orientation::Vertical,
//! )
//! .unwrap();
//!
//! assert!(bunch["name"].downcast::<TextEntry>().is_some());
//! assert!(bunch.contains_key("lbl_name"));
//! assert!(bunch.contains_key("apply"));
//! ```

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use veneer_core::logging::targets;

use crate::backend::{Backend, NativeId};
use crate::error::{Result, VeneerError};
use crate::widget::widgets::{
    Button, CheckBox, ComboBox, GridBox, HBox, Label, MenuBar, RadioButton, ScrollArea, Slider, SpinBox, TextArea,
    TextEntry, TextEntrySet, ToggleButton, Toolbar, VBox,
};
use crate::widget::{Container, Orientation, Widget, WidgetBase, Wrapped};

/// Controls [`make_widget`] can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Right-aligned caption (`label`).
    Label,
    /// Left/bottom-aligned caption (`llabel`).
    LeftLabel,
    Entry,
    /// Entry with a "Set" button (`entryset`).
    EntrySet,
    ComboBox,
    /// Integer spin box (`spinbutton`).
    SpinButton,
    /// Float spin box (`spinfloat`).
    SpinFloat,
    VBox,
    HBox,
    HScale,
    VScale,
    CheckButton,
    RadioButton,
    ToggleButton,
    Button,
    /// Empty label taking up space (`spacer`).
    Spacer,
    TextArea,
    Toolbar,
    MenuBar,
}

impl WidgetKind {
    const TAGS: &'static [(&'static str, WidgetKind)] = &[
        ("label", Self::Label),
        ("llabel", Self::LeftLabel),
        ("entry", Self::Entry),
        ("entryset", Self::EntrySet),
        ("combobox", Self::ComboBox),
        ("spinbutton", Self::SpinButton),
        ("spinfloat", Self::SpinFloat),
        ("vbox", Self::VBox),
        ("hbox", Self::HBox),
        ("hscale", Self::HScale),
        ("vscale", Self::VScale),
        ("checkbutton", Self::CheckButton),
        ("radiobutton", Self::RadioButton),
        ("togglebutton", Self::ToggleButton),
        ("button", Self::Button),
        ("spacer", Self::Spacer),
        ("textarea", Self::TextArea),
        ("toolbar", Self::Toolbar),
        ("menubar", Self::MenuBar),
    ];

    /// The tag this kind is parsed from.
    pub fn tag(&self) -> &'static str {
        Self::TAGS
            .iter()
            .find(|(_, kind)| kind == self)
            .map_or("", |(tag, _)| tag)
    }
}

impl FromStr for WidgetKind {
    type Err = VeneerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::TAGS
            .iter()
            .find(|(tag, _)| *tag == s)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| VeneerError::invalid_argument(s, "unknown widget type tag"))
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A control built by [`make_widget`].
#[derive(Clone)]
pub enum AnyWidget {
    Label(Label),
    Entry(TextEntry),
    EntrySet(TextEntrySet),
    ComboBox(ComboBox),
    SpinBox(SpinBox),
    VBox(VBox),
    HBox(HBox),
    Slider(Slider),
    CheckBox(CheckBox),
    RadioButton(RadioButton),
    ToggleButton(ToggleButton),
    Button(Button),
    TextArea(TextArea),
    Toolbar(Toolbar),
    MenuBar(MenuBar),
}

macro_rules! each_widget {
    ($value:expr, $w:ident => $body:expr) => {
        match $value {
            AnyWidget::Label($w) => $body,
            AnyWidget::Entry($w) => $body,
            AnyWidget::EntrySet($w) => $body,
            AnyWidget::ComboBox($w) => $body,
            AnyWidget::SpinBox($w) => $body,
            AnyWidget::VBox($w) => $body,
            AnyWidget::HBox($w) => $body,
            AnyWidget::Slider($w) => $body,
            AnyWidget::CheckBox($w) => $body,
            AnyWidget::RadioButton($w) => $body,
            AnyWidget::ToggleButton($w) => $body,
            AnyWidget::Button($w) => $body,
            AnyWidget::TextArea($w) => $body,
            AnyWidget::Toolbar($w) => $body,
            AnyWidget::MenuBar($w) => $body,
        }
    };
}

impl AnyWidget {
    /// The concrete control, if it is a `T`.
    pub fn downcast<T: Widget + Clone>(&self) -> Option<T> {
        self.as_any().downcast_ref::<T>().cloned()
    }
}

impl Widget for AnyWidget {
    fn widget_base(&self) -> &Arc<WidgetBase> {
        each_widget!(self, w => w.widget_base())
    }

    fn as_any(&self) -> &dyn Any {
        each_widget!(self, w => w.as_any())
    }
}

/// Name-keyed controls built by [`build_info`], in caption order.
pub type WidgetBunch = IndexMap<String, AnyWidget>;

/// Build the control tagged `kind`, captioned `title` where it has one.
///
/// Spin boxes span `[0, 100]`; the float variant steps by `0.1` with two
/// decimals. Sliders span `[0, 100]` in whole steps.
pub fn make_widget(backend: &Backend, title: &str, kind: WidgetKind) -> Result<AnyWidget> {
    let widget = match kind {
        WidgetKind::Label => {
            let label = Label::new(backend, title);
            label.set_alignment(0.95, 0.5)?;
            AnyWidget::Label(label)
        }
        WidgetKind::LeftLabel => {
            let label = Label::new(backend, title);
            label.set_alignment(0.05, 0.95)?;
            AnyWidget::Label(label)
        }
        WidgetKind::Entry => AnyWidget::Entry(TextEntry::new(backend, "")),
        WidgetKind::EntrySet => AnyWidget::EntrySet(TextEntrySet::new(backend, "")),
        WidgetKind::ComboBox => AnyWidget::ComboBox(ComboBox::new(backend, false)),
        WidgetKind::SpinButton => AnyWidget::SpinBox(SpinBox::integer(backend, 0, 100, 1)?),
        WidgetKind::SpinFloat => AnyWidget::SpinBox(SpinBox::new(backend, 0.0, 100.0, 0.1, 2)?),
        WidgetKind::VBox => AnyWidget::VBox(VBox::new(backend)),
        WidgetKind::HBox => AnyWidget::HBox(HBox::new(backend)),
        WidgetKind::HScale => {
            AnyWidget::Slider(Slider::new(backend, Orientation::Horizontal, 0.0, 100.0, 1.0, 0)?)
        }
        WidgetKind::VScale => AnyWidget::Slider(Slider::new(backend, Orientation::Vertical, 0.0, 100.0, 1.0, 0)?),
        WidgetKind::CheckButton => AnyWidget::CheckBox(CheckBox::new(backend, title)),
        WidgetKind::RadioButton => AnyWidget::RadioButton(RadioButton::new(backend, title, None)),
        WidgetKind::ToggleButton => AnyWidget::ToggleButton(ToggleButton::new(backend, title)),
        WidgetKind::Button => AnyWidget::Button(Button::new(backend, title)),
        WidgetKind::Spacer => AnyWidget::Label(Label::new(backend, "")),
        WidgetKind::TextArea => AnyWidget::TextArea(TextArea::new(backend, false, true)),
        WidgetKind::Toolbar => AnyWidget::Toolbar(Toolbar::new(backend)),
        WidgetKind::MenuBar => AnyWidget::MenuBar(MenuBar::new(backend)),
    };
    Ok(widget)
}

/// Lower-case `name` and replace anything but letters, digits and `_` with
/// `_`, then put `prefix` in front.
///
/// ```
/// use veneer::factory::name_mangle;
///
/// assert_eq!(name_mangle("Zoom In!", ""), "zoom_in_");
/// assert_eq!(name_mangle("Cut Level", "w_"), "w_cut_level");
/// ```
pub fn name_mangle(name: &str, prefix: &str) -> String {
    let mangled: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{prefix}{mangled}")
}

/// Bunch key for a caption: `Title:` captions are labels and get `lbl_`.
fn caption_name(title: &str) -> String {
    match title.strip_suffix(':') {
        Some(stem) => name_mangle(&format!("lbl_{stem}"), ""),
        None => name_mangle(title, ""),
    }
}

/// Lay out a caption grid.
///
/// Every row is a flat list of `title, tag` pairs; pair `n` of a row goes
/// into grid column `n`. Rows with an odd number of entries fail with
/// [`VeneerError::InvalidArgument`], as do unknown tags. With a horizontal
/// `orientation` the form is pushed to the top by [`hadjust`].
pub fn build_info<R: AsRef<[&'static str]>>(
    backend: &Backend,
    captions: &[R],
    orientation: Orientation,
) -> Result<(Arc<dyn Widget>, WidgetBunch)> {
    let mut columns = 0;
    for (row, caption) in captions.iter().enumerate() {
        let len = caption.as_ref().len();
        if len % 2 != 0 {
            return Err(VeneerError::invalid_argument(
                format!("row {row}"),
                format!("caption rows need title/type pairs, got {len} entries"),
            ));
        }
        columns = columns.max(len / 2);
    }

    let vbox = VBox::new(backend);
    vbox.set_spacing(2)?;
    let grid = GridBox::new(backend, u32::try_from(columns).unwrap_or(u32::MAX));
    grid.set_row_spacing(2)?;
    grid.set_column_spacing(4)?;
    vbox.add_widget(&grid)?;

    let mut bunch = WidgetBunch::new();
    for (row, caption) in captions.iter().enumerate() {
        for (column, pair) in caption.as_ref().chunks_exact(2).enumerate() {
            let (title, tag) = (pair[0], pair[1]);
            let widget = make_widget(backend, title, tag.parse()?)?;
            grid.add_widget_at(&widget, row as u32, column as u32, false)?;
            bunch.insert(caption_name(title), widget);
        }
    }
    tracing::debug!(
        target: targets::CONTAINER,
        rows = captions.len(),
        columns,
        widgets = bunch.len(),
        "built caption grid"
    );

    Ok((hadjust(&vbox, orientation)?, bunch))
}

/// In a horizontal layout, stack `widget` on top of a stretching spacer so
/// it keeps its natural height. Vertical layouts get `widget` back.
pub fn hadjust<W: Widget + Clone>(widget: &W, orientation: Orientation) -> Result<Arc<dyn Widget>> {
    if orientation != Orientation::Horizontal {
        return Ok(Arc::new(widget.clone()));
    }
    let backend = widget.widget_base().backend();
    let vbox = VBox::new(backend);
    vbox.add_widget(widget)?;
    vbox.add_widget_stretch(&Label::new(backend, ""), true)?;
    Ok(Arc::new(vbox))
}

/// Orientation suited to `container`'s shape: vertical when it is taller
/// than wide or has no allocation yet, horizontal otherwise.
pub fn get_orientation(container: &dyn Widget) -> Orientation {
    match container.get_size() {
        Ok((width, height)) if width > 0 && height > 0 && width >= height => Orientation::Horizontal,
        _ => Orientation::Vertical,
    }
}

/// A linear box running in either direction.
#[derive(Clone)]
pub enum LinearBox {
    Horizontal(HBox),
    Vertical(VBox),
}

impl LinearBox {
    /// The stacking direction.
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::Horizontal(_) => Orientation::Horizontal,
            Self::Vertical(_) => Orientation::Vertical,
        }
    }
}

impl Widget for LinearBox {
    fn widget_base(&self) -> &Arc<WidgetBase> {
        match self {
            Self::Horizontal(b) => b.widget_base(),
            Self::Vertical(b) => b.widget_base(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        match self {
            Self::Horizontal(b) => b.as_any(),
            Self::Vertical(b) => b.as_any(),
        }
    }
}

impl Container for LinearBox {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        match self {
            Self::Horizontal(b) => b.pack_child(child),
            Self::Vertical(b) => b.pack_child(child),
        }
    }
}

/// Result of [`get_oriented_box`].
pub struct OrientedBox {
    /// Box to add content to, stacked along `orientation`.
    pub content: LinearBox,
    /// Outermost widget to place in the parent.
    pub outer: Arc<dyn Widget>,
    /// Orientation chosen from the container's shape.
    pub orientation: Orientation,
}

/// Build a content box oriented after `container`'s shape.
///
/// The content box sits at the top of a vertical box padded by a
/// stretching spacer. With `scrolled` that box is put in a [`ScrollArea`].
pub fn get_oriented_box(container: &dyn Widget, scrolled: bool) -> Result<OrientedBox> {
    let backend = container.widget_base().backend();
    let orientation = get_orientation(container);
    let content = match orientation {
        Orientation::Horizontal => LinearBox::Horizontal(HBox::new(backend)),
        Orientation::Vertical => LinearBox::Vertical(VBox::new(backend)),
    };

    let column = VBox::new(backend);
    column.add_widget(&content)?;
    let outer: Arc<dyn Widget> = if scrolled {
        column.add_widget_stretch(&Label::new(backend, ""), true)?;
        let scroll = ScrollArea::new(backend);
        scroll.set_widget(&column)?;
        Arc::new(scroll)
    } else {
        Arc::new(column)
    };

    Ok(OrientedBox {
        content,
        outer,
        orientation,
    })
}

/// Give a native widget created outside this crate a wrapper.
///
/// The wrapper takes ownership: deleting it destroys `native`.
pub fn wrap(backend: &Backend, native: NativeId) -> Wrapped {
    Wrapped::new(WidgetBase::adopt_native(backend, native, "Wrapped"))
}
