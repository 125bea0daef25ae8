//! Scrollable tree/table view over a [`TreeModel`].

use std::sync::Arc;

use parking_lot::Mutex;
use veneer_core::EventArgs;
use veneer_core::logging::targets;

use crate::backend::{Backend, NativeEvent, NativeId, NativeKind, NativeSignal, Packing, PropValue, Property};
use crate::config::VeneerConfig;
use crate::error::{Result, VeneerError};
use crate::model::{Tree, TreeModel, TreeRow, tree_from_json};
use crate::widget::{WidgetBase, events, impl_widget, redirect};

struct TreeState {
    view: NativeId,
    model: Mutex<TreeModel>,
    auto_expand: bool,
    sortable: bool,
}

impl TreeState {
    /// Push the model's rows and sort state to the native view.
    fn refresh(&self, base: &WidgetBase) -> Result<()> {
        let (items, sort_column) = {
            let model = self.model.lock();
            (model.display_texts(), model.sort_column())
        };
        base.set_on(self.view, Property::Items, PropValue::List(items))?;
        base.set_on(
            self.view,
            Property::SortColumn,
            PropValue::Int(sort_column.map_or(-1, |c| c as i64)),
        )?;
        if self.auto_expand {
            base.set_on(self.view, Property::Expanded, PropValue::Bool(true))?;
        }
        Ok(())
    }

    fn sort(&self, base: &WidgetBase, column: usize) -> Result<()> {
        self.model.lock().sort_by_column(column)?;
        tracing::debug!(target: targets::TREE_VIEW, column, "sorted tree view");
        self.refresh(base)
    }
}

/// A tree/table view.
///
/// Rows come from a nested [`Tree`] projected onto the declared headers.
/// Moving the cursor onto a row that has a parent fires `selected` with
/// [`EventArgs::Selection`] holding the parent's key and the row's key;
/// top-level rows fire nothing. When the view is sortable, clicking a
/// column header sorts every level by that column.
#[derive(Clone)]
pub struct TreeView {
    base: Arc<WidgetBase>,
    state: Arc<TreeState>,
}

impl TreeView {
    /// Create an empty view.
    pub fn new(backend: &Backend, auto_expand: bool, sortable: bool) -> Self {
        let base = WidgetBase::new(backend, NativeKind::ScrolledWindow, "TreeView");
        let view = backend.create(NativeKind::TreeView);
        base.check_init(backend.pack(base.native_id(), view, Packing::Single));
        base.enable_events(&[events::SELECTED]);

        let state = Arc::new(TreeState {
            view,
            model: Mutex::new(TreeModel::new()),
            auto_expand,
            sortable,
        });

        let weak = Arc::downgrade(&base);
        let result = base.connect_on(
            view,
            NativeSignal::CursorChanged,
            redirect(&state, move |state, event| {
                let (Some(base), NativeEvent::Path(path)) = (weak.upgrade(), event) else {
                    return Ok(());
                };
                let selection = state.model.lock().selection_for(path);
                match selection {
                    Some((group, item)) => base.fire(events::SELECTED, EventArgs::Selection { group, item }),
                    None => Ok(()),
                }
            }),
        );
        base.check_init(result);

        let weak = Arc::downgrade(&base);
        let result = base.connect_on(
            view,
            NativeSignal::ColumnClicked,
            redirect(&state, move |state, event| {
                let (Some(base), NativeEvent::Column(column)) = (weak.upgrade(), event) else {
                    return Ok(());
                };
                if state.sortable {
                    state.sort(&base, *column)?;
                }
                Ok(())
            }),
        );
        base.check_init(result);

        Self { base, state }
    }

    /// Create a view using the configured defaults.
    pub fn from_config(backend: &Backend, config: &VeneerConfig) -> Self {
        Self::new(backend, config.tree_view.auto_expand, config.tree_view.sortable)
    }

    /// Whether every branch is expanded after the rows change.
    pub fn auto_expand(&self) -> bool {
        self.state.auto_expand
    }

    /// Whether header clicks sort.
    pub fn is_sortable(&self) -> bool {
        self.state.sortable
    }

    /// The native tree widget inside the scrolled window.
    pub fn view_native_id(&self) -> NativeId {
        self.state.view
    }

    /// Declare the columns. Drops every row.
    pub fn set_headers<S: AsRef<str>>(&self, titles: &[S]) -> Result<()> {
        self.base.ensure_alive()?;
        let columns: Vec<String> = titles.iter().map(|t| t.as_ref().to_string()).collect();
        self.state.model.lock().set_headers(&columns);
        self.base
            .set_on(self.state.view, Property::Columns, PropValue::List(columns))?;
        self.reset_cursor()?;
        self.state.refresh(&self.base)
    }

    /// Replace every row with `tree`. Headers must be declared first.
    pub fn set_tree(&self, tree: &Tree) -> Result<()> {
        self.base.ensure_alive()?;
        self.state.model.lock().set_tree(tree)?;
        tracing::debug!(target: targets::TREE_VIEW, top_level = tree.len(), "tree view rebuilt");
        self.reset_cursor()?;
        self.state.refresh(&self.base)
    }

    /// Decode `value` with [`tree_from_json`] and show it.
    pub fn set_tree_json(&self, value: &serde_json::Value) -> Result<()> {
        self.set_tree(&tree_from_json(value)?)
    }

    /// Drop every row.
    pub fn clear(&self) -> Result<()> {
        self.base.ensure_alive()?;
        self.state.model.lock().clear();
        self.reset_cursor()?;
        self.state.refresh(&self.base)
    }

    /// Sort every level ascending by `column`.
    pub fn sort_by_column(&self, column: usize) -> Result<()> {
        self.base.ensure_alive()?;
        self.state.sort(&self.base, column)
    }

    /// The column rows are sorted by, if any.
    pub fn sort_column(&self) -> Option<usize> {
        self.state.model.lock().sort_column()
    }

    /// Move the cursor to the row at `path`, as a user click would.
    pub fn select_path(&self, path: &[usize]) -> Result<()> {
        self.base.ensure_alive()?;
        if self.state.model.lock().row(path).is_none() {
            return Err(VeneerError::invalid_argument(format!("{path:?}"), "no row at this path"));
        }
        self.base
            .set_on(self.state.view, Property::Cursor, PropValue::Path(path.to_vec()))
    }

    /// Text of column `column` at `path`.
    pub fn cell_text(&self, path: &[usize], column: usize) -> Option<String> {
        self.state.model.lock().cell_text(path, column)
    }

    /// Snapshot of the top-level rows.
    pub fn rows(&self) -> Vec<TreeRow> {
        self.state.model.lock().rows().to_vec()
    }

    fn reset_cursor(&self) -> Result<()> {
        self.base
            .set_on(self.state.view, Property::Cursor, PropValue::Path(Vec::new()))
    }
}

impl_widget!(TreeView, base);
