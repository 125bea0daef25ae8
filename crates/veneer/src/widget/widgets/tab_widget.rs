//! Notebook containers.
//!
//! A [`TabWidget`] shows one page at a time and a row of tabs to switch
//! between them. A [`StackWidget`] is the same without tabs; pages change
//! only programmatically.
//!
//! Both fire `page-switch` with the new page index as
//! [`EventArgs::Index`] exactly once whenever the active page changes,
//! whether the user clicked a tab, the application called `set_index`, or
//! the active page was removed.

use std::sync::Arc;

use veneer_core::EventArgs;

use crate::backend::{Backend, NativeEvent, NativeKind, NativeSignal, Packing, PropValue, Property};
use crate::error::{Result, VeneerError};
use crate::widget::{Container, TabPosition, Widget, WidgetBase, attach_child, events, impl_widget, redirect};

/// A tabbed notebook.
#[derive(Clone)]
pub struct TabWidget {
    base: Arc<WidgetBase>,
}

impl TabWidget {
    /// Create an empty notebook with tabs on top.
    pub fn new(backend: &Backend) -> Self {
        Self::with_type_name(backend, "TabWidget")
    }

    fn with_type_name(backend: &Backend, type_name: &'static str) -> Self {
        let base = WidgetBase::new(backend, NativeKind::Notebook, type_name);
        base.enable_events(&[events::PAGE_SWITCH]);
        let result = base.connect(
            NativeSignal::SwitchPage,
            redirect(&base, |base, event| match event {
                NativeEvent::Index(page) if *page >= 0 => {
                    base.fire(events::PAGE_SWITCH, EventArgs::Index(*page))
                }
                _ => Ok(()),
            }),
        );
        base.check_init(result);
        Self { base }
    }

    /// Append a page with a tab labelled `title`.
    pub fn add_widget_with_title<W: Widget + Clone>(&self, child: &W, title: &str) -> Result<()> {
        attach_child(self, Arc::new(child.clone()), |child| self.pack_page(child, title))
    }

    /// Index of the active page, if there is any page.
    pub fn get_index(&self) -> Result<Option<usize>> {
        let page = self
            .base
            .get(Property::CurrentPage)?
            .and_then(|v| v.as_int())
            .unwrap_or(-1);
        Ok(usize::try_from(page).ok())
    }

    /// Show page `index`.
    pub fn set_index(&self, index: usize) -> Result<()> {
        let len = self.num_children();
        if index >= len {
            return Err(VeneerError::IndexOutOfBounds { index, len });
        }
        self.base.set(Property::CurrentPage, PropValue::Int(index as i64))
    }

    /// Page index of `child`, if it is a page here.
    pub fn index_of(&self, child: &dyn Widget) -> Result<Option<usize>> {
        self.base.ensure_alive()?;
        let pages = self.base.backend().children(self.base.native_id())?;
        Ok(pages.iter().position(|page| *page == child.native_id()))
    }

    /// The page at `index`.
    pub fn get_widget_by_index(&self, index: usize) -> Result<Arc<dyn Widget>> {
        self.base.ensure_alive()?;
        let pages = self.base.backend().children(self.base.native_id())?;
        let len = pages.len();
        pages
            .get(index)
            .and_then(|native| {
                self.base
                    .children()
                    .into_iter()
                    .find(|child| child.native_id() == *native)
            })
            .ok_or(VeneerError::IndexOutOfBounds { index, len })
    }

    /// Move the tabs to another edge.
    pub fn set_tab_position(&self, position: TabPosition) -> Result<()> {
        self.base.set(
            Property::TabPosition,
            PropValue::Text(position.as_str().to_string()),
        )
    }

    fn pack_page(&self, child: &Arc<dyn Widget>, title: &str) -> Result<()> {
        self.base.backend().pack(
            self.base.native_id(),
            child.native_id(),
            Packing::Page {
                label: title.to_string(),
            },
        )?;
        Ok(())
    }
}

impl_widget!(TabWidget, base);

impl Container for TabWidget {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        self.pack_page(child, "")
    }
}

/// A notebook without tabs.
#[derive(Clone)]
pub struct StackWidget {
    pages: TabWidget,
}

impl StackWidget {
    /// Create an empty stack.
    pub fn new(backend: &Backend) -> Self {
        let pages = TabWidget::with_type_name(backend, "StackWidget");
        pages.base.init(Property::ShowTabs, PropValue::Bool(false));
        Self { pages }
    }

    /// Index of the visible page, if there is any page.
    pub fn get_index(&self) -> Result<Option<usize>> {
        self.pages.get_index()
    }

    /// Show page `index`.
    pub fn set_index(&self, index: usize) -> Result<()> {
        self.pages.set_index(index)
    }

    /// Page index of `child`, if it is a page here.
    pub fn index_of(&self, child: &dyn Widget) -> Result<Option<usize>> {
        self.pages.index_of(child)
    }

    /// The page at `index`.
    pub fn get_widget_by_index(&self, index: usize) -> Result<Arc<dyn Widget>> {
        self.pages.get_widget_by_index(index)
    }
}

impl_widget!(StackWidget, pages.base);

impl Container for StackWidget {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        self.pages.pack_child(child)
    }
}
