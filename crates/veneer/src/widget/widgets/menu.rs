//! Menus, menu bars and menu actions.
//!
//! A [`MenuBar`] owns one item per top-level title, each carrying a
//! [`Menu`] as its submenu. Menus own their [`MenuAction`]s and separators.
//! A menu can also be attached to a label or image as a context menu; it is
//! then popped up at the pointer on a secondary-button press.

use std::sync::Arc;

use parking_lot::Mutex;
use veneer_core::EventArgs;

use crate::backend::{Backend, BackendError, NativeKind, NativeSignal, Packing, PropValue, Property};
use crate::error::Result;
use crate::widget::{Container, Widget, WidgetBase, Wrapped, events, impl_widget, redirect};

/// An activatable menu entry.
///
/// Fires `activated` (no payload) when chosen.
#[derive(Clone)]
pub struct MenuAction {
    base: Arc<WidgetBase>,
}

impl MenuAction {
    /// Create an entry labelled `text`.
    pub fn new(backend: &Backend, text: &str) -> Self {
        let base = WidgetBase::new(backend, NativeKind::MenuItem, "MenuAction");
        base.init(Property::Label, PropValue::Text(text.to_string()));
        base.enable_events(&[events::ACTIVATED]);
        let result = base.connect(
            NativeSignal::Activate,
            redirect(&base, |base, _| base.fire(events::ACTIVATED, EventArgs::None)),
        );
        base.check_init(result);
        Self { base }
    }

    /// Choose the entry programmatically.
    pub fn trigger(&self) -> Result<()> {
        self.base.ensure_alive()?;
        self.base.backend().activate(self.base.native_id())?;
        Ok(())
    }

    /// The entry label.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Label)
    }
}

impl_widget!(MenuAction, base);

/// A drop-down or popup menu.
#[derive(Clone)]
pub struct Menu {
    base: Arc<WidgetBase>,
}

impl Menu {
    /// Create an empty menu.
    pub fn new(backend: &Backend) -> Self {
        Self {
            base: WidgetBase::new(backend, NativeKind::Menu, "Menu"),
        }
    }

    /// Append an action labelled `text` and return it.
    pub fn add_name(&self, text: &str) -> Result<MenuAction> {
        let action = MenuAction::new(self.base.backend(), text);
        self.add_widget(&action)?;
        Ok(action)
    }

    /// Append a separator line.
    pub fn add_separator(&self) -> Result<()> {
        let separator = WidgetBase::new(self.base.backend(), NativeKind::MenuSeparator, "MenuSeparator");
        self.add_widget(&Wrapped::new(separator))
    }

    /// Pop the menu up at the pointer.
    pub fn popup(&self) -> Result<()> {
        self.base.ensure_alive()?;
        self.base.show_all()?;
        self.base.backend().popup_menu(self.base.native_id(), None)?;
        Ok(())
    }

    /// Pop the menu up at `(x, y)`.
    pub fn popup_at(&self, x: f64, y: f64) -> Result<()> {
        self.base.ensure_alive()?;
        self.base.show_all()?;
        self.base.backend().popup_menu(self.base.native_id(), Some((x, y)))?;
        Ok(())
    }
}

impl_widget!(Menu, base);

impl Container for Menu {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        self.base.backend().pack(
            self.base.native_id(),
            child.native_id(),
            Packing::Linear {
                expand: false,
                fill: false,
            },
        )?;
        Ok(())
    }
}

/// A horizontal bar of menu titles.
#[derive(Clone)]
pub struct MenuBar {
    base: Arc<WidgetBase>,
}

impl MenuBar {
    /// Create an empty menu bar.
    pub fn new(backend: &Backend) -> Self {
        Self {
            base: WidgetBase::new(backend, NativeKind::MenuBar, "MenuBar"),
        }
    }

    /// Append a title and return the new menu shown under it.
    pub fn add_name(&self, text: &str) -> Result<Menu> {
        let backend = self.base.backend();
        let item = MenuAction::new(backend, text);
        let menu = Menu::new(backend);
        backend.pack(item.native_id(), menu.native_id(), Packing::Submenu)?;
        item.widget_base().adopt(Arc::new(menu.clone()))?;
        self.add_widget(&item)?;
        Ok(menu)
    }
}

impl_widget!(MenuBar, base);

impl Container for MenuBar {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        self.base.backend().pack(
            self.base.native_id(),
            child.native_id(),
            Packing::Linear {
                expand: false,
                fill: false,
            },
        )?;
        Ok(())
    }
}

/// Optional context menu slot shared with a native handler.
#[derive(Default)]
pub(crate) struct ContextMenu {
    menu: Mutex<Option<Menu>>,
}

impl ContextMenu {
    pub(crate) fn attach(&self, menu: Option<Menu>) {
        *self.menu.lock() = menu;
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.menu.lock().is_some()
    }

    /// Pop the attached menu up at `(x, y)`. Returns `false` if no menu is
    /// attached.
    pub(crate) fn popup(&self, x: f64, y: f64) -> std::result::Result<bool, BackendError> {
        let Some(menu) = self.menu.lock().clone() else {
            return Ok(false);
        };
        if menu.is_disposed() {
            return Ok(false);
        }
        let backend = menu.widget_base().backend();
        backend.show_all(menu.native_id())?;
        backend.popup_menu(menu.native_id(), Some((x, y)))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HeadlessBackend, NativeBackend};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> (Arc<HeadlessBackend>, Backend) {
        let headless = Arc::new(HeadlessBackend::new());
        let backend: Backend = headless.clone();
        (headless, backend)
    }

    #[test]
    fn test_menu_action_fires() {
        let (headless, backend) = setup();
        let menu = Menu::new(&backend);
        let open = menu.add_name("Open").unwrap();
        menu.add_separator().unwrap();
        menu.add_name("Quit").unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        open.add_callback(events::ACTIVATED, move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

        headless.click(open.native_id()).unwrap();
        open.trigger().unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(menu.num_children(), 3);
        assert_eq!(open.get_text().unwrap(), "Open");
    }

    #[test]
    fn test_menu_bar_attaches_submenu() {
        let (headless, backend) = setup();
        let bar = MenuBar::new(&backend);
        let file = bar.add_name("File").unwrap();
        file.add_name("Save").unwrap();

        let items = headless.children(bar.native_id()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(headless.children(items[0]).unwrap(), vec![file.native_id()]);
        assert_eq!(headless.packing(file.native_id()).unwrap(), Some(Packing::Submenu));
    }

    #[test]
    fn test_deleting_bar_disposes_menus() {
        let (headless, backend) = setup();
        let bar = MenuBar::new(&backend);
        let edit = bar.add_name("Edit").unwrap();
        let copy = edit.add_name("Copy").unwrap();

        bar.delete().unwrap();
        assert!(edit.is_disposed());
        assert!(copy.is_disposed());
        assert_eq!(headless.widget_count(), 0);
    }

    #[test]
    fn test_popup_records_position() {
        let (headless, backend) = setup();
        let menu = Menu::new(&backend);
        menu.popup().unwrap();
        menu.popup_at(4.0, 5.0).unwrap();

        assert_eq!(
            headless.popups(),
            vec![(menu.native_id(), None), (menu.native_id(), Some((4.0, 5.0)))]
        );
    }

    #[test]
    fn test_context_menu_slot() {
        let (headless, backend) = setup();
        let slot = ContextMenu::default();
        assert!(!slot.popup(1.0, 1.0).unwrap());

        let menu = Menu::new(&backend);
        slot.attach(Some(menu.clone()));
        assert!(slot.is_attached());
        assert!(slot.popup(1.0, 2.0).unwrap());
        assert_eq!(headless.popups(), vec![(menu.native_id(), Some((1.0, 2.0)))]);
    }
}
