//! Tool bar.

use std::sync::Arc;

use crate::backend::{Backend, NativeKind, Packing};
use crate::error::Result;
use crate::widget::{Container, Widget, WidgetBase, Wrapped, impl_widget};

use super::button::{Button, ToggleButton};

/// A row of tool buttons.
#[derive(Clone)]
pub struct Toolbar {
    base: Arc<WidgetBase>,
}

impl Toolbar {
    /// Create an empty tool bar.
    pub fn new(backend: &Backend) -> Self {
        Self {
            base: WidgetBase::new(backend, NativeKind::Toolbar, "Toolbar"),
        }
    }

    /// Append a push button labelled `text` and return it.
    pub fn add_action(&self, text: &str) -> Result<Button> {
        let button = Button::new(self.base.backend(), text);
        self.add_widget(&button)?;
        Ok(button)
    }

    /// Append a toggle button labelled `text` and return it.
    pub fn add_toggle_action(&self, text: &str) -> Result<ToggleButton> {
        let button = ToggleButton::new(self.base.backend(), text);
        self.add_widget(&button)?;
        Ok(button)
    }

    /// Append a separator.
    pub fn add_separator(&self) -> Result<()> {
        let separator = WidgetBase::new(self.base.backend(), NativeKind::ToolSeparator, "ToolSeparator");
        self.add_widget(&Wrapped::new(separator))
    }
}

impl_widget!(Toolbar, base);

impl Container for Toolbar {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HeadlessBackend, NativeBackend};
    use crate::widget::events;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_actions_and_separator() {
        let headless = Arc::new(HeadlessBackend::new());
        let backend: Backend = headless.clone();
        let toolbar = Toolbar::new(&backend);

        let open = toolbar.add_action("Open").unwrap();
        toolbar.add_separator().unwrap();
        let lock = toolbar.add_toggle_action("Lock").unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        open.add_callback(events::ACTIVATED, move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        headless.click(open.native_id()).unwrap();
        headless.click(lock.native_id()).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(lock.get_state().unwrap());
        assert_eq!(toolbar.num_children(), 3);

        let kinds: Vec<_> = headless
            .children(toolbar.native_id())
            .unwrap()
            .into_iter()
            .map(|id| headless.kind(id).unwrap())
            .collect();
        assert_eq!(
            kinds,
            vec![NativeKind::Button, NativeKind::ToolSeparator, NativeKind::ToggleButton]
        );
    }
}
