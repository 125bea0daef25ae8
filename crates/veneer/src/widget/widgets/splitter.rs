//! Resizable multi-way splitter.
//!
//! Native split panes hold exactly two children. A [`Splitter`] with more
//! children is a chain of nested panes:
//!
//! ```text
//! root ─┬─ first:  child 1
//!       └─ second: pane 1 ─┬─ first:  child 2
//!                          └─ second: pane 2 ─┬─ first:  child 3
//!                                             └─ second: (empty)
//! ```
//!
//! The first child goes into the root's first slot. Every later child gets
//! a new pane: the child takes its first slot and the pane is attached to
//! the second slot of the previous pane (or the root).

use std::sync::Arc;

use parking_lot::Mutex;
use veneer_core::logging::targets;

use crate::backend::{Backend, NativeId, NativeKind, Packing, PaneSlot};
use crate::error::Result;
use crate::widget::{Container, Orientation, Widget, WidgetBase, impl_widget};

#[derive(Default)]
struct PaneChain {
    /// Nested panes, outermost first.
    panes: Vec<NativeId>,
    /// Children placed since the chain was last reset.
    placed: usize,
}

/// A splitter holding any number of resizable children.
#[derive(Clone)]
pub struct Splitter {
    base: Arc<WidgetBase>,
    orientation: Orientation,
    chain: Arc<Mutex<PaneChain>>,
}

impl Splitter {
    /// Create an empty splitter.
    pub fn new(backend: &Backend, orientation: Orientation) -> Self {
        Self {
            base: WidgetBase::new(backend, NativeKind::Paned(orientation), "Splitter"),
            orientation,
            chain: Arc::new(Mutex::new(PaneChain::default())),
        }
    }

    /// The split direction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of nested panes below the root.
    pub fn pane_count(&self) -> usize {
        self.chain.lock().panes.len()
    }

    /// Nested panes below the root, outermost first.
    pub fn panes(&self) -> Vec<NativeId> {
        self.chain.lock().panes.clone()
    }
}

impl_widget!(Splitter, base);

impl Container for Splitter {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        let backend = self.base.backend();
        let mut chain = self.chain.lock();

        if chain.placed == 0 {
            backend.pack(self.base.native_id(), child.native_id(), Packing::Pane(PaneSlot::First))?;
            chain.placed = 1;
            return Ok(());
        }

        let holder = chain.panes.last().copied().unwrap_or(self.base.native_id());
        let pane = backend.create(NativeKind::Paned(self.orientation));
        let attached = backend
            .pack(pane, child.native_id(), Packing::Pane(PaneSlot::First))
            .and_then(|()| backend.pack(holder, pane, Packing::Pane(PaneSlot::Second)));
        if let Err(err) = attached {
            if backend.parent(child.native_id()).ok().flatten() == Some(pane) {
                backend.unpack(child.native_id())?;
            }
            backend.destroy(pane)?;
            return Err(err.into());
        }

        chain.panes.push(pane);
        chain.placed += 1;
        tracing::trace!(
            target: targets::CONTAINER,
            depth = chain.panes.len(),
            "extended splitter pane chain"
        );
        Ok(())
    }

    fn remove_all(&self) -> Result<()> {
        self.base.ensure_alive()?;
        for child in self.get_children() {
            self.remove(child.as_ref())?;
        }

        let panes = std::mem::take(&mut *self.chain.lock());
        // Destroying the outermost pane takes the whole chain with it.
        if let Some(outer) = panes.panes.first() {
            self.base.backend().destroy(*outer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HeadlessBackend, NativeBackend};
    use crate::error::VeneerError;
    use crate::widget::widgets::Button;

    fn setup() -> (Arc<HeadlessBackend>, Backend) {
        let headless = Arc::new(HeadlessBackend::new());
        let backend: Backend = headless.clone();
        (headless, backend)
    }

    #[test]
    fn test_three_children_make_two_nested_panes() {
        let (headless, backend) = setup();
        let splitter = Splitter::new(&backend, Orientation::Horizontal);
        let children: Vec<Button> = (1..=3).map(|i| Button::new(&backend, &i.to_string())).collect();
        for child in &children {
            splitter.add_widget(child).unwrap();
        }

        assert_eq!(splitter.pane_count(), 2);
        let panes = splitter.panes();
        let root = splitter.native_id();

        assert_eq!(headless.parent(children[0].native_id()).unwrap(), Some(root));
        assert_eq!(
            headless.packing(children[0].native_id()).unwrap(),
            Some(Packing::Pane(PaneSlot::First))
        );

        assert_eq!(headless.parent(panes[0]).unwrap(), Some(root));
        assert_eq!(headless.packing(panes[0]).unwrap(), Some(Packing::Pane(PaneSlot::Second)));
        assert_eq!(headless.parent(children[1].native_id()).unwrap(), Some(panes[0]));
        assert_eq!(
            headless.packing(children[1].native_id()).unwrap(),
            Some(Packing::Pane(PaneSlot::First))
        );

        // Child 3 sits in the second slot of pane 1, inside pane 2.
        assert_eq!(headless.parent(panes[1]).unwrap(), Some(panes[0]));
        assert_eq!(headless.packing(panes[1]).unwrap(), Some(Packing::Pane(PaneSlot::Second)));
        assert_eq!(headless.parent(children[2].native_id()).unwrap(), Some(panes[1]));

        assert_eq!(splitter.num_children(), 3);
    }

    #[test]
    fn test_remove_leaves_chain_and_remove_all_resets() {
        let (headless, backend) = setup();
        let splitter = Splitter::new(&backend, Orientation::Vertical);
        let a = Button::new(&backend, "a");
        let b = Button::new(&backend, "b");
        splitter.add_widget(&a).unwrap();
        splitter.add_widget(&b).unwrap();

        splitter.remove(&b).unwrap();
        assert_eq!(headless.parent(b.native_id()).unwrap(), None);
        assert!(matches!(splitter.remove(&b), Err(VeneerError::NotAChild)));

        splitter.remove_all().unwrap();
        assert_eq!(splitter.pane_count(), 0);
        assert!(headless.children(splitter.native_id()).unwrap().is_empty());

        // Starting over fills the root's first slot again.
        splitter.add_widget(&b).unwrap();
        assert_eq!(headless.parent(b.native_id()).unwrap(), Some(splitter.native_id()));
    }

    #[test]
    fn test_delete_destroys_chain() {
        let (headless, backend) = setup();
        let splitter = Splitter::new(&backend, Orientation::Horizontal);
        for i in 0..4 {
            splitter.add_widget(&Button::new(&backend, &i.to_string())).unwrap();
        }
        splitter.delete().unwrap();
        assert_eq!(headless.widget_count(), 0);
    }
}
