//! Single-slot decorating containers.
//!
//! A [`Frame`] draws a titled border around its child; an [`Expander`]
//! shows or hides its child under a clickable title. Both hold at most one
//! child: adding a widget replaces the current one.

use std::sync::Arc;

use crate::backend::{Backend, NativeKind, Packing, PropValue, Property};
use crate::error::Result;
use crate::widget::{Container, Widget, WidgetBase, impl_widget};

fn pack_single(base: &WidgetBase, child: &Arc<dyn Widget>) -> Result<()> {
    base.backend()
        .pack(base.native_id(), child.native_id(), Packing::Single)?;
    Ok(())
}

/// A titled border around one child.
#[derive(Clone)]
pub struct Frame {
    base: Arc<WidgetBase>,
}

impl Frame {
    /// Create a frame. An empty title draws a plain border.
    pub fn new(backend: &Backend, title: &str) -> Self {
        let base = WidgetBase::new(backend, NativeKind::Frame, "Frame");
        if !title.is_empty() {
            base.init(Property::Label, PropValue::Text(title.to_string()));
        }
        Self { base }
    }

    /// Replace the child.
    pub fn set_widget<W: Widget + Clone>(&self, child: &W) -> Result<()> {
        self.add_widget(child)
    }

    /// The frame title.
    pub fn get_text(&self) -> Result<String> {
        self.base.get_text_on(self.base.native_id(), Property::Label)
    }

    /// Replace the frame title.
    pub fn set_text(&self, title: &str) -> Result<()> {
        self.base.set(Property::Label, PropValue::Text(title.to_string()))
    }
}

impl_widget!(Frame, base);

impl Container for Frame {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        pack_single(&self.base, child)
    }

    fn replaces_child(&self) -> bool {
        true
    }
}

/// A collapsible section with a title.
#[derive(Clone)]
pub struct Expander {
    base: Arc<WidgetBase>,
}

impl Expander {
    /// Create a collapsed expander.
    pub fn new(backend: &Backend, title: &str) -> Self {
        let base = WidgetBase::new(backend, NativeKind::Expander, "Expander");
        base.init(Property::Label, PropValue::Text(title.to_string()));
        base.init(Property::Expanded, PropValue::Bool(false));
        Self { base }
    }

    /// Replace the child.
    pub fn set_widget<W: Widget + Clone>(&self, child: &W) -> Result<()> {
        self.add_widget(child)
    }

    /// Show or hide the child.
    pub fn set_expanded(&self, expanded: bool) -> Result<()> {
        self.base.set(Property::Expanded, PropValue::Bool(expanded))
    }

    /// Returns `true` while the child is shown.
    pub fn is_expanded(&self) -> Result<bool> {
        self.base.get_bool(Property::Expanded)
    }
}

impl_widget!(Expander, base);

impl Container for Expander {
    fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
        pack_single(&self.base, child)
    }

    fn replaces_child(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HeadlessBackend, NativeBackend};
    use crate::widget::widgets::Button;

    fn setup() -> (Arc<HeadlessBackend>, Backend) {
        let headless = Arc::new(HeadlessBackend::new());
        let backend: Backend = headless.clone();
        (headless, backend)
    }

    #[test]
    fn test_frame_replaces_child() {
        let (headless, backend) = setup();
        let frame = Frame::new(&backend, "Options");
        let first = Button::new(&backend, "first");
        let second = Button::new(&backend, "second");

        frame.set_widget(&first).unwrap();
        frame.set_widget(&second).unwrap();

        assert_eq!(frame.num_children(), 1);
        assert_eq!(frame.get_children()[0].native_id(), second.native_id());
        assert_eq!(headless.children(frame.native_id()).unwrap(), vec![second.native_id()]);

        // The replaced child is free to join another container.
        assert!(first.widget_base().parent().is_none());
        assert!(!first.is_disposed());
    }

    #[test]
    fn test_frame_title() {
        let (_headless, backend) = setup();
        let frame = Frame::new(&backend, "");
        assert_eq!(frame.get_text().unwrap(), "");
        frame.set_text("Title").unwrap();
        assert_eq!(frame.get_text().unwrap(), "Title");
    }

    #[test]
    fn test_expander_state() {
        let (_headless, backend) = setup();
        let expander = Expander::new(&backend, "More");
        assert!(!expander.is_expanded().unwrap());
        expander.set_expanded(true).unwrap();
        assert!(expander.is_expanded().unwrap());

        let child = Button::new(&backend, "hidden");
        expander.add_widget(&child).unwrap();
        expander.add_widget(&Button::new(&backend, "other")).unwrap();
        assert_eq!(expander.num_children(), 1);
    }
}
