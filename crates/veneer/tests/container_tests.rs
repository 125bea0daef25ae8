//! Ownership bookkeeping across container types.

use std::sync::Arc;

use veneer::backend::{Backend, HeadlessBackend, NativeBackend, Packing, PaneSlot};
use veneer::{
    Button, Container, Expander, Frame, GridBox, HBox, Label, Orientation, ScrollArea, Splitter, TabWidget, VBox,
    VeneerError, Widget,
};

fn setup() -> (Arc<HeadlessBackend>, Backend) {
    let headless = Arc::new(HeadlessBackend::new());
    let backend: Backend = headless.clone();
    (headless, backend)
}

fn child_ids<C: Container>(container: &C) -> Vec<veneer::backend::NativeId> {
    container.get_children().iter().map(|c| c.native_id()).collect()
}

#[test]
fn test_child_list_matches_vec_model() {
    let (headless, backend) = setup();
    let vbox = VBox::new(&backend);
    let pool: Vec<Button> = (0..6).map(|i| Button::new(&backend, &format!("b{i}"))).collect();
    let mut model: Vec<usize> = Vec::new();

    // Deterministic pseudo-random add/remove sequence.
    let mut seed: u32 = 7;
    for _ in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let pick = (seed >> 16) as usize % pool.len();
        if model.contains(&pick) {
            vbox.remove(&pool[pick]).unwrap();
            model.retain(|&i| i != pick);
        } else {
            vbox.add_widget(&pool[pick]).unwrap();
            model.push(pick);
        }
        if (seed >> 8) % 37 == 0 {
            vbox.remove_all().unwrap();
            model.clear();
        }

        let expected: Vec<_> = model.iter().map(|&i| pool[i].native_id()).collect();
        assert_eq!(child_ids(&vbox), expected);
        assert_eq!(headless.children(vbox.native_id()).unwrap(), expected);
    }
}

#[test]
fn test_remove_stranger_fails_everywhere() {
    let (_headless, backend) = setup();
    let stranger = Label::new(&backend, "stranger");

    assert!(matches!(VBox::new(&backend).remove(&stranger), Err(VeneerError::NotAChild)));
    assert!(matches!(HBox::new(&backend).remove(&stranger), Err(VeneerError::NotAChild)));
    assert!(matches!(GridBox::new(&backend, 2).remove(&stranger), Err(VeneerError::NotAChild)));
    assert!(matches!(Frame::new(&backend, "f").remove(&stranger), Err(VeneerError::NotAChild)));
    assert!(matches!(Expander::new(&backend, "e").remove(&stranger), Err(VeneerError::NotAChild)));
    assert!(matches!(ScrollArea::new(&backend).remove(&stranger), Err(VeneerError::NotAChild)));
    assert!(matches!(TabWidget::new(&backend).remove(&stranger), Err(VeneerError::NotAChild)));
    assert!(matches!(
        Splitter::new(&backend, Orientation::Horizontal).remove(&stranger),
        Err(VeneerError::NotAChild)
    ));
}

#[test]
fn test_single_slot_containers_replace() {
    let (_headless, backend) = setup();
    let frame = Frame::new(&backend, "Settings");
    let first = Label::new(&backend, "first");
    let second = Label::new(&backend, "second");

    frame.set_widget(&first).unwrap();
    frame.set_widget(&second).unwrap();

    assert_eq!(child_ids(&frame), vec![second.native_id()]);
    // The replaced child is free to join another container.
    VBox::new(&backend).add_widget(&first).unwrap();
}

#[test]
fn test_failed_replace_keeps_current_child() {
    let (headless, backend) = setup();
    let frame = Frame::new(&backend, "Settings");
    let current = Label::new(&backend, "current");
    frame.set_widget(&current).unwrap();

    let owned = Label::new(&backend, "owned");
    VBox::new(&backend).add_widget(&owned).unwrap();
    assert!(matches!(frame.set_widget(&owned), Err(VeneerError::AlreadyParented)));

    let gone = Label::new(&backend, "gone");
    gone.delete().unwrap();
    assert!(matches!(frame.set_widget(&gone), Err(VeneerError::Disposed)));

    assert!(frame.set_widget(&frame).is_err());

    assert_eq!(child_ids(&frame), vec![current.native_id()]);
    assert_eq!(headless.parent(current.native_id()).unwrap(), Some(frame.native_id()));

    // Setting the current child again is a plain replace.
    frame.set_widget(&current).unwrap();
    assert_eq!(child_ids(&frame), vec![current.native_id()]);
}

#[test]
fn test_reparenting_requires_removal() {
    let (_headless, backend) = setup();
    let left = VBox::new(&backend);
    let right = VBox::new(&backend);
    let button = Button::new(&backend, "move me");

    left.add_widget(&button).unwrap();
    assert!(matches!(right.add_widget(&button), Err(VeneerError::AlreadyParented)));

    left.remove(&button).unwrap();
    right.add_widget(&button).unwrap();
    assert_eq!(right.num_children(), 1);
    assert_eq!(left.num_children(), 0);
}

#[test]
fn test_splitter_three_children() {
    let (headless, backend) = setup();
    let splitter = Splitter::new(&backend, Orientation::Vertical);
    let children: Vec<Label> = ["one", "two", "three"].iter().map(|t| Label::new(&backend, t)).collect();
    for child in &children {
        splitter.add_widget(child).unwrap();
    }

    let panes = splitter.panes();
    assert_eq!(panes.len(), 2);
    assert_eq!(headless.parent(children[0].native_id()).unwrap(), Some(splitter.native_id()));
    assert_eq!(headless.parent(children[1].native_id()).unwrap(), Some(panes[0]));
    assert_eq!(
        headless.packing(panes[1]).unwrap(),
        Some(Packing::Pane(PaneSlot::Second))
    );
    assert_eq!(headless.parent(panes[1]).unwrap(), Some(panes[0]));
    assert_eq!(headless.parent(children[2].native_id()).unwrap(), Some(panes[1]));
}

#[test]
fn test_listener_may_remove_its_own_widget() {
    let (headless, backend) = setup();
    let vbox = VBox::new(&backend);
    let button = Button::new(&backend, "self-destruct");
    vbox.add_widget(&button).unwrap();

    let vbox_clone = vbox.clone();
    let button_clone = button.clone();
    button
        .add_callback(veneer::events::ACTIVATED, move |_| {
            vbox_clone.remove(&button_clone)?;
            Ok(())
        })
        .unwrap();

    headless.click(button.native_id()).unwrap();
    assert_eq!(vbox.num_children(), 0);
}
