//! In-memory implementation of [`NativeBackend`].
//!
//! `HeadlessBackend` keeps a tree of native nodes with property bags, applies
//! the same change-signal rules a real toolkit does, and runs timers against
//! a virtual clock. Tests (and headless tools) drive it through the
//! simulation helpers, which play the role of the user and window system:
//!
//! ```
//! use std::sync::Arc;
//! use veneer::backend::{Backend, HeadlessBackend};
//! use veneer::{Button, Widget};
//!
//! let headless = Arc::new(HeadlessBackend::new());
//! let backend: Backend = headless.clone();
//!
//! let button = Button::new(&backend, "OK");
//! headless.click(button.native_id()).unwrap();
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::SlotMap;
use veneer_core::logging::targets;
use veneer_core::{TimerId, TimerManager};

use super::{
    BackendError, FileDialogRequest, HandlerId, NativeBackend, NativeEvent, NativeHandler, NativeId,
    NativeKind, NativeSignal, Packing, PropValue, Property, TimerTask, WindowCommand,
};

struct Node {
    kind: NativeKind,
    props: HashMap<Property, PropValue>,
    parent: Option<NativeId>,
    packing: Option<Packing>,
    children: Vec<NativeId>,
    allocation: (u32, u32),
    /// Connected handlers, in connection order.
    handlers: Vec<HandlerId>,
    /// Leader of the radio group this node belongs to.
    radio_group: Option<NativeId>,
    destroying: bool,
}

impl Node {
    fn new(kind: NativeKind) -> Self {
        let mut props = HashMap::new();
        props.insert(Property::Visible, PropValue::Bool(false));
        props.insert(Property::Sensitive, PropValue::Bool(true));
        match kind {
            NativeKind::Notebook => {
                props.insert(Property::CurrentPage, PropValue::Int(-1));
                props.insert(Property::ShowTabs, PropValue::Bool(true));
            }
            NativeKind::ComboBox | NativeKind::ComboBoxEntry => {
                props.insert(Property::ActiveIndex, PropValue::Int(-1));
                props.insert(Property::Items, PropValue::List(Vec::new()));
            }
            NativeKind::ToggleButton | NativeKind::CheckButton | NativeKind::RadioButton => {
                props.insert(Property::Active, PropValue::Bool(false));
            }
            NativeKind::SpinButton | NativeKind::Scale(_) | NativeKind::ScrollBar(_) => {
                props.insert(Property::Value, PropValue::Float(0.0));
                props.insert(Property::Lower, PropValue::Float(0.0));
                props.insert(Property::Upper, PropValue::Float(0.0));
                props.insert(Property::Step, PropValue::Float(1.0));
                props.insert(Property::Digits, PropValue::Int(0));
            }
            NativeKind::Entry | NativeKind::TextView | NativeKind::Statusbar => {
                props.insert(Property::Text, PropValue::Text(String::new()));
            }
            NativeKind::ProgressBar => {
                props.insert(Property::Fraction, PropValue::Float(0.0));
            }
            _ => {}
        }
        Self {
            kind,
            props,
            parent: None,
            packing: None,
            children: Vec::new(),
            allocation: (0, 0),
            handlers: Vec::new(),
            radio_group: None,
            destroying: false,
        }
    }
}

struct HandlerEntry {
    widget: NativeId,
    signal: NativeSignal,
    handler: NativeHandler,
}

#[derive(Default)]
struct State {
    nodes: SlotMap<NativeId, Node>,
    handlers: SlotMap<HandlerId, HandlerEntry>,
    timers: TimerManager,
    tasks: HashMap<TimerId, TimerTask>,
    screen: Option<(u32, u32)>,
    dialog_responses: VecDeque<Option<PathBuf>>,
    dialog_requests: Vec<FileDialogRequest>,
    popups: Vec<(NativeId, Option<(f64, f64)>)>,
    window_commands: Vec<(NativeId, WindowCommand)>,
    pending_events: usize,
    quit_requested: bool,
}

impl State {
    fn node(&self, id: NativeId) -> Result<&Node, BackendError> {
        self.nodes.get(id).ok_or(BackendError::NoSuchWidget)
    }

    fn node_mut(&mut self, id: NativeId) -> Result<&mut Node, BackendError> {
        self.nodes.get_mut(id).ok_or(BackendError::NoSuchWidget)
    }

    fn subtree(&self, root: NativeId) -> Vec<NativeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn current_page(&self, notebook: NativeId) -> i64 {
        self.nodes
            .get(notebook)
            .and_then(|n| n.props.get(&Property::CurrentPage))
            .and_then(PropValue::as_int)
            .unwrap_or(-1)
    }
}

/// A toolkit that lives entirely in memory.
pub struct HeadlessBackend {
    state: Mutex<State>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    /// Create an empty toolkit with no screen attached.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Create a toolkit reporting the given screen size.
    pub fn with_screen_size(width: u32, height: u32) -> Self {
        let backend = Self::new();
        backend.state.lock().screen = Some((width, height));
        backend
    }

    // -------------------------------------------------------------------------
    // Simulation helpers
    // -------------------------------------------------------------------------

    /// Emit a native signal on a widget, as the toolkit would.
    pub fn emit(&self, id: NativeId, signal: NativeSignal, event: NativeEvent) -> Result<(), BackendError> {
        let handlers: Vec<NativeHandler> = {
            let state = self.state.lock();
            let node = state.node(id)?;
            node.handlers
                .iter()
                .filter_map(|hid| state.handlers.get(*hid))
                .filter(|entry| entry.signal == signal)
                .map(|entry| Arc::clone(&entry.handler))
                .collect()
        };

        tracing::trace!(
            target: targets::BACKEND,
            ?id,
            ?signal,
            handler_count = handlers.len(),
            "emitting native signal"
        );

        for handler in handlers {
            handler(&event).map_err(BackendError::Handler)?;
        }
        Ok(())
    }

    /// Click a button, toggle a check box, or activate an entry.
    pub fn click(&self, id: NativeId) -> Result<(), BackendError> {
        self.activate(id)
    }

    /// Press a pointer button over a widget.
    pub fn press(&self, id: NativeId, button: u32, x: f64, y: f64) -> Result<(), BackendError> {
        self.emit(id, NativeSignal::ButtonPress, NativeEvent::Button { button, x, y })
    }

    /// Release a pointer button over a widget.
    pub fn release(&self, id: NativeId, button: u32, x: f64, y: f64) -> Result<(), BackendError> {
        self.emit(id, NativeSignal::ButtonRelease, NativeEvent::Button { button, x, y })
    }

    /// Move the pointer out of a widget.
    pub fn leave(&self, id: NativeId) -> Result<(), BackendError> {
        self.emit(id, NativeSignal::LeaveNotify, NativeEvent::Plain)
    }

    /// Give a widget a new allocation.
    pub fn allocate(&self, id: NativeId, width: u32, height: u32) -> Result<(), BackendError> {
        self.state.lock().node_mut(id)?.allocation = (width, height);
        self.emit(id, NativeSignal::SizeAllocate, NativeEvent::Allocation { width, height })
    }

    /// Change a property the way user interaction would.
    pub fn user_set(&self, id: NativeId, prop: Property, value: PropValue) -> Result<(), BackendError> {
        self.set_property(id, prop, value)
    }

    /// Move a tree view's cursor to `path`.
    pub fn select_row(&self, id: NativeId, path: &[usize]) -> Result<(), BackendError> {
        self.set_property(id, Property::Cursor, PropValue::Path(path.to_vec()))
    }

    /// Click a tree view column header.
    pub fn click_column(&self, id: NativeId, column: usize) -> Result<(), BackendError> {
        self.emit(id, NativeSignal::ColumnClicked, NativeEvent::Column(column))
    }

    /// Ask the window manager to close a window.
    pub fn request_close(&self, id: NativeId) -> Result<(), BackendError> {
        self.emit(id, NativeSignal::DeleteEvent, NativeEvent::Plain)
    }

    /// Advance the virtual clock and run every task that came due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let due: Vec<TimerTask> = {
            let mut state = self.state.lock();
            let fired = state.timers.advance(by);
            fired
                .into_iter()
                .filter_map(|id| state.tasks.remove(&id))
                .collect()
        };
        let count = due.len();
        for task in due {
            task();
        }
        count
    }

    /// Number of scheduled tasks still pending.
    pub fn pending_timers(&self) -> usize {
        self.state.lock().tasks.len()
    }

    /// Set or clear the reported screen size.
    pub fn set_screen_size(&self, size: Option<(u32, u32)>) {
        self.state.lock().screen = size;
    }

    /// Queue the answer for the next modal file chooser.
    pub fn push_dialog_response(&self, response: Option<PathBuf>) {
        self.state.lock().dialog_responses.push_back(response);
    }

    /// Every file chooser that was run, oldest first.
    pub fn dialog_requests(&self) -> Vec<FileDialogRequest> {
        self.state.lock().dialog_requests.clone()
    }

    /// Every menu popup, oldest first.
    pub fn popups(&self) -> Vec<(NativeId, Option<(f64, f64)>)> {
        self.state.lock().popups.clone()
    }

    /// Every window manager command, oldest first.
    pub fn window_commands(&self) -> Vec<(NativeId, WindowCommand)> {
        self.state.lock().window_commands.clone()
    }

    /// Pretend `count` native events arrived.
    pub fn queue_events(&self, count: usize) {
        self.state.lock().pending_events += count;
    }

    /// Returns `true` once [`NativeBackend::quit`] was called.
    pub fn quit_requested(&self) -> bool {
        self.state.lock().quit_requested
    }

    /// Number of live native widgets.
    pub fn widget_count(&self) -> usize {
        self.state.lock().nodes.len()
    }

    /// Number of handlers connected to `signal` on `id`.
    pub fn handler_count(&self, id: NativeId, signal: NativeSignal) -> usize {
        let state = self.state.lock();
        state.nodes.get(id).map_or(0, |node| {
            node.handlers
                .iter()
                .filter_map(|hid| state.handlers.get(*hid))
                .filter(|entry| entry.signal == signal)
                .count()
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn change_signal(prop: Property, value: &PropValue) -> Option<(NativeSignal, NativeEvent)> {
        match (prop, value) {
            (Property::Active, PropValue::Bool(v)) => Some((NativeSignal::Toggled, NativeEvent::Toggled(*v))),
            (Property::Value, v) => v
                .as_float()
                .map(|v| (NativeSignal::ValueChanged, NativeEvent::Value(v))),
            (Property::ActiveIndex, PropValue::Int(v)) => {
                Some((NativeSignal::Changed, NativeEvent::Index(*v as i32)))
            }
            (Property::CurrentPage, PropValue::Int(v)) => {
                Some((NativeSignal::SwitchPage, NativeEvent::Index(*v as i32)))
            }
            (Property::Cursor, PropValue::Path(path)) => {
                Some((NativeSignal::CursorChanged, NativeEvent::Path(path.clone())))
            }
            _ => None,
        }
    }

    fn set_allocation(&self, id: NativeId, width: u32, height: u32) -> Result<(), BackendError> {
        self.allocate(id, width, height)
    }
}

impl NativeBackend for HeadlessBackend {
    fn create(&self, kind: NativeKind) -> NativeId {
        let id = self.state.lock().nodes.insert(Node::new(kind));
        tracing::trace!(target: targets::BACKEND, ?id, ?kind, "created native widget");
        id
    }

    fn destroy(&self, id: NativeId) -> Result<(), BackendError> {
        let doomed = {
            let mut state = self.state.lock();
            let node = state.node_mut(id)?;
            if node.destroying {
                return Ok(());
            }
            let doomed = state.subtree(id);
            for nid in &doomed {
                if let Some(node) = state.nodes.get_mut(*nid) {
                    node.destroying = true;
                }
            }
            doomed
        };

        let mut first_error = None;
        for nid in &doomed {
            if let Err(err) = self.emit(*nid, NativeSignal::Destroy, NativeEvent::Plain) {
                first_error.get_or_insert(err);
            }
        }

        let packed = self.state.lock().nodes.get(id).is_some_and(|n| n.parent.is_some());
        if packed {
            if let Err(err) = self.unpack(id) {
                first_error.get_or_insert(err);
            }
        }

        {
            let mut state = self.state.lock();
            for nid in &doomed {
                if let Some(node) = state.nodes.remove(*nid) {
                    for hid in node.handlers {
                        state.handlers.remove(hid);
                    }
                }
            }
        }

        tracing::trace!(target: targets::BACKEND, ?id, count = doomed.len(), "destroyed native widgets");
        first_error.map_or(Ok(()), Err)
    }

    fn exists(&self, id: NativeId) -> bool {
        self.state.lock().nodes.contains_key(id)
    }

    fn kind(&self, id: NativeId) -> Result<NativeKind, BackendError> {
        Ok(self.state.lock().node(id)?.kind)
    }

    fn set_property(&self, id: NativeId, prop: Property, value: PropValue) -> Result<(), BackendError> {
        let (signal, peers, requested) = {
            let mut state = self.state.lock();
            let node = state.node_mut(id)?;
            let kind = node.kind;
            let old = node.props.insert(prop, value.clone());
            let changed = old.as_ref() != Some(&value);

            if prop == Property::Group {
                if let PropValue::Widget(peer) = &value {
                    let peer = *peer;
                    let leader = state.node(peer)?.radio_group.unwrap_or(peer);
                    state.node_mut(peer)?.radio_group = Some(leader);
                    state.node_mut(id)?.radio_group = Some(leader);
                }
            }

            let peers: Vec<NativeId> = match (kind, prop, &value) {
                (NativeKind::RadioButton, Property::Active, PropValue::Bool(true)) if changed => {
                    let group = state.node(id)?.radio_group;
                    match group {
                        Some(group) => state
                            .nodes
                            .iter()
                            .filter(|(nid, n)| {
                                *nid != id
                                    && n.radio_group == Some(group)
                                    && n.props.get(&Property::Active) == Some(&PropValue::Bool(true))
                            })
                            .map(|(nid, _)| nid)
                            .collect(),
                        None => Vec::new(),
                    }
                }
                _ => Vec::new(),
            };

            let requested = match (prop, &value) {
                (Property::SizeRequest, PropValue::Size(w, h)) => Some((*w, *h)),
                _ => None,
            };

            let signal = if changed {
                Self::change_signal(prop, &value)
            } else {
                None
            };
            (signal, peers, requested)
        };

        for peer in peers {
            self.set_property(peer, Property::Active, PropValue::Bool(false))?;
        }
        if let Some((signal, event)) = signal {
            self.emit(id, signal, event)?;
        }
        // The headless window system grants every size request.
        if let Some((width, height)) = requested {
            self.set_allocation(id, width, height)?;
        }
        Ok(())
    }

    fn property(&self, id: NativeId, prop: Property) -> Result<Option<PropValue>, BackendError> {
        Ok(self.state.lock().node(id)?.props.get(&prop).cloned())
    }

    fn pack(&self, parent: NativeId, child: NativeId, packing: Packing) -> Result<(), BackendError> {
        let first_page = {
            let mut state = self.state.lock();
            if state.node(child)?.parent.is_some() {
                return Err(BackendError::AlreadyPacked);
            }
            let parent_node = state.node(parent)?;
            if parent_node.kind.is_single_slot() && !parent_node.children.is_empty() {
                return Err(BackendError::SlotOccupied);
            }
            if let Packing::Pane(slot) = &packing {
                let taken = parent_node
                    .children
                    .iter()
                    .filter_map(|c| state.nodes.get(*c))
                    .any(|c| c.packing.as_ref() == Some(&Packing::Pane(*slot)));
                if taken {
                    return Err(BackendError::SlotOccupied);
                }
            }
            let is_notebook = parent_node.kind == NativeKind::Notebook;

            state.node_mut(parent)?.children.push(child);
            let child_node = state.node_mut(child)?;
            child_node.parent = Some(parent);
            child_node.packing = Some(packing);

            is_notebook && state.current_page(parent) < 0
        };

        tracing::trace!(target: targets::BACKEND, ?parent, ?child, "packed native widget");

        if first_page {
            self.set_property(parent, Property::CurrentPage, PropValue::Int(0))?;
        }
        Ok(())
    }

    fn unpack(&self, child: NativeId) -> Result<(), BackendError> {
        let switched = {
            let mut state = self.state.lock();
            let parent = state.node(child)?.parent.ok_or(BackendError::NotPacked)?;
            let child_node = state.node_mut(child)?;
            child_node.parent = None;
            child_node.packing = None;

            let parent_node = state.node_mut(parent)?;
            let removed = parent_node.children.iter().position(|c| *c == child);
            parent_node.children.retain(|c| *c != child);
            let remaining = parent_node.children.len() as i64;

            if parent_node.kind == NativeKind::Notebook {
                let current = state.current_page(parent);
                let removed = removed.map_or(-1, |r| r as i64);
                let parent_node = state.node_mut(parent)?;
                if remaining == 0 {
                    parent_node.props.insert(Property::CurrentPage, PropValue::Int(-1));
                    None
                } else if removed == current {
                    let next = current.min(remaining - 1);
                    parent_node.props.insert(Property::CurrentPage, PropValue::Int(next));
                    Some((parent, next))
                } else {
                    if removed < current {
                        parent_node.props.insert(Property::CurrentPage, PropValue::Int(current - 1));
                    }
                    None
                }
            } else {
                None
            }
        };

        tracing::trace!(target: targets::BACKEND, ?child, "unpacked native widget");

        // The active page went away, so a different page is now showing.
        if let Some((notebook, page)) = switched {
            self.emit(notebook, NativeSignal::SwitchPage, NativeEvent::Index(page as i32))?;
        }
        Ok(())
    }

    fn children(&self, parent: NativeId) -> Result<Vec<NativeId>, BackendError> {
        Ok(self.state.lock().node(parent)?.children.clone())
    }

    fn parent(&self, child: NativeId) -> Result<Option<NativeId>, BackendError> {
        Ok(self.state.lock().node(child)?.parent)
    }

    fn packing(&self, child: NativeId) -> Result<Option<Packing>, BackendError> {
        Ok(self.state.lock().node(child)?.packing.clone())
    }

    fn show_all(&self, id: NativeId) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.node(id)?;
        for nid in state.subtree(id) {
            if let Some(node) = state.nodes.get_mut(nid) {
                node.props.insert(Property::Visible, PropValue::Bool(true));
            }
        }
        Ok(())
    }

    fn allocation(&self, id: NativeId) -> Result<(u32, u32), BackendError> {
        Ok(self.state.lock().node(id)?.allocation)
    }

    fn connect(&self, id: NativeId, signal: NativeSignal, handler: NativeHandler) -> Result<HandlerId, BackendError> {
        let mut state = self.state.lock();
        state.node(id)?;
        let hid = state.handlers.insert(HandlerEntry {
            widget: id,
            signal,
            handler,
        });
        state.node_mut(id)?.handlers.push(hid);
        Ok(hid)
    }

    fn disconnect(&self, handler: HandlerId) -> bool {
        let mut state = self.state.lock();
        let Some(entry) = state.handlers.remove(handler) else {
            return false;
        };
        if let Some(node) = state.nodes.get_mut(entry.widget) {
            node.handlers.retain(|h| *h != handler);
        }
        true
    }

    fn activate(&self, id: NativeId) -> Result<(), BackendError> {
        let (kind, active) = {
            let state = self.state.lock();
            let node = state.node(id)?;
            let active = node
                .props
                .get(&Property::Active)
                .and_then(PropValue::as_bool)
                .unwrap_or(false);
            (node.kind, active)
        };
        match kind {
            NativeKind::Button => self.emit(id, NativeSignal::Clicked, NativeEvent::Plain),
            NativeKind::ToggleButton | NativeKind::CheckButton => {
                self.set_property(id, Property::Active, PropValue::Bool(!active))
            }
            NativeKind::RadioButton => self.set_property(id, Property::Active, PropValue::Bool(true)),
            NativeKind::Entry | NativeKind::ComboBoxEntry | NativeKind::MenuItem => {
                self.emit(id, NativeSignal::Activate, NativeEvent::Plain)
            }
            other => Err(BackendError::Unsupported(other)),
        }
    }

    fn window_command(&self, id: NativeId, command: WindowCommand) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        let kind = state.node(id)?.kind;
        if kind != NativeKind::Window {
            return Err(BackendError::Unsupported(kind));
        }
        state.window_commands.push((id, command));
        Ok(())
    }

    fn popup_menu(&self, menu: NativeId, at: Option<(f64, f64)>) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        let kind = state.node(menu)?.kind;
        if kind != NativeKind::Menu {
            return Err(BackendError::Unsupported(kind));
        }
        state.popups.push((menu, at));
        Ok(())
    }

    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId {
        let mut state = self.state.lock();
        let id = state.timers.start_one_shot(delay);
        state.tasks.insert(id, task);
        id
    }

    fn cancel(&self, timer: TimerId) -> bool {
        let mut state = self.state.lock();
        let pending = state.tasks.remove(&timer).is_some();
        pending && state.timers.stop(timer).is_ok()
    }

    fn screen_size(&self) -> Option<(u32, u32)> {
        self.state.lock().screen
    }

    fn process_pending(&self) -> usize {
        std::mem::take(&mut self.state.lock().pending_events)
    }

    fn quit(&self) {
        self.state.lock().quit_requested = true;
    }

    fn run_file_dialog(&self, request: &FileDialogRequest) -> Option<PathBuf> {
        let mut state = self.state.lock();
        state.dialog_requests.push(request.clone());
        state.dialog_responses.pop_front().flatten()
    }
}

impl fmt::Debug for HeadlessBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HeadlessBackend")
            .field("widgets", &state.nodes.len())
            .field("handlers", &state.handlers.len())
            .field("pending_timers", &state.tasks.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(HeadlessBackend: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileDialogAction, handler};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(backend: &HeadlessBackend, id: NativeId, signal: NativeSignal) -> Arc<Mutex<Vec<NativeEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        backend
            .connect(
                id,
                signal,
                handler(move |ev| {
                    seen_clone.lock().push(ev.clone());
                    Ok(())
                }),
            )
            .unwrap();
        seen
    }

    #[test]
    fn test_value_properties_emit_only_on_change() {
        let backend = HeadlessBackend::new();
        let spin = backend.create(NativeKind::SpinButton);
        let seen = counter(&backend, spin, NativeSignal::ValueChanged);

        backend.set_property(spin, Property::Value, PropValue::Float(2.0)).unwrap();
        backend.set_property(spin, Property::Value, PropValue::Float(2.0)).unwrap();
        backend.set_property(spin, Property::Lower, PropValue::Float(-1.0)).unwrap();

        assert_eq!(*seen.lock(), vec![NativeEvent::Value(2.0)]);
    }

    #[test]
    fn test_single_slot_parent_rejects_second_child() {
        let backend = HeadlessBackend::new();
        let frame = backend.create(NativeKind::Frame);
        let a = backend.create(NativeKind::Label);
        let b = backend.create(NativeKind::Label);

        backend.pack(frame, a, Packing::Single).unwrap();
        assert!(matches!(
            backend.pack(frame, b, Packing::Single),
            Err(BackendError::SlotOccupied)
        ));
        assert!(matches!(
            backend.pack(frame, a, Packing::Single),
            Err(BackendError::AlreadyPacked)
        ));
    }

    #[test]
    fn test_notebook_selects_first_page() {
        let backend = HeadlessBackend::new();
        let nb = backend.create(NativeKind::Notebook);
        let seen = counter(&backend, nb, NativeSignal::SwitchPage);
        let p1 = backend.create(NativeKind::Label);
        let p2 = backend.create(NativeKind::Label);

        backend.pack(nb, p1, Packing::Page { label: "one".into() }).unwrap();
        backend.pack(nb, p2, Packing::Page { label: "two".into() }).unwrap();
        backend.set_property(nb, Property::CurrentPage, PropValue::Int(1)).unwrap();
        backend.unpack(p2).unwrap();

        assert_eq!(
            *seen.lock(),
            vec![NativeEvent::Index(0), NativeEvent::Index(1), NativeEvent::Index(0)]
        );
    }

    #[test]
    fn test_radio_group_exclusive() {
        let backend = HeadlessBackend::new();
        let a = backend.create(NativeKind::RadioButton);
        let b = backend.create(NativeKind::RadioButton);
        backend.set_property(b, Property::Group, PropValue::Widget(a)).unwrap();

        backend.activate(a).unwrap();
        backend.activate(b).unwrap();

        assert_eq!(
            backend.property(a, Property::Active).unwrap(),
            Some(PropValue::Bool(false))
        );
        assert_eq!(
            backend.property(b, Property::Active).unwrap(),
            Some(PropValue::Bool(true))
        );
    }

    #[test]
    fn test_destroy_cascades_and_emits() {
        let backend = HeadlessBackend::new();
        let window = backend.create(NativeKind::Window);
        let label = backend.create(NativeKind::Label);
        backend.pack(window, label, Packing::Single).unwrap();
        let destroyed = counter(&backend, label, NativeSignal::Destroy);

        backend.destroy(window).unwrap();

        assert_eq!(destroyed.lock().len(), 1);
        assert!(!backend.exists(label));
        assert!(matches!(backend.destroy(window), Err(BackendError::NoSuchWidget)));
        assert_eq!(backend.widget_count(), 0);
    }

    #[test]
    fn test_handlers_can_reenter() {
        let backend = Arc::new(HeadlessBackend::new());
        let button = backend.create(NativeKind::Button);
        let entry = backend.create(NativeKind::Entry);

        let inner = backend.clone();
        backend
            .connect(
                button,
                NativeSignal::Clicked,
                handler(move |_| {
                    inner.set_property(entry, Property::Text, PropValue::Text("clicked".into()))?;
                    Ok(())
                }),
            )
            .unwrap();

        backend.click(button).unwrap();
        assert_eq!(
            backend.property(entry, Property::Text).unwrap(),
            Some(PropValue::Text("clicked".into()))
        );
    }

    #[test]
    fn test_timers_run_on_advance() {
        let backend = HeadlessBackend::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = hits.clone();
        backend.schedule(Duration::from_secs(1), Box::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));
        let h = hits.clone();
        let cancelled = backend.schedule(Duration::from_secs(1), Box::new(move || {
            h.fetch_add(10, Ordering::SeqCst);
        }));

        assert!(backend.cancel(cancelled));
        assert!(!backend.cancel(cancelled));
        assert_eq!(backend.advance(Duration::from_secs(2)), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(backend.pending_timers(), 0);
    }

    #[test]
    fn test_handler_error_propagates() {
        let backend = HeadlessBackend::new();
        let button = backend.create(NativeKind::Button);
        backend
            .connect(button, NativeSignal::Clicked, handler(|_| Err("nope".into())))
            .unwrap();

        assert!(matches!(backend.click(button), Err(BackendError::Handler(_))));
    }

    #[test]
    fn test_file_dialog_script() {
        let backend = HeadlessBackend::new();
        backend.push_dialog_response(Some(PathBuf::from("/tmp/out")));
        let request = FileDialogRequest {
            title: "Save File".into(),
            action: FileDialogAction::Save,
            filters: Vec::new(),
        };

        assert_eq!(backend.run_file_dialog(&request), Some(PathBuf::from("/tmp/out")));
        assert_eq!(backend.run_file_dialog(&request), None);
        assert_eq!(backend.dialog_requests().len(), 2);
    }
}
